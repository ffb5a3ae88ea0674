//! Sequence helpers: map, filter and reduce over lists and tuples.
//!
//! Each helper is an expression that transforms its input every time it is
//! evaluated, so a pipeline holding one can be run any number of times.
//! `imap` and `ifilter` keep the container kind: a tuple in gives a tuple
//! out.

use fml_value::{empty_reduce, expected_sequence, EvalResult, Value};

use crate::expression::Expression;

fn input(args: &[Value]) -> Value {
    args.first().cloned().unwrap_or(Value::Void)
}

fn rebuild(like: &Value, items: Vec<Value>) -> Value {
    match like {
        Value::Tuple(_) => Value::tuple(items),
        _ => Value::list(items),
    }
}

/// Apply `f` to every item.
pub fn imap(f: impl Into<Expression>) -> Expression {
    let f = f.into();
    Expression::native("imap", move |args| {
        let seq = input(args);
        let items = seq.as_seq().ok_or_else(|| expected_sequence(&seq))?;
        let mapped = items
            .iter()
            .map(|item| f.apply(item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rebuild(&seq, mapped))
    })
}

/// Keep the items for which `pred` answers a truthy value.
pub fn ifilter(pred: impl Into<Expression>) -> Expression {
    let pred = pred.into();
    Expression::native("ifilter", move |args| {
        let seq = input(args);
        let items = seq.as_seq().ok_or_else(|| expected_sequence(&seq))?;
        let mut kept = Vec::with_capacity(items.len());
        for item in items {
            if pred.apply(item)?.is_truthy() {
                kept.push(item.clone());
            }
        }
        Ok(rebuild(&seq, kept))
    })
}

/// Fold left to right with `f(acc, item)`.
///
/// Without `initial` the first item seeds the fold, and an empty input
/// fails with an empty-reduce error.
pub fn ireduce(f: impl Into<Expression>, initial: Option<Value>) -> Expression {
    let f = f.into();
    Expression::native("ireduce", move |args| {
        let seq = input(args);
        let items = seq.as_seq().ok_or_else(|| expected_sequence(&seq))?;
        fold(&f, items, initial.clone())
    })
}

fn fold(f: &Expression, items: &[Value], initial: Option<Value>) -> EvalResult {
    let (mut acc, rest) = match initial {
        Some(seed) => (seed, items),
        None => match items.split_first() {
            Some((first, rest)) => (first.clone(), rest),
            None => return Err(empty_reduce()),
        },
    };
    for item in rest {
        acc = f.call(&[acc, item.clone()])?;
    }
    Ok(acc)
}
