//! `Option` / `Result` helpers.
//!
//! The `if_*` helpers run a handler on the payload of one variant. What
//! happens to any other input depends on [`Strictness`]: lenient helpers
//! pass it through unchanged so a chain can carry on, strict helpers fail
//! with a variant mismatch naming what they expected and what they got.
//!
//! The `is_*` helpers are predicates. Inside the right family they answer
//! `true` or `false`; outside it a strict predicate fails with a type
//! mismatch and a lenient one answers `false`.

use fml_value::{type_mismatch, variant_mismatch, EvalError, EvalResult, Value, OPTION, RESULT};

use crate::expression::Expression;

/// How a helper treats input it was not written for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Fail on any other variant.
    #[default]
    Strict,
    /// Pass other values through unchanged.
    Lenient,
}

#[derive(Clone, Copy)]
enum Variant {
    Some,
    None,
    Ok,
    Err,
}

impl Variant {
    fn label(self) -> &'static str {
        match self {
            Variant::Some => "Option.Some",
            Variant::None => "Option.None",
            Variant::Ok => "Result.Ok",
            Variant::Err => "Result.Err",
        }
    }

    fn short(self) -> &'static str {
        match self {
            Variant::Some => "some",
            Variant::None => "none",
            Variant::Ok => "ok",
            Variant::Err => "err",
        }
    }

    fn family(self) -> &'static str {
        match self {
            Variant::Some | Variant::None => OPTION,
            Variant::Ok | Variant::Err => RESULT,
        }
    }

    /// Payload when `value` is this variant. `None` carries `Void`.
    fn payload(self, value: &Value) -> Option<Value> {
        match (self, value) {
            (Variant::Some, Value::Some(v))
            | (Variant::Ok, Value::Ok(v))
            | (Variant::Err, Value::Err(v)) => Some(Value::clone(v)),
            (Variant::None, Value::None) => Some(Value::Void),
            _ => None,
        }
    }

    fn in_family(self, value: &Value) -> bool {
        match self {
            Variant::Some | Variant::None => matches!(value, Value::Some(_) | Value::None),
            Variant::Ok | Variant::Err => matches!(value, Value::Ok(_) | Value::Err(_)),
        }
    }
}

fn subject(args: &[Value]) -> Value {
    args.first().cloned().unwrap_or(Value::Void)
}

fn if_variant(variant: Variant, handler: Expression, strictness: Strictness) -> Expression {
    let name = format!("if_{}", variant.short());
    Expression::native(name, move |args| {
        let value = subject(args);
        match variant.payload(&value) {
            Some(payload) => handler.apply(&payload),
            None => match strictness {
                Strictness::Lenient => Ok(value),
                Strictness::Strict => Err(variant_mismatch(variant.label(), &value)),
            },
        }
    })
}

fn is_variant(variant: Variant, strictness: Strictness) -> Expression {
    let name = format!("is_{}", variant.short());
    Expression::native(name, move |args| {
        let value = subject(args);
        if variant.in_family(&value) {
            return Ok(Value::Bool(variant.payload(&value).is_some()));
        }
        match strictness {
            Strictness::Lenient => Ok(Value::Bool(false)),
            Strictness::Strict => {
                Err(type_mismatch(variant.family(), value.type_name()).with_value(value))
            }
        }
    })
}

/// Run `handler` on the payload of `Result.Ok`.
pub fn if_ok(handler: impl Into<Expression>, strictness: Strictness) -> Expression {
    if_variant(Variant::Ok, handler.into(), strictness)
}

/// Run `handler` on the payload of `Result.Err`.
pub fn if_err(handler: impl Into<Expression>, strictness: Strictness) -> Expression {
    if_variant(Variant::Err, handler.into(), strictness)
}

/// Run `handler` on the payload of `Option.Some`.
pub fn if_some(handler: impl Into<Expression>, strictness: Strictness) -> Expression {
    if_variant(Variant::Some, handler.into(), strictness)
}

/// Run `handler` when the input is `Option.None`; it receives `Void`.
pub fn if_none(handler: impl Into<Expression>, strictness: Strictness) -> Expression {
    if_variant(Variant::None, handler.into(), strictness)
}

pub fn is_ok(strictness: Strictness) -> Expression {
    is_variant(Variant::Ok, strictness)
}

pub fn is_err(strictness: Strictness) -> Expression {
    is_variant(Variant::Err, strictness)
}

pub fn is_some(strictness: Strictness) -> Expression {
    is_variant(Variant::Some, strictness)
}

pub fn is_none(strictness: Strictness) -> Expression {
    is_variant(Variant::None, strictness)
}

/// Run `step`, turning its outcome into a `Result`.
///
/// Success becomes `Result.Ok(value)`. A failure becomes
/// `Result.Err(error)`, where the error value keeps the failure's category
/// and message. Without `catch`, failures propagate.
pub fn catch(step: impl Into<Expression>) -> Expression {
    let step = step.into();
    Expression::native("catch", move |args| Ok(into_result(step.call(args))))
}

/// Fold an evaluation outcome into a `Result` value.
pub fn into_result(outcome: EvalResult) -> Value {
    match outcome {
        Ok(value) => Value::ok(value),
        Err(error) => Value::err(Value::from_error(error.to_error_value())),
    }
}

/// Unwrap `Result.Ok` / `Option.Some`, failing on anything else.
///
/// `Result.Err` re-raises the error it carries.
pub fn unwrap() -> Expression {
    Expression::native("unwrap", |args| {
        let value = subject(args);
        match &value {
            Value::Ok(v) | Value::Some(v) => Ok(Value::clone(v)),
            Value::Err(e) => Err(match e.as_error() {
                Some(error) => EvalError::raise(error.clone()),
                None => EvalError::new(format!("called unwrap on Err({e:?})"))
                    .with_value(value.clone()),
            }),
            other => Err(variant_mismatch("Result.Ok or Option.Some", other)),
        }
    })
}
