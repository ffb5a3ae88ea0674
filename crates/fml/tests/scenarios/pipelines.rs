//! Pipelines end to end: composition, helpers and termination.

use fml::prelude::*;
use fml::{monads, VALUE_ERROR};
use pretty_assertions::assert_eq;

use crate::common::{add, double, int_of, ints, is_even, square};

#[test]
fn filter_map_execute() {
    let out = val(ints(&[1, 2, 3, 4])) >> ifilter(is_even()) >> imap(square()) >> execute();
    assert_eq!(out.unwrap(), ints(&[4, 16]));
}

#[test]
fn sum_of_even_squares() {
    let total = val(ints(&[1, 2, 3, 4, 5, 6]))
        >> ifilter(is_even())
        >> imap(square())
        >> ireduce(add(), Some(Value::int(0)))
        >> execute();
    assert_eq!(total.unwrap(), Value::int(4 + 16 + 36));
}

#[test]
fn executed_chain_is_a_plain_value() {
    let out: EvalResult = val(Value::int(3)) >> double() >> execute();
    assert_eq!(out.unwrap(), Value::int(6));
}

#[test]
fn reusable_pipeline_with_arguments() {
    let p = ifilter(is_even()) >> imap(double());
    assert_eq!((&p >> execute_with([ints(&[1, 2])])).unwrap(), ints(&[4]));
    assert_eq!((&p >> execute_with([ints(&[4, 6])])).unwrap(), ints(&[8, 12]));
}

#[test]
fn branching_from_a_shared_prefix() {
    let prefix = val(ints(&[1, 2, 3])) >> imap(double());
    let evens = &prefix >> ifilter(is_even());
    let total = &prefix >> ireduce(add(), None);
    assert_eq!(prefix.len(), 2);
    assert_eq!(evens.run().unwrap(), ints(&[2, 4, 6]));
    assert_eq!(total.run().unwrap(), Value::int(12));
    assert_eq!(prefix.run().unwrap(), ints(&[2, 4, 6]));
}

#[test]
fn none_through_lenient_if_some_stays_none() {
    let out = val(Value::None) >> if_some(double(), Strictness::Lenient) >> execute();
    assert_eq!(out.unwrap(), Value::None);
}

#[test]
fn lenient_if_ok_leaves_err_untouched() {
    let failure = Value::err(Value::error(VALUE_ERROR, "nope"));
    let out = val(failure.clone()) >> if_ok(double(), Strictness::Lenient) >> execute();
    assert_eq!(out.unwrap(), failure);
}

#[test]
fn railway_style_result_handling() {
    let parse = lift("parse", |v| {
        Ok(match v.as_str().and_then(|s| s.parse::<i64>().ok()) {
            Some(n) => Value::ok(Value::int(n)),
            None => Value::err(Value::error(VALUE_ERROR, "not a number")),
        })
    });
    let pipeline = parse
        >> if_ok(double(), Strictness::Lenient)
        >> if_err(
            lift("message", |e| {
                Ok(Value::string(e.as_error().map_or("", |e| e.message())))
            }),
            Strictness::Lenient,
        );
    assert_eq!(pipeline.call(&[Value::string("21")]).unwrap(), Value::int(42));
    assert_eq!(
        pipeline.call(&[Value::string("x")]).unwrap(),
        Value::string("not a number")
    );
}

#[test]
fn catch_then_inspect_error() {
    let risky = lift("risky", |v| {
        if int_of(v) > 10 {
            Err(EvalError::raise(ErrorValue::new(VALUE_ERROR, "too big")))
        } else {
            Ok(v.clone())
        }
    });
    let p = catch(risky) >> is_err(Strictness::Strict);
    assert_eq!(p.call(&[Value::int(3)]).unwrap(), Value::Bool(false));
    assert_eq!(p.call(&[Value::int(30)]).unwrap(), Value::Bool(true));
}

#[test]
fn err_values_compare_structurally() {
    let a = Value::err(Value::error(VALUE_ERROR, "bad"));
    let b = Value::err(Value::error(VALUE_ERROR, "bad"));
    let c = Value::err(Value::error(VALUE_ERROR, "worse"));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn unwrap_step_after_catch() {
    let out = val(Value::int(2)) >> catch(double()) >> monads::unwrap() >> execute();
    assert_eq!(out.unwrap(), Value::int(4));
}

#[test]
fn curried_function_matches_direct_call() {
    let f = FunctionValue::new("sum", 2, |args| {
        Ok(Value::int(args.iter().map(int_of).sum()))
    });
    let curried = curry(&f, 2);
    let one_by_one = curried
        .call(&[Value::int(1)])
        .unwrap()
        .call(&[Value::int(2)])
        .unwrap();
    let together = curried.call(&[Value::int(1), Value::int(2)]).unwrap();
    let direct = f.call(&[Value::int(1), Value::int(2)]).unwrap();
    assert_eq!(one_by_one, direct);
    assert_eq!(together, direct);
}

#[test]
fn compose_builds_the_same_chain() {
    let composed = compose([double(), double(), square()]);
    let chained = double() >> double() >> square();
    let input = [Value::int(1)];
    assert_eq!(composed.call(&input).unwrap(), chained.call(&input).unwrap());
}
