#![allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;

fn add() -> FunctionValue {
    FunctionValue::binary("add", |a, b| {
        Ok(Value::int(a.as_int().unwrap_or(0) + b.as_int().unwrap_or(0)))
    })
}

// RecordValue

#[test]
fn record_keeps_field_order() {
    let r = RecordValue::new("Point", [("x", Value::int(1)), ("y", Value::int(2))]);
    let names: Vec<&str> = r.field_names().iter().map(|n| &**n).collect();
    assert_eq!(names, vec!["x", "y"]);
    assert_eq!(r.get("y"), Some(&Value::int(2)));
    assert_eq!(r.get("z"), None);
}

#[test]
fn record_equality_ignores_field_order() {
    let a = RecordValue::new("Point", [("x", Value::int(1)), ("y", Value::int(2))]);
    let b = RecordValue::new("Point", [("y", Value::int(2)), ("x", Value::int(1))]);
    assert_eq!(a, b);
}

#[test]
fn record_equality_checks_type_name() {
    let a = RecordValue::new("Point", [("x", Value::int(1))]);
    let b = RecordValue::new("Vector", [("x", Value::int(1))]);
    assert_ne!(a, b);
}

#[test]
fn record_duplicate_field_keeps_last_value() {
    let r = RecordValue::new("P", [("x", Value::int(1)), ("x", Value::int(9))]);
    assert_eq!(r.len(), 1);
    assert_eq!(r.get("x"), Some(&Value::int(9)));
}

#[test]
fn record_with_field_leaves_original_untouched() {
    let a = RecordValue::new("Point", [("x", Value::int(1)), ("y", Value::int(2))]);
    let b = a.with_field("x", Value::int(10)).unwrap();
    assert_eq!(a.get("x"), Some(&Value::int(1)));
    assert_eq!(b.get("x"), Some(&Value::int(10)));
    assert_eq!(b.get("y"), Some(&Value::int(2)));
}

#[test]
fn record_with_unknown_field_fails() {
    let a = RecordValue::new("Point", [("x", Value::int(1))]);
    let err = a.with_field("z", Value::int(0)).unwrap_err();
    assert!(matches!(err.kind, crate::EvalErrorKind::UnknownField { .. }));
}

#[test]
fn record_display() {
    let r = RecordValue::new("Point", [("x", Value::int(1)), ("y", Value::string("a"))]);
    assert_eq!(r.to_string(), "Point(x=1, y=\"a\")");
}

// FunctionValue

#[test]
fn function_full_application() {
    assert_eq!(add().call(&[Value::int(1), Value::int(2)]).unwrap(), Value::int(3));
}

#[test]
fn function_partial_application_returns_function() {
    let partial = add().call(&[Value::int(1)]).unwrap();
    let Value::Function(f) = &partial else {
        panic!("expected a function, got {partial}");
    };
    assert_eq!(f.bound(), &[Value::int(1)]);
    assert_eq!(f.remaining(), 1);
    assert_eq!(partial.call(&[Value::int(2)]).unwrap(), Value::int(3));
}

#[test]
fn function_partial_application_preserves_order() {
    let sub = FunctionValue::binary("sub", |a, b| {
        Ok(Value::int(a.as_int().unwrap() - b.as_int().unwrap()))
    });
    let partial = sub.call(&[Value::int(10)]).unwrap();
    assert_eq!(partial.call(&[Value::int(3)]).unwrap(), Value::int(7));
}

#[test]
fn function_too_many_arguments() {
    let err = add()
        .call(&[Value::int(1), Value::int(2), Value::int(3)])
        .unwrap_err();
    assert_eq!(
        err.kind,
        crate::EvalErrorKind::ArityMismatch {
            name: "add".into(),
            expected: 2,
            got: 3,
        }
    );
}

#[test]
fn nullary_function_ignores_arguments() {
    let f = FunctionValue::nullary("seven", || Ok(Value::int(7)));
    assert_eq!(f.call(&[Value::int(1)]).unwrap(), Value::int(7));
}

#[test]
fn function_equality_is_identity_of_body() {
    let f = add();
    let g = add();
    assert_eq!(f, f.clone());
    assert_ne!(f, g);
}

#[test]
fn with_arity_shares_body() {
    let f = FunctionValue::new("sum", 3, |args| {
        Ok(Value::int(args.iter().filter_map(Value::as_int).sum()))
    });
    let g = f.with_arity(3);
    assert_eq!(f, g);
    assert_ne!(f, f.with_arity(2));
}
