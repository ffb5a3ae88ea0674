//! Step builders shared by the scenario tests.

use fml::prelude::*;

pub fn ints(ns: &[i64]) -> Value {
    Value::list(ns.iter().copied().map(Value::int).collect())
}

pub fn int_of(v: &Value) -> i64 {
    v.as_int().unwrap_or_default()
}

pub fn double() -> Expression {
    lift("double", |v| Ok(Value::int(int_of(v) * 2)))
}

pub fn square() -> Expression {
    lift("square", |v| Ok(Value::int(int_of(v) * int_of(v))))
}

pub fn is_even() -> Expression {
    lift("is_even", |v| Ok(Value::Bool(int_of(v) % 2 == 0)))
}

pub fn add() -> FunctionValue {
    FunctionValue::binary("add", |a, b| Ok(Value::int(int_of(a) + int_of(b))))
}
