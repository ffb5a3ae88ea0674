//! Currying.
//!
//! Every [`FunctionValue`] already applies partially: called with fewer
//! arguments than its arity it returns a new function holding the
//! arguments so far. `curry` re-declares how many arguments a body takes
//! before it runs, which is what a variadic body needs to become curried.

use fml_value::{not_callable, EvalResult, FunctionValue, Name, Value};

/// `f` waiting for `arity` arguments in total.
///
/// Arguments accumulate in supply order across calls. Once `arity` is
/// reached the body runs with all of them; supplying more fails with an
/// arity mismatch.
pub fn curry(f: &FunctionValue, arity: usize) -> FunctionValue {
    tracing::trace!(function = f.name(), arity, "curry");
    f.with_arity(arity)
}

/// Curry a function held in a value.
pub fn curry_value(f: &Value, arity: usize) -> EvalResult {
    match f {
        Value::Function(func) => Ok(Value::Function(curry(func, arity))),
        other => Err(not_callable(other.type_name()).with_value(other.clone())),
    }
}

/// Declare a curried function from a body over its full argument list.
pub fn curry_fn(
    name: impl Into<Name>,
    arity: usize,
    body: impl Fn(&[Value]) -> EvalResult + Send + Sync + 'static,
) -> FunctionValue {
    FunctionValue::new(name, arity, body)
}
