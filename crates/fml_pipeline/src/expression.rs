//! Expressions: the unit a pipeline is built from.
//!
//! An expression wraps a constant, a function value, a match expression or a
//! native step. Expressions are immutable; composing them never changes an
//! operand.

use std::fmt;
use std::sync::Arc;

use fml_patterns::{Handler, MatchExpression};
use fml_value::{EvalResult, FunctionValue, Name, NativeFn, Value};

/// A composable unit of computation.
#[derive(Clone)]
pub enum Expression {
    /// Produces its value, ignoring any input.
    Const(Value),
    /// Calls the function with the input.
    Func(FunctionValue),
    /// Matches the first input against the clauses.
    Match(Arc<MatchExpression>),
    /// Library step that receives the input unchanged.
    Native { name: Name, func: Arc<NativeFn> },
}

impl Expression {
    /// A named native step.
    pub fn native(
        name: impl Into<Name>,
        func: impl Fn(&[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        Expression::Native {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Evaluate with `args`.
    pub fn call(&self, args: &[Value]) -> EvalResult {
        match self {
            Expression::Const(value) => Ok(value.clone()),
            Expression::Func(f) => f.call(args),
            Expression::Match(m) => m.call(args.first()),
            Expression::Native { func, .. } => func(args),
        }
    }

    /// Evaluate with a single input.
    #[inline]
    pub fn apply(&self, input: &Value) -> EvalResult {
        self.call(std::slice::from_ref(input))
    }
}

impl From<Value> for Expression {
    fn from(value: Value) -> Self {
        match value {
            Value::Function(f) => Expression::Func(f),
            other => Expression::Const(other),
        }
    }
}

impl From<FunctionValue> for Expression {
    fn from(f: FunctionValue) -> Self {
        Expression::Func(f)
    }
}

impl From<MatchExpression> for Expression {
    fn from(m: MatchExpression) -> Self {
        Expression::Match(Arc::new(m))
    }
}

/// A step used as a case handler receives the captures, or the subject.
impl From<Expression> for Handler {
    fn from(expr: Expression) -> Self {
        match expr {
            Expression::Const(value) => Handler::Const(value),
            Expression::Func(f) => Handler::Func(f),
            other => Handler::native(move |args| other.call(args)),
        }
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Const(v) => write!(f, "val({v})"),
            Expression::Func(func) => write!(f, "{func:?}"),
            Expression::Match(m) => write!(f, "<match {} clauses>", m.clauses().len()),
            Expression::Native { name, .. } => write!(f, "<{name}>"),
        }
    }
}

/// Lift a value, function or match expression into an expression.
pub fn val(x: impl Into<Expression>) -> Expression {
    x.into()
}

/// Lift a one-argument closure.
pub fn lift(
    name: impl Into<Name>,
    f: impl Fn(&Value) -> EvalResult + Send + Sync + 'static,
) -> Expression {
    Expression::Func(FunctionValue::unary(name, f))
}

/// Lift a two-argument closure.
pub fn lift2(
    name: impl Into<Name>,
    f: impl Fn(&Value, &Value) -> EvalResult + Send + Sync + 'static,
) -> Expression {
    Expression::Func(FunctionValue::binary(name, f))
}

/// Terminal marker: evaluates the chain it is composed onto.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Execute {
    args: Vec<Value>,
}

impl Execute {
    pub fn args(&self) -> &[Value] {
        &self.args
    }
}

/// Run the chain with no input.
pub fn execute() -> Execute {
    Execute::default()
}

/// Run the chain with `args` as its input.
pub fn execute_with(args: impl IntoIterator<Item = Value>) -> Execute {
    Execute {
        args: args.into_iter().collect(),
    }
}
