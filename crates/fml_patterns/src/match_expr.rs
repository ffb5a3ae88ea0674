//! Match expressions: ordered `(pattern, handler)` clauses.
//!
//! Clauses are tried in registration order and the first matching clause's
//! handler is the only one that runs. When nothing matches, evaluation fails
//! with a no-match error naming the value.
//!
//! A match expression either carries its subject (`match_value(v)`) or is a
//! reusable matcher applied to values later (`matcher()`), which is how it is
//! used as a pipeline step.

use std::fmt;
use std::sync::Arc;

use fml_value::{no_match, EvalResult, FunctionValue, Value};

use crate::bindings::Bindings;
use crate::pattern::Pattern;

/// Handler body receiving the subject and the captures.
pub type HandlerFn = dyn Fn(&Value, &Bindings) -> EvalResult + Send + Sync;

/// What a clause produces when its pattern matches.
#[derive(Clone)]
pub enum Handler {
    /// A fixed value.
    Const(Value),
    /// A function value.
    ///
    /// It receives the captured values in order when the pattern captured
    /// anything, and the subject otherwise.
    Func(FunctionValue),
    /// A native closure over the subject and captures.
    Closure(Arc<HandlerFn>),
}

impl Handler {
    pub fn closure(f: impl Fn(&Value, &Bindings) -> EvalResult + Send + Sync + 'static) -> Self {
        Handler::Closure(Arc::new(f))
    }

    /// A native body called the way a function handler is.
    pub fn native(f: impl Fn(&[Value]) -> EvalResult + Send + Sync + 'static) -> Self {
        Handler::closure(move |subject, bindings| with_arguments(subject, bindings, &f))
    }

    pub fn invoke(&self, subject: &Value, bindings: &Bindings) -> EvalResult {
        match self {
            Handler::Const(value) => Ok(value.clone()),
            Handler::Func(f) => with_arguments(subject, bindings, |args| f.call(args)),
            Handler::Closure(f) => f(subject, bindings),
        }
    }
}

/// Captured values in order, or the subject when nothing was captured.
fn with_arguments<R>(subject: &Value, bindings: &Bindings, f: impl FnOnce(&[Value]) -> R) -> R {
    if bindings.is_empty() {
        f(std::slice::from_ref(subject))
    } else {
        f(&bindings.values())
    }
}

impl From<Value> for Handler {
    fn from(value: Value) -> Self {
        match value {
            Value::Function(f) => Handler::Func(f),
            other => Handler::Const(other),
        }
    }
}

impl From<FunctionValue> for Handler {
    fn from(f: FunctionValue) -> Self {
        Handler::Func(f)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Const(v) => write!(f, "{v}"),
            Handler::Func(func) => write!(f, "{func:?}"),
            Handler::Closure(_) => write!(f, "<closure>"),
        }
    }
}

/// One `(pattern, handler)` pair.
#[derive(Clone, Debug)]
pub struct CaseClause {
    pub pattern: Pattern,
    pub handler: Handler,
}

/// Ordered clauses, optionally with a subject.
#[derive(Clone, Debug, Default)]
pub struct MatchExpression {
    subject: Option<Value>,
    clauses: Vec<CaseClause>,
}

impl MatchExpression {
    /// A matcher without a subject.
    pub fn new() -> Self {
        Self::default()
    }

    /// A match expression bound to `subject`.
    pub fn with_subject(subject: Value) -> Self {
        MatchExpression {
            subject: Some(subject),
            clauses: Vec::new(),
        }
    }

    /// Register a clause. Clauses are tried in the order they are added.
    #[must_use]
    pub fn case(mut self, pattern: impl Into<Pattern>, handler: impl Into<Handler>) -> Self {
        self.clauses.push(CaseClause {
            pattern: pattern.into(),
            handler: handler.into(),
        });
        self
    }

    pub fn clauses(&self) -> &[CaseClause] {
        &self.clauses
    }

    pub fn subject(&self) -> Option<&Value> {
        self.subject.as_ref()
    }

    /// Evaluate against `value`, or the stored subject, or `Void`.
    pub fn call(&self, value: Option<&Value>) -> EvalResult {
        match value.or(self.subject.as_ref()) {
            Some(v) => self.apply(v),
            None => self.apply(&Value::Void),
        }
    }

    /// Evaluate against the stored subject.
    pub fn eval(&self) -> EvalResult {
        self.call(None)
    }

    /// Index of the first matching clause and its captures.
    pub fn select(&self, value: &Value) -> Option<(usize, Bindings)> {
        self.clauses
            .iter()
            .enumerate()
            .find_map(|(i, clause)| clause.pattern.try_match(value).map(|b| (i, b)))
    }

    /// Evaluate against `value`: first match wins.
    #[tracing::instrument(level = "debug", skip_all, fields(clauses = self.clauses.len()))]
    pub fn apply(&self, value: &Value) -> EvalResult {
        let Some((index, bindings)) = self.select(value) else {
            tracing::debug!(%value, "no clause matched");
            return Err(no_match(value));
        };
        tracing::trace!(clause = index, captures = bindings.len(), "matched");
        self.clauses[index].handler.invoke(value, &bindings)
    }
}

/// Start a match expression over `subject`.
pub fn match_value(subject: impl Into<Value>) -> MatchExpression {
    MatchExpression::with_subject(subject.into())
}

/// Start a subject-less matcher, for use as a pipeline step.
pub fn matcher() -> MatchExpression {
    MatchExpression::new()
}
