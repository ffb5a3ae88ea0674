//! Exception-like error values.
//!
//! An `ErrorValue` is what a failure looks like once it becomes data: it is
//! carried inside `Result.Err`, produced by `catch`, and compared
//! structurally. Two errors are equal when kind, message and arguments are
//! all equal, regardless of where they were created.

use std::fmt;

use super::{Name, Value};

/// An error as a value.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorValue {
    kind: Name,
    message: String,
    args: Vec<Value>,
}

impl ErrorValue {
    pub fn new(kind: impl Into<Name>, message: impl Into<String>) -> Self {
        ErrorValue {
            kind: kind.into(),
            message: message.into(),
            args: Vec::new(),
        }
    }

    /// Attach the arguments the error was raised with.
    #[must_use]
    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }

    /// Error category, e.g. `ValueError`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}
