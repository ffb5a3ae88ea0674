//! Error types for matching, pipelines and declarations.
//!
//! `EvalErrorKind` gives each failure a typed category. Factory functions
//! (e.g. `no_match()`) are the public API: they populate both `kind` and
//! `message`, attach the offending value where there is one, and are marked
//! `#[cold]` since every one of them sits on a failure path.
//!
//! Nothing here retries or recovers. A failure aborts the evaluation that
//! produced it and travels unchanged to the caller, unless the caller opts
//! into turning it into a `Result.Err` value with `catch`.

use crate::value::{ErrorValue, Value};

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Category name for a failed match.
pub const MATCH_ERROR: &str = "MatchError";
/// Category name for shape, arity and variant failures.
pub const TYPE_ERROR: &str = "TypeError";
/// Category name for bad values of the right type.
pub const VALUE_ERROR: &str = "ValueError";

/// Typed error category.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EvalErrorKind {
    // Matching
    #[error("no case matched value {value}")]
    NoMatch { value: String },

    // Option / Result helpers
    #[error("expected {expected}, got {got}")]
    VariantMismatch { expected: String, got: String },

    // Type / call
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },
    #[error("{type_name} is not callable")]
    NotCallable { type_name: String },
    #[error("{name} expects {expected} argument(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    // Sequences
    #[error("reduce of empty sequence with no initial value")]
    EmptyReduce,

    // Declarations
    #[error("invalid shape for {target}: {detail}")]
    InvalidShape { target: String, detail: String },
    #[error("{type_name} has no variant {variant}")]
    UnknownVariant { type_name: String, variant: String },
    #[error("{type_name} is missing field {field}")]
    MissingField { type_name: String, field: String },
    #[error("{type_name} has no field {field}")]
    UnknownField { type_name: String, field: String },

    /// A failure raised by user code, carried as-is.
    #[error("{error}")]
    Raised { error: ErrorValue },

    /// Catch-all for errors without a structured kind.
    #[error("{message}")]
    Custom { message: String },
}

impl EvalErrorKind {
    /// Category name used when the error is turned into an `ErrorValue`.
    pub fn category(&self) -> &str {
        match self {
            Self::NoMatch { .. } => MATCH_ERROR,
            Self::VariantMismatch { .. }
            | Self::TypeMismatch { .. }
            | Self::NotCallable { .. }
            | Self::ArityMismatch { .. }
            | Self::InvalidShape { .. }
            | Self::MissingField { .. }
            | Self::UnknownField { .. } => TYPE_ERROR,
            Self::EmptyReduce | Self::UnknownVariant { .. } => VALUE_ERROR,
            Self::Raised { error } => error.kind(),
            Self::Custom { .. } => "Error",
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory errors.
    pub message: String,
    /// The value that caused the failure, if any.
    pub value: Option<Value>,
    /// Additional context, innermost first.
    pub notes: Vec<String>,
}

impl EvalError {
    /// Create an error with just a message.
    ///
    /// Uses `Custom` kind. Prefer the factory functions when a structured
    /// kind exists.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
            value: None,
            notes: Vec::new(),
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            value: None,
            notes: Vec::new(),
        }
    }

    /// Raise an error value from user code.
    pub fn raise(error: ErrorValue) -> Self {
        Self::from_kind(EvalErrorKind::Raised { error })
    }

    #[must_use]
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Whether this is a failed match.
    #[inline]
    pub fn is_no_match(&self) -> bool {
        matches!(self.kind, EvalErrorKind::NoMatch { .. })
    }

    /// The error as data, for `Result.Err`.
    ///
    /// Raised errors come back unchanged. Everything else becomes an error
    /// value of its category, carrying the offending value as its argument.
    pub fn to_error_value(&self) -> ErrorValue {
        if let EvalErrorKind::Raised { error } = &self.kind {
            return error.clone();
        }
        ErrorValue::new(self.kind.category(), self.message.clone())
            .with_args(self.value.iter().cloned().collect())
    }
}

impl From<ErrorValue> for EvalError {
    fn from(error: ErrorValue) -> Self {
        EvalError::raise(error)
    }
}

// Matching

/// No case pattern matched the value.
#[cold]
pub fn no_match(value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoMatch {
        value: value.to_string(),
    })
    .with_value(value.clone())
}

// Option / Result helpers

/// A strict helper received the wrong variant.
#[cold]
pub fn variant_mismatch(expected: &str, got: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::VariantMismatch {
        expected: expected.to_string(),
        got: got.type_label(),
    })
    .with_value(got.clone())
}

// Type and call errors

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

/// Expected a list or tuple.
#[cold]
pub fn expected_sequence(got: &Value) -> EvalError {
    type_mismatch("list", got.type_name()).with_value(got.clone())
}

#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: type_name.to_string(),
    })
}

/// Wrong argument count for a named function.
#[cold]
pub fn wrong_arg_count(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

/// Wrong argument count for an anonymous function body.
#[cold]
pub fn wrong_function_args(expected: usize, got: usize) -> EvalError {
    wrong_arg_count("function", expected, got)
}

// Sequences

#[cold]
pub fn empty_reduce() -> EvalError {
    EvalError::from_kind(EvalErrorKind::EmptyReduce)
}

// Declarations

#[cold]
pub fn invalid_shape(target: &str, detail: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidShape {
        target: target.to_string(),
        detail: detail.into(),
    })
}

#[cold]
pub fn unknown_variant(type_name: &str, variant: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownVariant {
        type_name: type_name.to_string(),
        variant: variant.to_string(),
    })
}

#[cold]
pub fn missing_field(type_name: &str, field: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingField {
        type_name: type_name.to_string(),
        field: field.to_string(),
    })
}

#[cold]
pub fn unknown_field(type_name: &str, field: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownField {
        type_name: type_name.to_string(),
        field: field.to_string(),
    })
}
