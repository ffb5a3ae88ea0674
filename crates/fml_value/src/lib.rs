#![allow(
    clippy::result_large_err,
    reason = "EvalError is fundamental; boxing would add complexity across every crate"
)]
//! Matchable value model.
//!
//! This crate provides:
//! - Runtime values (`Value`, `Heap`, `RecordValue`, `FunctionValue`, `ErrorValue`)
//! - Type descriptors and their normalised form (`TypeDesc`, `NormalizedType`)
//! - Enum and record declarations that build validated values (`EnumDef`, `RecordDef`)
//! - Evaluation errors (`EvalError`, `EvalErrorKind`, `EvalResult`)
//!
//! All heap payloads go through `Value::` factory methods, and nothing is
//! mutated after construction.

mod decl;
mod errors;
mod ty;
mod value;

pub use decl::{Assignment, EnumDef, RecordDef, VariantShape};
pub use errors::{EvalError, EvalErrorKind, EvalResult, MATCH_ERROR, TYPE_ERROR, VALUE_ERROR};
pub use ty::{NormalizedType, TypeDesc};
pub use value::{
    ErrorValue, FunctionValue, Heap, Name, NativeFn, RecordLayout, RecordValue, Value, OPTION,
    RESULT,
};

// Re-export error constructors for use by other crates
pub use errors::{
    empty_reduce, expected_sequence, invalid_shape, missing_field, no_match, not_callable,
    type_mismatch, unknown_field, unknown_variant, variant_mismatch, wrong_arg_count,
    wrong_function_args,
};
