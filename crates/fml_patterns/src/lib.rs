#![allow(
    clippy::result_large_err,
    reason = "EvalError is fundamental; boxing would add complexity across every crate"
)]
//! Pattern matching for fml values.
//!
//! This crate provides:
//! - The closed pattern set (`Pattern`, `Shape`, `Rest`)
//! - Captures produced by a match (`Bindings`)
//! - Ordered first-match-wins case evaluation (`MatchExpression`)

mod bindings;
mod match_expr;
mod pattern;

pub use bindings::Bindings;
pub use match_expr::{match_value, matcher, CaseClause, Handler, HandlerFn, MatchExpression};
pub use pattern::{GuardFn, Pattern, Rest, Shape};
