#![allow(
    clippy::result_large_err,
    reason = "EvalError is fundamental; boxing would add complexity across every crate"
)]
//! Lazy pipelines for fml values.
//!
//! This crate provides:
//! - The expression wrapper and the `>>` composition operator (`Expression`, `Pipeline`)
//! - Terminal evaluation (`execute`, `execute_with`)
//! - Pipelines with suspending steps (`AsyncPipeline`)
//! - `Option` / `Result` helpers with a strictness policy
//! - Sequence helpers and currying

mod async_pipeline;
mod curry;
mod expression;
pub mod monads;
mod pipeline;
mod sequence;

pub use async_pipeline::{
    async_val, AsyncExpression, AsyncFn, AsyncPipeline, AsyncStep, IntoAsyncSteps,
};
pub use curry::{curry, curry_fn, curry_value};
pub use expression::{execute, execute_with, lift, lift2, val, Execute, Expression};
pub use monads::{
    catch, if_err, if_none, if_ok, if_some, into_result, is_err, is_none, is_ok, is_some,
    Strictness,
};
pub use pipeline::{compose, IntoSteps, Pipeline};
pub use sequence::{ifilter, imap, ireduce};
