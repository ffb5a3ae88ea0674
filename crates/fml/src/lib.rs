#![allow(
    clippy::result_large_err,
    reason = "EvalError is fundamental; boxing would add complexity across every crate"
)]
//! A functional layer over a dynamic value model.
//!
//! `fml` brings together:
//! - the value model with enums, records and the `Option` / `Result`
//!   families (`fml_value`)
//! - pattern matching with first-match-wins case evaluation (`fml_patterns`)
//! - lazy `>>` pipelines that run only when composed with `execute()`
//!   (`fml_pipeline`)
//!
//! ```text
//! use fml::prelude::*;
//!
//! let out = val(Value::list(..)) >> ifilter(is_even) >> imap(square) >> execute();
//! ```
//!
//! Most programs only need the [`prelude`].

use std::sync::Once;

pub use fml_patterns::{
    match_value, matcher, Bindings, CaseClause, GuardFn, Handler, HandlerFn, MatchExpression,
    Pattern, Rest, Shape,
};
pub use fml_pipeline::{
    async_val, catch, compose, curry, curry_fn, curry_value, execute, execute_with, if_err,
    if_none, if_ok, if_some, ifilter, imap, into_result, ireduce, is_err, is_none, is_ok, is_some,
    lift, lift2, monads, val, AsyncExpression, AsyncFn, AsyncPipeline, AsyncStep, Execute,
    Expression, IntoAsyncSteps, IntoSteps, Pipeline, Strictness,
};
pub use fml_value::{
    Assignment, EnumDef, ErrorValue, EvalError, EvalErrorKind, EvalResult, FunctionValue, Heap,
    Name, NativeFn, NormalizedType, RecordDef, RecordLayout, RecordValue, TypeDesc, Value,
    VariantShape, MATCH_ERROR, OPTION, RESULT, TYPE_ERROR, VALUE_ERROR,
};

/// Everything needed to declare types, match on values and build pipelines.
pub mod prelude {
    pub use crate::{
        async_val, catch, compose, curry, curry_fn, execute, execute_with, if_err, if_none, if_ok,
        if_some, ifilter, imap, ireduce, is_err, is_none, is_ok, is_some, lift, lift2,
        match_value, matcher, val, EnumDef, ErrorValue, EvalError, EvalResult, Expression,
        FunctionValue, Pattern, Pipeline, RecordDef, Rest, Strictness, TypeDesc, Value,
    };
}

/// Environment variable holding filter directives for fml's own logging.
pub const LOG_ENV: &str = "FML_LOG";

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `FML_LOG=fml_pipeline=debug`, or fall back to `RUST_LOG`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if a filter is set
        let Some(directives) = filter_directives(
            std::env::var(LOG_ENV).ok(),
            std::env::var("RUST_LOG").ok(),
        ) else {
            return;
        };
        let filter = EnvFilter::new(directives);
        let installed = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(filter)
            .try_init();
        if installed.is_err() {
            tracing::debug!("a global subscriber is already installed");
        }
    });
}

/// Pick the filter directives: `FML_LOG` wins over `RUST_LOG`.
fn filter_directives(fml_log: Option<String>, rust_log: Option<String>) -> Option<String> {
    fml_log
        .filter(|d| !d.trim().is_empty())
        .or(rust_log.filter(|d| !d.trim().is_empty()))
}
