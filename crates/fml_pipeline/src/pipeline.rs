//! Lazy pipelines.
//!
//! A pipeline is a flat list of expressions applied left to right. Composing
//! (with `>>` or [`Pipeline::then`]) always builds a new pipeline and never
//! evaluates anything. Composing with the [`Execute`] marker evaluates the
//! chain at once and yields its result instead of a pipeline, so a
//! terminated chain cannot be extended.
//!
//! ```text
//! let out = val(Value::list(..)) >> ifilter(is_even) >> imap(square) >> execute();
//! ```

use std::ops::Shr;

use fml_patterns::{Handler, MatchExpression};
use fml_value::{EvalResult, FunctionValue, Value};

use crate::async_pipeline::{AsyncExpression, AsyncPipeline, AsyncStep};
use crate::expression::{Execute, Expression};

/// Anything that contributes steps to a pipeline.
///
/// Pipelines contribute all their steps, so composition stays flat.
pub trait IntoSteps {
    fn into_steps(self) -> Vec<Expression>;
}

impl IntoSteps for Expression {
    fn into_steps(self) -> Vec<Expression> {
        vec![self]
    }
}

impl IntoSteps for Value {
    fn into_steps(self) -> Vec<Expression> {
        vec![Expression::from(self)]
    }
}

impl IntoSteps for FunctionValue {
    fn into_steps(self) -> Vec<Expression> {
        vec![Expression::Func(self)]
    }
}

impl IntoSteps for MatchExpression {
    fn into_steps(self) -> Vec<Expression> {
        vec![Expression::from(self)]
    }
}

impl IntoSteps for Pipeline {
    fn into_steps(self) -> Vec<Expression> {
        self.steps
    }
}

impl IntoSteps for &Pipeline {
    fn into_steps(self) -> Vec<Expression> {
        self.steps.clone()
    }
}

/// An ordered, immutable sequence of expressions.
///
/// `Clone` is the copy operation: a clone can be extended in a different
/// direction without affecting the original.
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    steps: Vec<Expression>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[Expression] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// A new pipeline with `next` appended.
    #[must_use]
    pub fn then(&self, next: impl IntoSteps) -> Pipeline {
        let mut steps = self.steps.clone();
        steps.extend(next.into_steps());
        tracing::debug!(steps = steps.len(), "composed pipeline");
        Pipeline { steps }
    }

    /// Evaluate the pipeline.
    ///
    /// The first step receives `args`; each later step receives the previous
    /// step's result. The first failure stops the run and is returned as-is.
    /// An empty pipeline returns its first argument, or `Void`.
    #[tracing::instrument(level = "debug", skip_all, fields(steps = self.steps.len()))]
    pub fn call(&self, args: &[Value]) -> EvalResult {
        let Some((first, rest)) = self.steps.split_first() else {
            return Ok(args.first().cloned().unwrap_or(Value::Void));
        };
        let mut acc = first.call(args)?;
        for (index, step) in rest.iter().enumerate() {
            tracing::trace!(step = index + 1, input = %acc, "applying step");
            acc = step.apply(&acc)?;
        }
        Ok(acc)
    }

    /// Evaluate with no input.
    pub fn run(&self) -> EvalResult {
        self.call(&[])
    }

    /// Evaluate with the marker's arguments.
    pub fn execute(&self, marker: &Execute) -> EvalResult {
        self.call(marker.args())
    }

    /// Switch to an async pipeline with `step` appended.
    pub fn then_async(&self, step: impl Into<AsyncStep>) -> AsyncPipeline {
        AsyncPipeline::from(self).then(step.into())
    }
}

impl From<Pipeline> for Handler {
    fn from(pipeline: Pipeline) -> Self {
        Handler::native(move |args| pipeline.call(args))
    }
}

impl From<&Pipeline> for Handler {
    fn from(pipeline: &Pipeline) -> Self {
        Handler::from(pipeline.clone())
    }
}

impl<T: IntoSteps> FromIterator<T> for Pipeline {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Pipeline {
            steps: iter.into_iter().flat_map(IntoSteps::into_steps).collect(),
        }
    }
}

/// Compose steps left to right into one pipeline.
pub fn compose<T: IntoSteps>(steps: impl IntoIterator<Item = T>) -> Pipeline {
    steps.into_iter().collect()
}

// Operator sugar

impl<T: IntoSteps> Shr<T> for Expression {
    type Output = Pipeline;

    fn shr(self, rhs: T) -> Pipeline {
        Pipeline { steps: vec![self] }.then(rhs)
    }
}

impl<T: IntoSteps> Shr<T> for Pipeline {
    type Output = Pipeline;

    fn shr(mut self, rhs: T) -> Pipeline {
        self.steps.extend(rhs.into_steps());
        self
    }
}

impl<T: IntoSteps> Shr<T> for &Pipeline {
    type Output = Pipeline;

    fn shr(self, rhs: T) -> Pipeline {
        self.then(rhs)
    }
}

impl Shr<Execute> for Expression {
    type Output = EvalResult;

    fn shr(self, marker: Execute) -> EvalResult {
        self.call(marker.args())
    }
}

impl Shr<Execute> for Pipeline {
    type Output = EvalResult;

    fn shr(self, marker: Execute) -> EvalResult {
        self.execute(&marker)
    }
}

impl Shr<Execute> for &Pipeline {
    type Output = EvalResult;

    fn shr(self, marker: Execute) -> EvalResult {
        self.execute(&marker)
    }
}

impl Shr<AsyncExpression> for Expression {
    type Output = AsyncPipeline;

    fn shr(self, rhs: AsyncExpression) -> AsyncPipeline {
        AsyncPipeline::from(Pipeline { steps: vec![self] }).then(AsyncStep::Async(rhs))
    }
}

impl Shr<AsyncExpression> for Pipeline {
    type Output = AsyncPipeline;

    fn shr(self, rhs: AsyncExpression) -> AsyncPipeline {
        AsyncPipeline::from(self).then(AsyncStep::Async(rhs))
    }
}

impl Shr<AsyncExpression> for &Pipeline {
    type Output = AsyncPipeline;

    fn shr(self, rhs: AsyncExpression) -> AsyncPipeline {
        self.then_async(rhs)
    }
}

impl Shr<AsyncPipeline> for Pipeline {
    type Output = AsyncPipeline;

    fn shr(self, rhs: AsyncPipeline) -> AsyncPipeline {
        AsyncPipeline::from(self).then_all(rhs)
    }
}
