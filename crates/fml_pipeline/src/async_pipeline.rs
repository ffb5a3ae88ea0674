//! Pipelines with asynchronous steps.
//!
//! Same contract as [`Pipeline`]: steps run left to right, each on the
//! previous result, and the first failure ends the run. A step may suspend;
//! the next step never starts before the previous one's result exists.
//! Dropping the returned future cancels the run at its current step.

use std::fmt;
use std::future::Future;
use std::ops::Shr;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::Instrument;

use fml_value::{EvalResult, Name, Value};

use crate::expression::{Execute, Expression};
use crate::pipeline::{IntoSteps, Pipeline};

/// Body of an async step.
pub type AsyncFn = dyn Fn(Value) -> BoxFuture<'static, EvalResult> + Send + Sync;

/// A step whose result is produced by a future.
#[derive(Clone)]
pub struct AsyncExpression {
    name: Name,
    func: Arc<AsyncFn>,
}

impl AsyncExpression {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, input: Value) -> BoxFuture<'static, EvalResult> {
        (self.func)(input)
    }
}

impl fmt::Debug for AsyncExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<async {}>", self.name)
    }
}

/// Lift an async closure into a step.
pub fn async_val<F, Fut>(name: impl Into<Name>, f: F) -> AsyncExpression
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = EvalResult> + Send + 'static,
{
    AsyncExpression {
        name: name.into(),
        func: Arc::new(move |input| f(input).boxed()),
    }
}

/// One step of an async pipeline.
#[derive(Clone, Debug)]
pub enum AsyncStep {
    Sync(Expression),
    Async(AsyncExpression),
}

impl AsyncStep {
    async fn run(&self, args: Vec<Value>) -> EvalResult {
        match self {
            AsyncStep::Sync(expr) => expr.call(&args),
            AsyncStep::Async(step) => {
                step.call(args.into_iter().next().unwrap_or(Value::Void))
                    .await
            }
        }
    }
}

impl From<Expression> for AsyncStep {
    fn from(expr: Expression) -> Self {
        AsyncStep::Sync(expr)
    }
}

impl From<AsyncExpression> for AsyncStep {
    fn from(step: AsyncExpression) -> Self {
        AsyncStep::Async(step)
    }
}

/// Anything that contributes steps to an async pipeline.
pub trait IntoAsyncSteps {
    fn into_async_steps(self) -> Vec<AsyncStep>;
}

impl<T: IntoSteps> IntoAsyncSteps for T {
    fn into_async_steps(self) -> Vec<AsyncStep> {
        self.into_steps().into_iter().map(AsyncStep::Sync).collect()
    }
}

impl IntoAsyncSteps for AsyncExpression {
    fn into_async_steps(self) -> Vec<AsyncStep> {
        vec![AsyncStep::Async(self)]
    }
}

impl IntoAsyncSteps for AsyncPipeline {
    fn into_async_steps(self) -> Vec<AsyncStep> {
        self.steps
    }
}

/// An ordered sequence of sync and async steps.
#[derive(Clone, Debug, Default)]
pub struct AsyncPipeline {
    steps: Vec<AsyncStep>,
}

impl AsyncPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[AsyncStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// A new pipeline with `step` appended.
    #[must_use]
    pub fn then(&self, step: impl Into<AsyncStep>) -> AsyncPipeline {
        let mut steps = self.steps.clone();
        steps.push(step.into());
        AsyncPipeline { steps }
    }

    /// A new pipeline with every step of `next` appended.
    #[must_use]
    pub fn then_all(&self, next: impl IntoAsyncSteps) -> AsyncPipeline {
        let mut steps = self.steps.clone();
        steps.extend(next.into_async_steps());
        AsyncPipeline { steps }
    }

    /// Evaluate the pipeline, awaiting each step in turn.
    pub fn call(&self, args: Vec<Value>) -> BoxFuture<'static, EvalResult> {
        let steps = self.steps.clone();
        let span = tracing::debug_span!("async_pipeline", steps = steps.len());
        async move {
            let mut remaining = steps.iter();
            let Some(first) = remaining.next() else {
                return Ok(args.into_iter().next().unwrap_or(Value::Void));
            };
            let mut acc = first.run(args).await?;
            for (index, step) in remaining.enumerate() {
                tracing::trace!(step = index + 1, input = %acc, "running step");
                acc = step.run(vec![acc]).await?;
            }
            Ok(acc)
        }
        .instrument(span)
        .boxed()
    }

    /// Evaluate with no input.
    pub fn run(&self) -> BoxFuture<'static, EvalResult> {
        self.call(Vec::new())
    }
}

impl From<Pipeline> for AsyncPipeline {
    fn from(pipeline: Pipeline) -> Self {
        AsyncPipeline {
            steps: pipeline.into_async_steps(),
        }
    }
}

impl From<&Pipeline> for AsyncPipeline {
    fn from(pipeline: &Pipeline) -> Self {
        AsyncPipeline {
            steps: pipeline.into_async_steps(),
        }
    }
}

impl From<AsyncExpression> for AsyncPipeline {
    fn from(step: AsyncExpression) -> Self {
        AsyncPipeline {
            steps: vec![AsyncStep::Async(step)],
        }
    }
}

// Operator sugar

impl<T: IntoAsyncSteps> Shr<T> for AsyncPipeline {
    type Output = AsyncPipeline;

    fn shr(mut self, rhs: T) -> AsyncPipeline {
        self.steps.extend(rhs.into_async_steps());
        self
    }
}

impl<T: IntoAsyncSteps> Shr<T> for &AsyncPipeline {
    type Output = AsyncPipeline;

    fn shr(self, rhs: T) -> AsyncPipeline {
        self.then_all(rhs)
    }
}

impl<T: IntoAsyncSteps> Shr<T> for AsyncExpression {
    type Output = AsyncPipeline;

    fn shr(self, rhs: T) -> AsyncPipeline {
        AsyncPipeline::from(self).then_all(rhs)
    }
}

impl Shr<Execute> for AsyncPipeline {
    type Output = BoxFuture<'static, EvalResult>;

    fn shr(self, marker: Execute) -> Self::Output {
        self.call(marker.args().to_vec())
    }
}

impl Shr<Execute> for &AsyncPipeline {
    type Output = BoxFuture<'static, EvalResult>;

    fn shr(self, marker: Execute) -> Self::Output {
        self.call(marker.args().to_vec())
    }
}

impl Shr<Execute> for AsyncExpression {
    type Output = BoxFuture<'static, EvalResult>;

    fn shr(self, marker: Execute) -> Self::Output {
        AsyncPipeline::from(self).call(marker.args().to_vec())
    }
}
