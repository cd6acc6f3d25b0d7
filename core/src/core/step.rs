// shopfront/src/core/step.rs

use super::ContextData;
use crate::core::control::PipelineControl;
use crate::error::ShopError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Evaluated before a step runs; `true` skips the step.
pub type SkipCondition<TData> = Arc<dyn Fn(&TData) -> bool + Send + Sync + 'static>;

/// A boxed async step handler.
///
/// Handlers take a clone of the run's `ContextData<TData>`, copy what they need
/// out of it, drop the guard, and only then await store I/O.
pub type Handler<TData> = Box<
  dyn Fn(ContextData<TData>) -> Pin<Box<dyn Future<Output = Result<PipelineControl, ShopError>> + Send>>
    + Send
    + Sync,
>;

#[derive(Clone)]
pub struct StepDef<T: 'static + Send + Sync> {
  pub name: String,
  pub optional: bool,
  pub skip_if: Option<SkipCondition<T>>,
}

impl<T: 'static + Send + Sync> std::fmt::Debug for StepDef<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StepDef")
      .field("name", &self.name)
      .field("optional", &self.optional)
      .field("skip_if_present", &self.skip_if.is_some())
      .finish()
  }
}
