// shopfront/src/pipeline/definition.rs

//! `Pipeline<TData>`: an ordered list of named steps and the handlers bound to them.

use crate::core::context_data::ContextData;
use crate::core::control::PipelineControl;
use crate::core::step::{Handler, SkipCondition, StepDef};
use crate::error::ShopError;
use std::collections::HashMap;
use std::future::Future;

/// A named-step async workflow over a root data type `TData`.
///
/// Pipelines are built once (at engine construction) and then run many times
/// concurrently; each run gets its own `ContextData<TData>`.
pub struct Pipeline<TData>
where
  TData: 'static + Send + Sync,
{
  pub(crate) steps: Vec<StepDef<TData>>,
  pub(crate) on: HashMap<String, Vec<Handler<TData>>>,
}

impl<TData> Pipeline<TData>
where
  TData: 'static + Send + Sync,
{
  /// Creates a pipeline from `(name, optional, skip_if)` step definitions.
  pub fn new(step_defs: &[(&str, bool, Option<SkipCondition<TData>>)]) -> Self {
    let steps = step_defs
      .iter()
      .map(|(name, optional, skip_cond_opt)| StepDef {
        name: (*name).to_string(),
        optional: *optional,
        skip_if: skip_cond_opt.clone(),
      })
      .collect();

    Self {
      steps,
      on: HashMap::new(),
    }
  }

  /// Panics on an unknown step name: that is a wiring bug, not a runtime condition.
  pub(crate) fn ensure_step_exists(&self, step_name: &str) {
    if !self.steps.iter().any(|s| s.name == step_name) {
      panic!("Pipeline setup error: Step '{}' not found in pipeline definition.", step_name);
    }
  }

  /// Binds a handler to a step. Several handlers on one step run in registration order.
  ///
  /// The handler's own error type only has to convert into `ShopError`.
  pub fn on_step<F, HandlerErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<PipelineControl, HandlerErr>> + Send + 'static,
    HandlerErr: Into<ShopError> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    let final_handler: Handler<TData> = Box::new(move |ctx_data| {
      let user_fut = handler_fn(ctx_data);
      Box::pin(async move { user_fut.await.map_err(Into::into) })
    });
    self.on.entry(step_name.to_string()).or_default().push(final_handler);
  }

  pub fn set_skip_condition(&mut self, step_name: &str, skip_if: Option<SkipCondition<TData>>) {
    self.ensure_step_exists(step_name);
    if let Some(step) = self.steps.iter_mut().find(|s| s.name == step_name) {
      step.skip_if = skip_if;
    }
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }
}
