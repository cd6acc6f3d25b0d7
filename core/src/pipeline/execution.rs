// shopfront/src/pipeline/execution.rs

use crate::core::context_data::ContextData;
use crate::core::control::{PipelineControl, PipelineResult};
use crate::error::{ShopError, ShopResult};
use crate::pipeline::definition::Pipeline;
use tracing::{event, instrument, Instrument, Level};

impl<TData> Pipeline<TData>
where
  TData: 'static + Send + Sync,
{
  /// Runs every step in order against `ctx_data`.
  ///
  /// The first handler error aborts the run and is returned unchanged. A
  /// non-optional step with no handlers is a `ShopError::HandlerMissing`.
  #[instrument(
    name = "Pipeline::run",
    skip_all,
    fields(
      pipeline_context_data_type = %std::any::type_name::<TData>(),
      num_steps = self.steps.len(),
    ),
    err(Display)
  )]
  pub async fn run(&self, ctx_data: ContextData<TData>) -> ShopResult<PipelineResult> {
    event!(Level::DEBUG, "Pipeline execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name = step_def.name.as_str();

      if let Some(skip_cond_fn) = &step_def.skip_if {
        let skip = {
          let guard = ctx_data.read();
          skip_cond_fn(&*guard)
        };
        if skip {
          event!(Level::DEBUG, step_name, "Step skipped due to 'skip_if' condition.");
          continue;
        }
      }

      let handlers = match self.on.get(step_name) {
        Some(handlers) if !handlers.is_empty() => handlers,
        _ if step_def.optional => {
          event!(Level::DEBUG, step_name, "Optional step has no handlers, skipping.");
          continue;
        }
        _ => {
          event!(Level::ERROR, step_name, "Non-optional step has no handlers.");
          return Err(ShopError::HandlerMissing {
            step_name: step_def.name.clone(),
          });
        }
      };

      let step_span = tracing::info_span!("pipeline_step", step_name, step_index = step_idx);
      for handler_fn in handlers {
        match handler_fn(ctx_data.clone()).instrument(step_span.clone()).await {
          Ok(PipelineControl::Continue) => {}
          Ok(PipelineControl::Stop) => {
            event!(Level::INFO, step_name, "Pipeline stopped by a handler.");
            return Ok(PipelineResult::Stopped);
          }
          Err(e) => {
            // Client errors are routine; only store/internal failures are worth an error-level event.
            if e.is_client_error() {
              event!(Level::DEBUG, step_name, error = %e, "Step rejected the request.");
            } else {
              event!(Level::ERROR, step_name, error = %e, "Step handler failed.");
            }
            return Err(e);
          }
        }
      }
    }

    event!(Level::DEBUG, "Pipeline execution completed successfully.");
    Ok(PipelineResult::Completed)
  }
}
