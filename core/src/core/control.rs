// shopfront/src/core/control.rs

//! Signals a step handler returns, and the outcome of a whole run.

/// Returned by a step handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineControl {
  /// Move on to the next handler or step.
  Continue,
  /// Halt the run. Nothing after this handler executes.
  Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineResult {
  /// Every non-skipped step ran.
  Completed,
  /// A handler returned `PipelineControl::Stop`.
  Stopped,
}
