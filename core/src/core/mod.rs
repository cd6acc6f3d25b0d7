// shopfront/src/core/mod.rs

//! Building blocks shared by every pipeline: the context wrapper, control
//! signals and step definitions.

pub mod context_data;
pub mod control;
pub mod step;

pub use context_data::ContextData;
