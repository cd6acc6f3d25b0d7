// shopfront/src/core/context_data.rs
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Shared, lock-protected state for a single pipeline run.
///
/// Every step handler receives a clone of the same `ContextData`, so writes made
/// by one step are visible to the steps after it.
///
/// IMPORTANT: guards are blocking and MUST be dropped before any `.await`.
#[derive(Debug)]
pub struct ContextData<T: Send + Sync + 'static>(Arc<RwLock<T>>);

impl<T: Send + Sync + 'static> ContextData<T> {
  pub fn new(data: T) -> Self {
    ContextData(Arc::new(RwLock::new(data)))
  }

  pub fn read(&self) -> RwLockReadGuard<'_, T> {
    self.0.read()
  }

  pub fn write(&self) -> RwLockWriteGuard<'_, T> {
    self.0.write()
  }

  /// Takes the data back out once the run is over.
  ///
  /// Falls back to cloning when a step leaked a handle to the context
  /// (e.g. into a spawned task that is still alive).
  pub fn into_inner(self) -> T
  where
    T: Clone,
  {
    match Arc::try_unwrap(self.0) {
      Ok(lock) => lock.into_inner(),
      Err(shared) => shared.read().clone(),
    }
  }
}

impl<T: Send + Sync + 'static> Clone for ContextData<T> {
  fn clone(&self) -> Self {
    ContextData(Arc::clone(&self.0))
  }
}

impl<T: Send + Sync + 'static + Default> Default for ContextData<T> {
  fn default() -> Self {
    Self::new(Default::default())
  }
}
