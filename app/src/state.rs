// shopfront_app/src/state.rs
use crate::services::LocalImageStore;
use shopfront::{CartReconciler, CartStore, Catalog, ItemStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub catalog: Arc<Catalog>,
  pub cart: Arc<CartReconciler>,
  pub images: Arc<LocalImageStore>, // Also serves stored files back
}

impl AppState {
  /// Wires both components over one set of stores.
  pub fn new(items: Arc<dyn ItemStore>, carts: Arc<dyn CartStore>, images: Arc<LocalImageStore>) -> Self {
    Self {
      catalog: Arc::new(Catalog::new(items.clone(), images.clone())),
      cart: Arc::new(CartReconciler::new(carts, items)),
      images,
    }
  }
}
