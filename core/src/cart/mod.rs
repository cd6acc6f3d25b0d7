// shopfront/src/cart/mod.rs

pub mod quantity;
pub mod reconciler;

pub use quantity::{normalize_quantity, DEFAULT_QUANTITY};
pub use reconciler::{AddToCart, CartReconciler};
