// src/lib.rs

//! Shopfront: the catalog query engine and cart reconciler behind a small
//! catalog-and-cart API.
//!
//! Both components are stateless between calls. All state lives behind the
//! [`ItemStore`], [`CartStore`] and [`ImageStore`] traits, whose handles are
//! constructed once at startup and injected here.
//!
//! Each multi-step operation runs as a named-step [`Pipeline`] over a shared
//! [`ContextData`]:
//!  - catalog query: `build_filter` -> `resolve_sort` -> `fetch_items` -> `narrow_price_range`
//!  - add product: `validate_product_fields` -> `store_product_image` -> `create_item`
//!  - add to cart: `validate_cart_input` -> `normalize_quantity` -> `verify_item_exists` -> `upsert_cart_entry`

pub mod cart;
pub mod catalog;
pub mod core;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::core::context_data::ContextData;
pub use crate::core::control::{PipelineControl, PipelineResult};
pub use crate::core::step::{Handler, SkipCondition, StepDef};
pub use crate::pipeline::Pipeline;

pub use crate::cart::{AddToCart, CartReconciler};
pub use crate::catalog::{Catalog, CatalogQuery, NewProduct, PriceRange};
pub use crate::models::{CartChange, CartEntry, CartUpsert, Item, NewItem};
pub use crate::store::{CartStore, ImageStore, ImageUpload, ItemFilter, ItemSort, ItemStore};

pub use crate::error::{ShopError, ShopResult};
