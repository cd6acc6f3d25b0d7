// shopfront/src/catalog/mod.rs

//! Catalog Query Engine: text search, category filter, sorting and a post-hoc
//! offer-price narrowing over the item store.

pub mod engine;
pub mod products;
pub mod query;

pub use engine::Catalog;
pub use products::{NewProduct, NumericField};
pub use query::{coerce_price, CatalogQuery, PriceRange, ALL_CATEGORIES};
