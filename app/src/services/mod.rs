// shopfront_app/src/services/mod.rs

pub mod image_storage;

pub use image_storage::LocalImageStore;
