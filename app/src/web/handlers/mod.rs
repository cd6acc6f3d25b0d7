// shopfront_app/src/web/handlers/mod.rs

// Declare handler modules
pub mod cart_handlers;
pub mod image_handlers;
pub mod product_handlers;
