// shopfront/src/catalog/products.rs

//! Write-side input for adding a product. Only field presence is checked.

use crate::error::{ShopError, ShopResult};
use crate::models::NewItem;
use serde::Deserialize;

/// A numeric form field. Clients posting forms send numbers as text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
  Number(f64),
  Text(String),
}

impl NumericField {
  fn parse(&self, field: &str) -> ShopResult<f64> {
    match self {
      NumericField::Number(n) if n.is_finite() => Ok(*n),
      NumericField::Text(text) => text
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ShopError::Validation(format!("Field '{}' must be a number.", field))),
      NumericField::Number(_) => Err(ShopError::Validation(format!("Field '{}' must be a number.", field))),
    }
  }
}

/// A product as submitted by a client, before validation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
  pub product_name: Option<String>,
  pub category: Option<String>,
  pub rating: Option<NumericField>,
  pub price: Option<NumericField>,
  pub offer_price: Option<NumericField>,
  pub offer_percentage: Option<NumericField>,
  /// Used as-is when no image is uploaded alongside the product.
  pub image_url: Option<String>,
}

fn required_text(value: &Option<String>, field: &str) -> ShopResult<String> {
  value
    .as_deref()
    .map(str::trim)
    .filter(|v| !v.is_empty())
    .map(str::to_string)
    .ok_or_else(|| ShopError::Validation(format!("Missing required field '{}'.", field)))
}

fn required_number(value: &Option<NumericField>, field: &str) -> ShopResult<f64> {
  value
    .as_ref()
    .ok_or_else(|| ShopError::Validation(format!("Missing required field '{}'.", field)))?
    .parse(field)
}

impl NewProduct {
  pub fn validate(&self) -> ShopResult<NewItem> {
    Ok(NewItem {
      product_name: required_text(&self.product_name, "productName")?,
      category: required_text(&self.category, "category")?,
      rating: required_number(&self.rating, "rating")?,
      price: required_number(&self.price, "price")?,
      offer_price: required_number(&self.offer_price, "offerPrice")?,
      offer_percentage: required_number(&self.offer_percentage, "offerPercentage")?,
      image_url: self.image_url.clone().filter(|url| !url.trim().is_empty()),
    })
  }
}
