// shopfront/src/models/item.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog product record.
///
/// `offer_price` is the effective sale price and is what sorting and price
/// narrowing operate on. It is not checked against `price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
  pub id: Uuid,
  pub product_name: String,
  pub category: String,
  pub rating: f64,
  pub price: f64,
  pub offer_price: f64,
  pub offer_percentage: f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image_url: Option<String>,
}

/// An item before the store has assigned it an identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
  pub product_name: String,
  pub category: String,
  pub rating: f64,
  pub price: f64,
  pub offer_price: f64,
  pub offer_percentage: f64,
  #[serde(default)]
  pub image_url: Option<String>,
}

impl NewItem {
  pub fn into_item(self, id: Uuid) -> Item {
    Item {
      id,
      product_name: self.product_name,
      category: self.category,
      rating: self.rating,
      price: self.price,
      offer_price: self.offer_price,
      offer_percentage: self.offer_percentage,
      image_url: self.image_url,
    }
  }
}
