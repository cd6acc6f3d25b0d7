// shopfront_app/src/db/seed.rs

use shopfront::{ItemFilter, ItemSort, ItemStore, NewItem, ShopResult};
use tracing::{info, instrument};

/// A small demo catalog spread over a few categories and price points.
pub fn demo_items() -> Vec<NewItem> {
  [
    ("Trail Runner", "Shoes", 4.6, 120.0, 89.0, 26.0),
    ("Leather Boot", "Shoes", 4.8, 180.0, 149.0, 17.0),
    ("Court Sneaker", "Shoes", 4.1, 75.0, 59.0, 21.0),
    ("Canvas Tote", "Bags", 4.3, 25.0, 19.0, 24.0),
    ("Weekender Duffel", "Bags", 4.7, 140.0, 112.0, 20.0),
    ("Merino Crew", "Apparel", 4.5, 90.0, 72.0, 20.0),
    ("Wool Socks", "Apparel", 4.2, 12.0, 9.0, 25.0),
    ("Shoelace Pack", "Accessories", 3.9, 6.0, 5.0, 17.0),
  ]
  .into_iter()
  .map(|(name, category, rating, price, offer_price, offer_percentage)| NewItem {
    product_name: name.to_string(),
    category: category.to_string(),
    rating,
    price,
    offer_price,
    offer_percentage,
    image_url: None,
  })
  .collect()
}

/// Inserts the demo catalog unless the store already holds items.
#[instrument(name = "db::seed_items", skip(items))]
pub async fn seed_items(items: &dyn ItemStore) -> ShopResult<usize> {
  if !items.find(&ItemFilter::default(), ItemSort::default()).await?.is_empty() {
    info!("Item store already populated; skipping seed.");
    return Ok(0);
  }
  let demo = demo_items();
  let count = demo.len();
  for item in demo {
    items.create(item).await?;
  }
  info!(count, "Demo catalog seeded.");
  Ok(count)
}
