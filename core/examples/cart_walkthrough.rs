// shopfront/examples/cart_walkthrough.rs

use serde_json::json;
use shopfront::store::memory::{MemoryCartStore, MemoryImageStore, MemoryItemStore};
use shopfront::{AddToCart, CartChange, CartReconciler, Catalog, CatalogQuery, NewItem, ShopError};
use std::sync::Arc;
use tracing::info;

fn item(product_name: &str, category: &str, offer_price: f64) -> NewItem {
  NewItem {
    product_name: product_name.to_string(),
    category: category.to_string(),
    rating: 4.5,
    price: offer_price * 1.25,
    offer_price,
    offer_percentage: 20.0,
    image_url: None,
  }
}

#[tokio::main]
async fn main() -> Result<(), ShopError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Catalog and Cart Walkthrough ---");

  // 1. Stores are built once and shared by both components.
  let items = Arc::new(MemoryItemStore::with_items(vec![
    item("Trail Runner", "Shoes", 89.0),
    item("Canvas Tote", "Bags", 19.0),
    item("Leather Boot", "Shoes", 129.0),
  ]));
  let catalog = Catalog::new(items.clone(), Arc::new(MemoryImageStore::new()));
  let cart = CartReconciler::new(Arc::new(MemoryCartStore::new()), items);

  // 2. Query: shoes, cheapest first, offer price between 50 and 100.
  let query = CatalogQuery::from_pairs([
    ("search", "shoe"),
    ("sortBy", "ascending"),
    ("lowerPrice", "50"),
    ("higherPrice", "100"),
  ]);
  let shoes = catalog.query(query).await?;
  for shoe in &shoes {
    info!("{} at {:.2}", shoe.product_name, shoe.offer_price);
  }

  // 3. Two adds for the same item merge into one entry.
  let item_id = shoes[0].id.to_string();
  for quantity in [json!(1), json!("2")] {
    let outcome = cart
      .add_or_merge(AddToCart {
        item_id: Some(item_id.clone()),
        quantity: Some(quantity),
      })
      .await?;
    info!("{}: quantity now {}", outcome.status(), outcome.entry().quantity);
  }

  // 4. Decrement until the entry disappears.
  let entry_id = cart.list().await?[0].id.to_string();
  loop {
    match cart.decrement(&entry_id).await? {
      CartChange::Updated(entry) => info!("Decremented to {}", entry.quantity),
      CartChange::Removed(_) => {
        info!("Entry removed at zero.");
        break;
      }
    }
  }

  info!("Cart now holds {} entries.", cart.list().await?.len());
  Ok(())
}
