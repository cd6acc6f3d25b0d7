// shopfront_app/src/db/item_repo.rs

use super::store_error;
use async_trait::async_trait;
use shopfront::{Item, ItemFilter, ItemSort, ItemStore, NewItem, ShopResult};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument};
use uuid::Uuid;

const ITEM_COLUMNS: &str = "id, product_name, category, rating, price, offer_price, offer_percentage, image_url";

#[derive(Debug, Clone, FromRow)]
struct ItemRow {
  id: Uuid,
  product_name: String,
  category: String,
  rating: f64,
  price: f64,
  offer_price: f64,
  offer_percentage: f64,
  image_url: Option<String>,
}

impl From<ItemRow> for Item {
  fn from(row: ItemRow) -> Self {
    Item {
      id: row.id,
      product_name: row.product_name,
      category: row.category,
      rating: row.rating,
      price: row.price,
      offer_price: row.offer_price,
      offer_percentage: row.offer_percentage,
      image_url: row.image_url,
    }
  }
}

/// Escapes `LIKE` wildcards so the search term is matched literally.
fn like_pattern(search: &str) -> String {
  let mut escaped = String::with_capacity(search.len() + 2);
  escaped.push('%');
  for c in search.chars() {
    if matches!(c, '%' | '_' | '\\') {
      escaped.push('\\');
    }
    escaped.push(c);
  }
  escaped.push('%');
  escaped
}

// Names compare byte-wise, the same order `ItemSort::compare` gives in memory.
fn order_clause(sort: ItemSort) -> &'static str {
  match sort {
    ItemSort::OfferPriceAscending => " ORDER BY offer_price ASC, id",
    ItemSort::OfferPriceDescending => " ORDER BY offer_price DESC, id",
    ItemSort::ProductNameAscending => " ORDER BY product_name COLLATE \"C\" ASC, id",
  }
}

#[derive(Clone)]
pub struct PgItemStore {
  pool: PgPool,
}

impl PgItemStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  fn build_find_query<'a>(filter: &'a ItemFilter, sort: ItemSort) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM items WHERE TRUE", ITEM_COLUMNS));
    if let Some(search) = &filter.search {
      let pattern = like_pattern(search);
      qb.push(" AND (product_name ILIKE ")
        .push_bind(pattern.clone())
        .push(" OR category ILIKE ")
        .push_bind(pattern)
        .push(")");
    }
    if let Some(categories) = &filter.categories {
      qb.push(" AND category = ANY(").push_bind(categories.clone()).push(")");
    }
    qb.push(order_clause(sort));
    qb
  }
}

#[async_trait]
impl ItemStore for PgItemStore {
  #[instrument(name = "PgItemStore::find", skip(self), err(Display))]
  async fn find(&self, filter: &ItemFilter, sort: ItemSort) -> ShopResult<Vec<Item>> {
    let mut qb = Self::build_find_query(filter, sort);
    let rows = qb.build_query_as::<ItemRow>().fetch_all(&self.pool).await.map_err(store_error)?;
    debug!(count = rows.len(), "Items fetched.");
    Ok(rows.into_iter().map(Item::from).collect())
  }

  #[instrument(name = "PgItemStore::find_by_id", skip(self), err(Display))]
  async fn find_by_id(&self, id: Uuid) -> ShopResult<Option<Item>> {
    let row: Option<ItemRow> = sqlx::query_as(&format!("SELECT {} FROM items WHERE id = $1", ITEM_COLUMNS))
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(store_error)?;
    Ok(row.map(Item::from))
  }

  #[instrument(name = "PgItemStore::create", skip(self, item), fields(product_name = %item.product_name), err(Display))]
  async fn create(&self, item: NewItem) -> ShopResult<Item> {
    let row: ItemRow = sqlx::query_as(&format!(
      "INSERT INTO items (id, product_name, category, rating, price, offer_price, offer_percentage, image_url) \
       VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
      ITEM_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(&item.product_name)
    .bind(&item.category)
    .bind(item.rating)
    .bind(item.price)
    .bind(item.offer_price)
    .bind(item.offer_percentage)
    .bind(&item.image_url)
    .fetch_one(&self.pool)
    .await
    .map_err(store_error)?;
    Ok(row.into())
  }
}
