// shopfront/src/catalog/engine.rs

//! The catalog query engine and product write path, each expressed as a pipeline.

use crate::catalog::products::NewProduct;
use crate::catalog::query::{CatalogQuery, PriceRange};
use crate::core::context_data::ContextData;
use crate::core::control::{PipelineControl, PipelineResult};
use crate::core::step::SkipCondition;
use crate::error::{ShopError, ShopResult};
use crate::models::{parse_record_id, Item, NewItem};
use crate::pipeline::Pipeline;
use crate::store::{ImageStore, ImageUpload, ItemFilter, ItemSort, ItemStore};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[derive(Clone)]
pub struct CatalogQueryCtxData {
  pub items: Arc<dyn ItemStore>,
  pub query: CatalogQuery,
  pub filter: ItemFilter,
  pub sort: ItemSort,
  pub results: Vec<Item>,
}

#[derive(Clone)]
pub struct AddProductCtxData {
  pub items: Arc<dyn ItemStore>,
  pub images: Arc<dyn ImageStore>,
  pub product: NewProduct,
  pub image: Option<ImageUpload>,
  pub validated: Option<NewItem>,
  pub created: Option<Item>,
}

/// Read path over the item store, plus product creation.
pub struct Catalog {
  items: Arc<dyn ItemStore>,
  images: Arc<dyn ImageStore>,
  query_pipeline: Pipeline<CatalogQueryCtxData>,
  add_product_pipeline: Pipeline<AddProductCtxData>,
}

fn build_query_pipeline() -> Pipeline<CatalogQueryCtxData> {
  let mut p = Pipeline::<CatalogQueryCtxData>::new(&[
    ("build_filter", false, None),
    ("resolve_sort", false, None),
    ("fetch_items", false, None),
    ("narrow_price_range", false, None),
  ]);

  // Search (name OR category) AND category membership, unless "all" was requested.
  p.on_step("build_filter", |ctx: ContextData<CatalogQueryCtxData>| async move {
    let mut guard = ctx.write();
    let filter = guard.query.filter();
    debug!(search = ?filter.search, categories = ?filter.categories, "Catalog filter built.");
    guard.filter = filter;
    Ok::<_, ShopError>(PipelineControl::Continue)
  });

  p.on_step("resolve_sort", |ctx: ContextData<CatalogQueryCtxData>| async move {
    let mut guard = ctx.write();
    let sort = guard.query.sort();
    guard.sort = sort;
    Ok::<_, ShopError>(PipelineControl::Continue)
  });

  p.on_step("fetch_items", |ctx: ContextData<CatalogQueryCtxData>| async move {
    let (items, filter, sort) = {
      let guard = ctx.read();
      (guard.items.clone(), guard.filter.clone(), guard.sort)
    };
    let found = items.find(&filter, sort).await?;
    debug!(count = found.len(), "Items fetched from store.");
    ctx.write().results = found;
    Ok::<_, ShopError>(PipelineControl::Continue)
  });

  p.on_step("narrow_price_range", |ctx: ContextData<CatalogQueryCtxData>| async move {
    let mut guard = ctx.write();
    let range = guard.query.price_range()?;
    if range != PriceRange::Unbounded {
      let before = guard.results.len();
      guard.results.retain(|item| range.contains(item.offer_price));
      debug!(before, after = guard.results.len(), "Results narrowed by offer price.");
    }
    Ok::<_, ShopError>(PipelineControl::Continue)
  });

  p
}

fn build_add_product_pipeline() -> Pipeline<AddProductCtxData> {
  let no_image: SkipCondition<AddProductCtxData> = Arc::new(|data: &AddProductCtxData| data.image.is_none());
  let mut p = Pipeline::<AddProductCtxData>::new(&[
    ("validate_product_fields", false, None),
    ("store_product_image", false, Some(no_image)),
    ("create_item", false, None),
  ]);

  p.on_step("validate_product_fields", |ctx: ContextData<AddProductCtxData>| async move {
    let mut guard = ctx.write();
    let validated = guard.product.validate()?;
    guard.validated = Some(validated);
    Ok::<_, ShopError>(PipelineControl::Continue)
  });

  p.on_step("store_product_image", |ctx: ContextData<AddProductCtxData>| async move {
    let (images, upload) = {
      let mut guard = ctx.write();
      (guard.images.clone(), guard.image.take())
    };
    let Some(upload) = upload else {
      return Ok(PipelineControl::Continue);
    };
    let original_name = upload.original_name.clone();
    let reference = images.store(upload).await?;
    info!(original_name = %original_name, reference = %reference, "Product image stored.");

    let mut guard = ctx.write();
    if let Some(validated) = guard.validated.as_mut() {
      validated.image_url = Some(reference);
    }
    Ok::<_, ShopError>(PipelineControl::Continue)
  });

  p.on_step("create_item", |ctx: ContextData<AddProductCtxData>| async move {
    let (items, new_item) = {
      let guard = ctx.read();
      (guard.items.clone(), guard.validated.clone())
    };
    let new_item =
      new_item.ok_or_else(|| ShopError::Internal("Product reached creation without validated fields.".to_string()))?;
    let created = items.create(new_item).await?;
    ctx.write().created = Some(created);
    Ok::<_, ShopError>(PipelineControl::Continue)
  });

  p
}

impl Catalog {
  pub fn new(items: Arc<dyn ItemStore>, images: Arc<dyn ImageStore>) -> Self {
    Self {
      items,
      images,
      query_pipeline: build_query_pipeline(),
      add_product_pipeline: build_add_product_pipeline(),
    }
  }

  /// Filtered, sorted, price-narrowed item list. Never paginated.
  #[instrument(
    name = "Catalog::query",
    skip_all,
    fields(
      search = ?query.search,
      categories = ?query.categories,
      lower_price = query.lower_price,
      higher_price = query.higher_price,
      sort_by = ?query.sort_by,
    ),
    err(Display)
  )]
  pub async fn query(&self, query: CatalogQuery) -> ShopResult<Vec<Item>> {
    let ctx_data = ContextData::new(CatalogQueryCtxData {
      items: self.items.clone(),
      query,
      filter: ItemFilter::default(),
      sort: ItemSort::default(),
      results: Vec::new(),
    });

    match self.query_pipeline.run(ctx_data.clone()).await? {
      PipelineResult::Completed => {
        let results = ctx_data.into_inner().results;
        info!(count = results.len(), "Catalog query completed.");
        Ok(results)
      }
      PipelineResult::Stopped => Err(ShopError::Internal("Catalog query was halted.".to_string())),
    }
  }

  #[instrument(name = "Catalog::find_item", skip(self), err(Display))]
  pub async fn find_item(&self, raw_id: &str) -> ShopResult<Item> {
    let id = parse_record_id(raw_id, "Item")?;
    match self.items.find_by_id(id).await? {
      Some(item) => Ok(item),
      None => {
        warn!(item_id = %id, "Item not found.");
        Err(ShopError::NotFound(format!("Item with ID {} not found.", id)))
      }
    }
  }

  /// Validates field presence, stores the optional image, then creates the item.
  #[instrument(
    name = "Catalog::add_item",
    skip_all,
    fields(product_name = ?product.product_name, has_image = image.is_some()),
    err(Display)
  )]
  pub async fn add_item(&self, product: NewProduct, image: Option<ImageUpload>) -> ShopResult<Item> {
    let ctx_data = ContextData::new(AddProductCtxData {
      items: self.items.clone(),
      images: self.images.clone(),
      product,
      image,
      validated: None,
      created: None,
    });

    match self.add_product_pipeline.run(ctx_data.clone()).await? {
      PipelineResult::Completed => {
        let created = ctx_data.into_inner().created;
        let item = created.ok_or_else(|| ShopError::Internal("Product pipeline completed without an item.".to_string()))?;
        info!(item_id = %item.id, "Product added to catalog.");
        Ok(item)
      }
      PipelineResult::Stopped => Err(ShopError::Internal("Product creation was halted.".to_string())),
    }
  }
}
