// shopfront/src/catalog/query.rs

//! Catalog query parameters, as parsed from a raw query string.

use crate::error::{ShopError, ShopResult};
use crate::store::{ItemFilter, ItemSort};

/// The category label that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogQuery {
  /// Trimmed; `None` when absent or blank.
  pub search: Option<String>,
  /// Trimmed, non-empty labels. Empty means "no category filter".
  pub categories: Vec<String>,
  pub lower_price: f64,
  pub higher_price: f64,
  pub sort_by: Option<String>,
}

/// How the fetched items are narrowed by offer price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceRange {
  /// Both bounds were 0: keep everything.
  Unbounded,
  /// Inclusive on both ends.
  Between { lower: f64, higher: f64 },
}

impl PriceRange {
  pub fn contains(&self, offer_price: f64) -> bool {
    match *self {
      PriceRange::Unbounded => true,
      PriceRange::Between { lower, higher } => lower <= offer_price && offer_price <= higher,
    }
  }
}

impl CatalogQuery {
  /// Builds a query from decoded `key=value` pairs.
  ///
  /// Recognised keys are `search`, `category` (also `category[]`, repeatable,
  /// comma-separated values allowed), `lowerPrice`, `higherPrice` and `sortBy`.
  /// Unknown keys are ignored; a repeated scalar key keeps its last value.
  pub fn from_pairs<I, K, V>(pairs: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
  {
    let mut query = CatalogQuery::default();
    for (key, value) in pairs {
      let value = value.as_ref();
      match key.as_ref() {
        "search" => {
          let trimmed = value.trim();
          query.search = (!trimmed.is_empty()).then(|| trimmed.to_string());
        }
        "category" | "category[]" => query.categories.extend(
          value
            .split(',')
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(str::to_string),
        ),
        "lowerPrice" => query.lower_price = coerce_price(value),
        "higherPrice" => query.higher_price = coerce_price(value),
        "sortBy" => query.sort_by = Some(value.trim().to_string()),
        _ => {}
      }
    }
    query
  }

  pub fn filter(&self) -> ItemFilter {
    let search = self
      .search
      .as_deref()
      .map(str::trim)
      .filter(|s| !s.is_empty())
      .map(str::to_string);
    let categories = if self.categories.is_empty() || self.categories.iter().any(|c| c == ALL_CATEGORIES) {
      None
    } else {
      Some(self.categories.clone())
    };
    ItemFilter { search, categories }
  }

  pub fn sort(&self) -> ItemSort {
    ItemSort::from_param(self.sort_by.as_deref())
  }

  /// Both bounds 0 disables narrowing; a higher bound above the lower one
  /// narrows; anything else (e.g. only `lowerPrice` given) is rejected.
  pub fn price_range(&self) -> ShopResult<PriceRange> {
    let (lower, higher) = (self.lower_price, self.higher_price);
    if lower == 0.0 && higher == 0.0 {
      Ok(PriceRange::Unbounded)
    } else if higher > lower {
      Ok(PriceRange::Between { lower, higher })
    } else {
      Err(ShopError::Validation(format!(
        "Invalid price range: higherPrice ({}) must be greater than lowerPrice ({}).",
        higher, lower
      )))
    }
  }
}

/// Parses a price bound. Anything that is not a finite number becomes 0.
pub fn coerce_price(raw: &str) -> f64 {
  raw
    .trim()
    .parse::<f64>()
    .ok()
    .filter(|v| v.is_finite())
    .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn malformed_bounds_become_zero() {
    assert_eq!(coerce_price("abc"), 0.0);
    assert_eq!(coerce_price(""), 0.0);
    assert_eq!(coerce_price("NaN"), 0.0);
    assert_eq!(coerce_price("inf"), 0.0);
    assert_eq!(coerce_price(" 12.5 "), 12.5);
  }

  #[test]
  fn categories_accept_repeats_brackets_and_commas() {
    let query = CatalogQuery::from_pairs([
      ("category", "Shoes, Bags"),
      ("category[]", "Hats"),
      ("category", " "),
    ]);
    assert_eq!(query.categories, vec!["Shoes", "Bags", "Hats"]);
    assert_eq!(
      query.filter().categories,
      Some(vec!["Shoes".to_string(), "Bags".to_string(), "Hats".to_string()])
    );
  }

  #[test]
  fn all_sentinel_disables_category_filter() {
    let query = CatalogQuery::from_pairs([("category", "Shoes"), ("category", "all")]);
    assert_eq!(query.filter().categories, None);
  }

  #[test]
  fn blank_search_is_absent() {
    let query = CatalogQuery::from_pairs([("search", "   ")]);
    assert!(query.filter().is_empty());

    let query = CatalogQuery::from_pairs([("search", "  shoe ")]);
    assert_eq!(query.filter().search.as_deref(), Some("shoe"));
  }

  #[test]
  fn price_range_boundaries() {
    let range = |lo: f64, hi: f64| CatalogQuery {
      lower_price: lo,
      higher_price: hi,
      ..Default::default()
    }
    .price_range();

    assert_eq!(range(0.0, 0.0).unwrap(), PriceRange::Unbounded);
    assert_eq!(range(8.0, 15.0).unwrap(), PriceRange::Between { lower: 8.0, higher: 15.0 });
    assert_eq!(range(0.0, 20.0).unwrap(), PriceRange::Between { lower: 0.0, higher: 20.0 });
    assert!(matches!(range(10.0, 0.0), Err(ShopError::Validation(_))));
    assert!(matches!(range(10.0, 10.0), Err(ShopError::Validation(_))));
  }

  #[test]
  fn unknown_sort_falls_back_to_name() {
    assert_eq!(CatalogQuery::from_pairs([("sortBy", "price")]).sort(), ItemSort::ProductNameAscending);
    assert_eq!(CatalogQuery::from_pairs([("sortBy", "descending")]).sort(), ItemSort::OfferPriceDescending);
    assert_eq!(CatalogQuery::default().sort(), ItemSort::ProductNameAscending);
  }
}
