// shopfront/src/cart/quantity.rs

use serde_json::Value;

/// Quantity used when the request carries none, or one that is not a positive integer.
pub const DEFAULT_QUANTITY: i32 = 1;

/// Normalizes a requested add quantity.
///
/// Accepts JSON integers (including integral floats such as `2.0`) and
/// strings holding an integer. Zero, negatives, fractions, values beyond
/// `i32::MAX` and anything else fall back to [`DEFAULT_QUANTITY`].
pub fn normalize_quantity(raw: Option<&Value>) -> i32 {
  let parsed = match raw {
    Some(Value::Number(n)) => n
      .as_i64()
      .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && f.is_finite()).map(|f| f as i64)),
    Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
    _ => None,
  };

  parsed
    .filter(|q| *q >= 1)
    .and_then(|q| i32::try_from(q).ok())
    .unwrap_or(DEFAULT_QUANTITY)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn positive_integers_pass_through() {
    assert_eq!(normalize_quantity(Some(&json!(3))), 3);
    assert_eq!(normalize_quantity(Some(&json!("7"))), 7);
    assert_eq!(normalize_quantity(Some(&json!(" 12 "))), 12);
    assert_eq!(normalize_quantity(Some(&json!(2.0))), 2);
  }

  #[test]
  fn everything_else_becomes_one() {
    for raw in [
      json!(0),
      json!(-4),
      json!(2.5),
      json!("abc"),
      json!(""),
      json!(null),
      json!(true),
      json!([2]),
      json!(i64::from(i32::MAX) + 1),
    ] {
      assert_eq!(normalize_quantity(Some(&raw)), DEFAULT_QUANTITY, "input {}", raw);
    }
    assert_eq!(normalize_quantity(None), DEFAULT_QUANTITY);
  }
}
