//! # Final Cart
//!
//! Immutable checkout snapshot produced by [`Cart::final_cart`](crate::Cart::final_cart).
//!
//! ## Snapshot Isolation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart (live, mutable)              FinalCart (frozen)                   │
//! │  ────────────────────              ──────────────────                   │
//! │  items: [Cornflakes x4]  ──copy──► items: [Cornflakes x4]               │
//! │  two_for_one: false      ──copy──► two_for_one: false                   │
//! │  total()                 ──calc──► total: 9.40                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  add_item(Cornflakes x2)           (unchanged: x4, 9.40)                │
//! │  items: [Cornflakes x6]                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialized Form
//! ```json
//! {"items":[{"productSKU":"123456789","productName":"Cornflakes",
//!   "shortDescription":"Big Box 400g","quantity":2,"itemPriceInCents":235,
//!   "linePrice":2.35}],"is2ForOne":true,"total":2.35}
//! ```

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::cart::CartView;
use crate::error::CoreResult;
use crate::item::CartItem;
use crate::money::serialize_decimal;

/// A frozen copy of a cart's lines, promotion flag and total.
#[derive(Debug, Clone, Serialize)]
pub struct FinalCart {
    items: Vec<CartItem>,

    #[serde(rename = "is2ForOne")]
    two_for_one: bool,

    #[serde(serialize_with = "serialize_decimal")]
    total: Decimal,
}

impl FinalCart {
    pub(crate) fn new(items: Vec<CartItem>, two_for_one: bool, total: Decimal) -> Self {
        FinalCart {
            items,
            two_for_one,
            total,
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Value of the promotion flag when the snapshot was taken.
    pub fn is_two_for_one(&self) -> bool {
        self.two_for_one
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Compact JSON in the checkout wire layout.
    pub fn as_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON, same fields and order as [`FinalCart::as_json`].
    pub fn as_json_pretty(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl CartView for FinalCart {
    fn items(&self) -> Vec<CartItem> {
        self.items.clone()
    }

    fn total(&self) -> Decimal {
        self.total
    }
}

/// `FinalCart(items=[CartItem(..), ..], is2ForOne=.., total=..)`
impl fmt::Display for FinalCart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FinalCart(items=[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "], is2ForOne={}, total={})", self.two_for_one, self.total)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CartRegistry;

    const CART_AS_JSON: &str = r#"{"items":[{"productSKU":"123456789","productName":"Cornflakes","shortDescription":"Big Box 400g","quantity":2,"itemPriceInCents":235,"linePrice":2.35}],"is2ForOne":true,"total":2.35}"#;

    const CART_TO_STRING: &str = "FinalCart(items=[CartItem(productSKU=123456789, productName=Cornflakes, shortDescription=Big Box 400g, quantity=2, itemPriceInCents=235)], is2ForOne=true, total=2.35)";

    fn cornflakes(quantity: u32) -> CartItem {
        CartItem::new("123456789", "Cornflakes", "Big Box 400g", quantity, 235)
    }

    #[test]
    fn test_string_helpers() {
        let registry = CartRegistry::new();
        let cart = registry.provide(1);
        cart.add_item(cornflakes(2));
        cart.set_two_for_one();

        let final_cart = cart.final_cart();
        assert_eq!(final_cart.to_string(), CART_TO_STRING);
        assert_eq!(final_cart.as_json().unwrap(), CART_AS_JSON);
    }

    #[test]
    fn test_total_keeps_scale_in_json() {
        let final_cart = FinalCart::new(vec![cornflakes(4)], false, Decimal::new(940, 2));
        let json = final_cart.as_json().unwrap();
        assert!(json.ends_with(r#""is2ForOne":false,"total":9.40}"#));
    }

    #[test]
    fn test_empty_snapshot() {
        let final_cart = FinalCart::new(Vec::new(), false, Decimal::new(0, 2));
        assert_eq!(
            final_cart.as_json().unwrap(),
            r#"{"items":[],"is2ForOne":false,"total":0.00}"#
        );
        assert_eq!(
            final_cart.to_string(),
            "FinalCart(items=[], is2ForOne=false, total=0.00)"
        );
    }

    #[test]
    fn test_pretty_json() {
        let final_cart = FinalCart::new(vec![cornflakes(2)], true, Decimal::new(235, 2));

        let expected = r#"{
  "items": [
    {
      "productSKU": "123456789",
      "productName": "Cornflakes",
      "shortDescription": "Big Box 400g",
      "quantity": 2,
      "itemPriceInCents": 235,
      "linePrice": 2.35
    }
  ],
  "is2ForOne": true,
  "total": 2.35
}"#;
        assert_eq!(final_cart.as_json_pretty().unwrap(), expected);
    }

    #[test]
    fn test_view_returns_copies() {
        let final_cart = FinalCart::new(vec![cornflakes(2)], false, Decimal::new(470, 2));
        let mut items = CartView::items(&final_cart);
        items.clear();
        assert_eq!(final_cart.items().len(), 1);
        assert_eq!(CartView::total(&final_cart).to_string(), "4.70");
    }
}
