//! # Cart Items
//!
//! A [`CartItem`] is one product line: SKU, display name, short description,
//! quantity and unit price. Items are values. Changing the quantity produces
//! a new item via [`CartItem::with_quantity`].
//!
//! ## Identity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartItem { sku: "123", qty: 2, price: 235 }                            │
//! │        ==                                                               │
//! │  CartItem { sku: "123", qty: 5, price: 199 }   ◄── same SKU, same line │
//! │                                                                         │
//! │  Equality and hashing look at the SKU only, so the cart can find the   │
//! │  existing line for an incoming item regardless of quantity or price.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

use rust_decimal::Decimal;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::error::{CoreResult, ValidationError};
use crate::money::{JsonDecimal, Money};
use crate::validation::{
    validate_description, validate_price_cents, validate_product_name, validate_quantity,
    validate_sku,
};
use crate::MAX_ITEM_QUANTITY;

/// One product line in a cart.
///
/// ## Serialized Form
/// ```json
/// {
///   "productSKU": "123456789",
///   "productName": "Cornflakes",
///   "shortDescription": "Big Box 400g",
///   "quantity": 2,
///   "itemPriceInCents": 235,
///   "linePrice": 2.35
/// }
/// ```
/// `linePrice` is the unit price in major units. It ignores the cart's
/// promotion flag.
#[derive(Debug, Clone)]
pub struct CartItem {
    sku: String,
    name: String,
    description: String,
    quantity: u32,
    unit_price: Money,
}

impl CartItem {
    /// Creates a cart item without validation.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::CartItem;
    ///
    /// let item = CartItem::new("123456789", "Cornflakes", "Big Box 400g", 2, 235);
    /// assert_eq!(item.line_total_cents(), 470);
    /// ```
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        quantity: u32,
        unit_price_cents: i64,
    ) -> Self {
        CartItem {
            sku: sku.into(),
            name: name.into(),
            description: description.into(),
            quantity,
            unit_price: Money::from_cents(unit_price_cents),
        }
    }

    /// Creates a cart item from raw, untrusted input.
    ///
    /// Failures come back as [`CoreError::Validation`](crate::CoreError::Validation).
    ///
    /// ## Rules
    /// - SKU, name and description per [`crate::validation`]
    /// - Quantity in `1..=MAX_ITEM_QUANTITY`
    /// - Unit price `>= 0`
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::CartItem;
    ///
    /// assert!(CartItem::try_new("123456789", "Cornflakes", "Big Box 400g", 2, 235).is_ok());
    /// assert!(CartItem::try_new("123456789", "Cornflakes", "Big Box 400g", 0, 235).is_err());
    /// ```
    pub fn try_new(
        sku: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        quantity: i64,
        unit_price_cents: i64,
    ) -> CoreResult<Self> {
        let sku = sku.into();
        let name = name.into();
        let description = description.into();

        validate_sku(&sku)?;
        validate_product_name(&name)?;
        validate_description(&description)?;
        validate_quantity(quantity)?;
        validate_price_cents(unit_price_cents)?;

        let quantity = u32::try_from(quantity).map_err(|_| ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        })?;

        Ok(CartItem::new(
            sku.trim(),
            name.trim(),
            description,
            quantity,
            unit_price_cents,
        ))
    }

    /// Stock keeping unit; the line's identity.
    pub fn sku(&self) -> &str {
        &self.sku
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Short description.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn unit_price_cents(&self) -> i64 {
        self.unit_price.cents()
    }

    /// Quantity times unit price, with no promotion applied.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// [`CartItem::line_total`] in cents.
    pub fn line_total_cents(&self) -> i64 {
        self.line_total().cents()
    }

    /// Unit price in major units, as rendered in `linePrice`.
    pub fn line_price(&self) -> Decimal {
        self.unit_price.to_decimal()
    }

    /// Returns a copy of this item with a different quantity.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::CartItem;
    ///
    /// let item = CartItem::new("123456789", "Cornflakes", "Big Box 400g", 2, 235);
    /// let more = item.with_quantity(5);
    /// assert_eq!(item.quantity(), 2);
    /// assert_eq!(more.quantity(), 5);
    /// ```
    pub fn with_quantity(&self, quantity: u32) -> Self {
        CartItem {
            quantity,
            ..self.clone()
        }
    }
}

impl PartialEq for CartItem {
    fn eq(&self, other: &Self) -> bool {
        self.sku == other.sku
    }
}

impl Eq for CartItem {}

impl Hash for CartItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sku.hash(state);
    }
}

/// `CartItem(productSKU=.., productName=.., shortDescription=.., quantity=.., itemPriceInCents=..)`
impl fmt::Display for CartItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CartItem(productSKU={}, productName={}, shortDescription={}, quantity={}, itemPriceInCents={})",
            self.sku,
            self.name,
            self.description,
            self.quantity,
            self.unit_price.cents()
        )
    }
}

impl Serialize for CartItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CartItem", 6)?;
        state.serialize_field("productSKU", &self.sku)?;
        state.serialize_field("productName", &self.name)?;
        state.serialize_field("shortDescription", &self.description)?;
        state.serialize_field("quantity", &self.quantity)?;
        state.serialize_field("itemPriceInCents", &self.unit_price.cents())?;
        state.serialize_field("linePrice", &JsonDecimal(self.line_price()))?;
        state.end()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
