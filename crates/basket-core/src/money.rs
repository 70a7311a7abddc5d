//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    2.35f32 * 2 = 4.69999980926513671875  ❌ WRONG!                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents, Decimal at the Edge                       │
//! │    235 cents * 2 = 470 cents                                            │
//! │    470 cents → Decimal 4.70 (scale 2, half-up)                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All arithmetic happens on `i64` cents. Only [`Money::to_decimal`] produces
//! a [`Decimal`], and only for totals and the serialized `linePrice`.
//!
//! ## Usage
//! ```rust
//! use basket_core::money::Money;
//!
//! let price = Money::from_cents(235); // $2.35
//! let line = price.multiply_quantity(2);
//! assert_eq!(line.cents(), 470);
//! assert_eq!(line.to_decimal().to_string(), "4.70");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Number of fractional digits in every rendered amount.
pub const CURRENCY_SCALE: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  CartItem.unit_price ──► line price (per promotion rule)                │
/// │                               │                                         │
/// │                               ▼                                         │
/// │                      Σ lines = Cart total (cents)                       │
/// │                               │                                         │
/// │                               ▼                                         │
/// │                      to_decimal() ──► FinalCart.total ("2.35")          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Converts to a major-unit decimal with two fractional digits.
    ///
    /// Rounds half-up (midpoint away from zero). With whole cents as input
    /// the rounding never changes the value, but it pins the scale to 2 so
    /// `470` renders as `4.70`, not `4.7`.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, CURRENCY_SCALE)
            .round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Human-readable dollars, for logs only.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            (self.0 / 100).abs(),
            (self.0 % 100).abs()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Saturating, so a cart total never wraps or panics.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// JSON Decimal Rendering
// =============================================================================

/// Serializes a decimal as a bare JSON number that keeps its scale.
///
/// `serde_json` would otherwise go through `f64` and print `9.4` for
/// `9.40`. The decimal's own `Display` is written verbatim instead.
#[derive(Debug, Clone, Copy)]
pub struct JsonDecimal(pub Decimal);

impl Serialize for JsonDecimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = RawValue::from_string(self.0.to_string()).map_err(S::Error::custom)?;
        raw.serialize(serializer)
    }
}

/// `serialize_with` adapter for [`Decimal`] fields.
pub(crate) fn serialize_decimal<S: Serializer>(
    value: &Decimal,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    JsonDecimal(*value).serialize(serializer)
}

// =============================================================================
// Unit Tests
// =============================================================================
