//! # basket-core: Pure Cart Logic for Basket
//!
//! In-memory, per-user shopping carts with a two-for-one promotion flag and
//! immutable checkout snapshots. No I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Basket Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                basket-cli (JSON-lines commands)                 │   │
//! │  │    add, remove, setTwoForOne, total, checkout, clearAll         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ basket-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ registry  │  │   cart    │  │final_cart │  │   item    │  │   │
//! │  │   │ user→Cart │  │ Mutex'd   │  │ snapshot  │  │ CartItem  │  │   │
//! │  │   │           │  │ items+flag│  │ + JSON    │  │ by SKU    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   money • validation • error                                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`registry`] - One [`Cart`] per user id, created lazily
//! - [`cart`] - The mutable cart and its pricing
//! - [`final_cart`] - Checkout snapshots and their serialized form
//! - [`item`] - Line items, identified by SKU
//! - [`money`] - Integer cents, decimal only at the edge
//! - [`validation`] - Rules for building items from raw input
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use basket_core::{CartItem, CartRegistry};
//!
//! let registry = CartRegistry::new();
//! let cart = registry.provide(1);
//!
//! cart.add_item(CartItem::new("123456789", "Cornflakes", "Big Box 400g", 2, 235));
//! cart.set_two_for_one();
//!
//! let checkout = cart.final_cart();
//! assert_eq!(checkout.total().to_string(), "2.35");
//! assert!(checkout.as_json().unwrap().ends_with(r#""is2ForOne":true,"total":2.35}"#));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod final_cart;
pub mod item;
pub mod money;
pub mod registry;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartMutation, CartView};
pub use error::{CoreError, CoreResult, ValidationError};
pub use final_cart::FinalCart;
pub use item::CartItem;
pub use money::{JsonDecimal, Money};
pub use registry::{CartRegistry, UserId};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity accepted by [`CartItem::try_new`].
///
/// ## Business Reason
/// Catches typos like 1000 instead of 10. Merged lines may exceed it; the
/// cart itself doesn't cap quantities.
pub const MAX_ITEM_QUANTITY: i64 = 999;
