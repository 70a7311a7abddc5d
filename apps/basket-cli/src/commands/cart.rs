//! # Cart Commands
//!
//! Handlers that apply one command to one user's cart.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                         │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │  (FinalCart snapshot)   │
//! │  │  Cart    │     │          │     │ Record   │                         │
//! │  └──────────┘     └──────────┘     └──────────┘                         │
//! │       ▲                │                                                │
//! │       │           add / remove                                          │
//! │       │           setTwoForOne / clearTwoForOne                         │
//! │       │                │                                                │
//! │       └── clearAll ────┘  (next access builds a fresh cart)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use basket_core::{CartItem, CartRegistry, UserId};
use tracing::debug;

use super::Response;

/// Adds an item to the user's cart.
///
/// ## Behavior
/// - SKU already in cart: quantity increases
/// - SKU not in cart: appended as a new line
pub fn add_to_cart(registry: &CartRegistry, user: UserId, item: CartItem) -> Response {
    debug!(user, sku = %item.sku(), quantity = item.quantity(), "add command");
    Response::Count(registry.provide(user).add_item(item))
}

/// Removes a line by SKU. Unknown SKUs are not an error.
pub fn remove_from_cart(registry: &CartRegistry, user: UserId, sku: &str) -> Response {
    debug!(user, sku = %sku, "remove command");
    Response::Count(registry.provide(user).remove_sku(sku))
}

pub fn set_two_for_one(registry: &CartRegistry, user: UserId) -> Response {
    debug!(user, "setTwoForOne command");
    registry.provide(user).set_two_for_one();
    Response::Done
}

pub fn clear_two_for_one(registry: &CartRegistry, user: UserId) -> Response {
    debug!(user, "clearTwoForOne command");
    registry.provide(user).clear_two_for_one();
    Response::Done
}

/// Lists the user's lines in insertion order.
pub fn get_items(registry: &CartRegistry, user: UserId) -> Response {
    debug!(user, "items command");
    Response::Items(registry.provide(user).items())
}

/// Current total, promotion applied.
pub fn get_total(registry: &CartRegistry, user: UserId) -> Response {
    debug!(user, "total command");
    Response::Total(registry.provide(user).total())
}

/// Snapshots the user's cart as a checkout record.
///
/// The cart stays as it is; later commands don't affect the snapshot.
pub fn checkout(registry: &CartRegistry, user: UserId) -> Response {
    debug!(user, "checkout command");
    Response::Checkout(registry.provide(user).final_cart())
}

pub fn clear_all(registry: &CartRegistry) -> Response {
    debug!("clearAll command");
    registry.clear_all();
    Response::Done
}
