//! # Commands Module
//!
//! The JSON-lines command protocol.
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  stdin line                                                             │
//! │  {"op":"add","user":1,"sku":"123456789","name":"Cornflakes",           │
//! │   "description":"Big Box 400g","quantity":2,"priceCents":235}          │
//! │         │                                                               │
//! │         │ serde_json::from_str::<Request>                               │
//! │         ▼                                                               │
//! │  execute(&registry, default_user, request)                              │
//! │         │                                                               │
//! │         │ registry.provide(user) ──► cart::add_to_cart                  │
//! │         ▼                                                               │
//! │  stdout line                                                            │
//! │  {"ok":true,"count":1}                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands that omit `user` act on the configured default user.

pub mod cart;

use basket_core::{CartItem, CartRegistry, FinalCart, JsonDecimal, UserId};
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ApiError;

/// One decoded input line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Request {
    /// Add an item (or more of a known SKU).
    Add {
        user: Option<UserId>,
        sku: String,
        name: String,
        #[serde(default)]
        description: String,
        #[serde(default = "default_quantity")]
        quantity: i64,
        #[serde(rename = "priceCents")]
        price_cents: i64,
    },

    /// Remove the line with this SKU.
    Remove { user: Option<UserId>, sku: String },

    SetTwoForOne { user: Option<UserId> },

    ClearTwoForOne { user: Option<UserId> },

    Items { user: Option<UserId> },

    Total { user: Option<UserId> },

    /// Snapshot the cart as a checkout record.
    Checkout { user: Option<UserId> },

    /// Forget every cart.
    ClearAll,
}

fn default_quantity() -> i64 {
    1
}

/// One output line.
///
/// Every response carries `"ok"`; successes add one payload field,
/// failures add `"error"`.
#[derive(Debug, Clone)]
pub enum Response {
    /// Distinct line count after add/remove
    Count(usize),
    Items(Vec<CartItem>),
    Total(Decimal),
    Checkout(FinalCart),
    Done,
    Failed(ApiError),
}

impl Response {
    pub fn is_ok(&self) -> bool {
        !matches!(self, Response::Failed(_))
    }
}

impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("ok", &self.is_ok())?;
        match self {
            Response::Count(count) => map.serialize_entry("count", count)?,
            Response::Items(items) => map.serialize_entry("items", items)?,
            Response::Total(total) => map.serialize_entry("total", &JsonDecimal(*total))?,
            Response::Checkout(final_cart) => map.serialize_entry("checkout", final_cart)?,
            Response::Done => {}
            Response::Failed(err) => map.serialize_entry("error", err)?,
        }
        map.end()
    }
}

/// Runs one request against the registry.
pub fn execute(
    registry: &CartRegistry,
    default_user: UserId,
    request: Request,
) -> Result<Response, ApiError> {
    let user = |u: Option<UserId>| u.unwrap_or(default_user);

    match request {
        Request::Add {
            user: u,
            sku,
            name,
            description,
            quantity,
            price_cents,
        } => {
            let item = CartItem::try_new(sku, name, description, quantity, price_cents)?;
            Ok(cart::add_to_cart(registry, user(u), item))
        }
        Request::Remove { user: u, sku } => Ok(cart::remove_from_cart(registry, user(u), &sku)),
        Request::SetTwoForOne { user: u } => Ok(cart::set_two_for_one(registry, user(u))),
        Request::ClearTwoForOne { user: u } => Ok(cart::clear_two_for_one(registry, user(u))),
        Request::Items { user: u } => Ok(cart::get_items(registry, user(u))),
        Request::Total { user: u } => Ok(cart::get_total(registry, user(u))),
        Request::Checkout { user: u } => Ok(cart::checkout(registry, user(u))),
        Request::ClearAll => Ok(cart::clear_all(registry)),
    }
}
