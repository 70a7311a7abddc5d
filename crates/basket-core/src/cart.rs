//! # Cart
//!
//! The mutable, per-user cart and its pricing rules.
//!
//! ## Thread Safety
//! Every read or write of the item list goes through one `Mutex` per cart:
//! 1. Concurrent requests for the same user may share one `Arc<Cart>`
//! 2. Two adds for the same SKU must never produce duplicate lines
//! 3. A checkout snapshot must see items, flag and total from one state
//!
//! The promotion flag lives behind the same lock, so a snapshot can never
//! pair a flag value with an item list it didn't coexist with.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operation            Locked State Change                               │
//! │  ─────────            ───────────────────                               │
//! │                                                                         │
//! │  add_item(new SKU) ──► items.push(item)                                 │
//! │  add_item(known SKU) ► items[i] = items[i].with_quantity(old + new)     │
//! │  remove_item / _sku ─► items.remove(i)            (no-op if missing)    │
//! │  set/clear_two_for_one ► two_for_one = true/false (idempotent)          │
//! │  items() ────────────► clone of items             (never a live alias)  │
//! │  total() ────────────► Σ line prices → Decimal    (read only)           │
//! │  final_cart() ───────► FinalCart { items, flag, total } from one lock   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::final_cart::FinalCart;
use crate::item::CartItem;
use crate::money::Money;
use crate::registry::UserId;

// =============================================================================
// Cart Traits
// =============================================================================

/// Read access shared by live carts and checkout snapshots.
pub trait CartView {
    /// Independent copy of the line items, in insertion order.
    fn items(&self) -> Vec<CartItem>;

    /// Cart total in major units, two fractional digits.
    fn total(&self) -> Decimal;
}

/// Mutating cart operations.
///
/// Methods take `&self`; implementations synchronize internally so a cart
/// can be shared across threads behind an `Arc`.
pub trait CartMutation {
    /// Adds an item, merging quantities with an existing line of the same
    /// SKU. Returns the number of distinct lines.
    fn add_item(&self, item: CartItem) -> usize;

    /// Removes the line with the item's SKU. Returns the number of lines.
    fn remove_item(&self, item: &CartItem) -> usize;

    /// Removes the line with the given SKU. Returns the number of lines.
    fn remove_sku(&self, sku: &str) -> usize;

    fn set_two_for_one(&self);

    fn clear_two_for_one(&self);

    /// Immutable snapshot for checkout.
    fn final_cart(&self) -> FinalCart;
}

// =============================================================================
// Pricing
// =============================================================================

/// Price of one line under the current promotion flag.
///
/// With the promotion on, the quantity is split into pairs and an odd
/// remainder, and both parts are charged at the full unit price. The
/// result therefore equals the undiscounted line total.
// TODO: charge each pair at one unit price once product confirms the
// intended two-for-one discount.
fn line_price(item: &CartItem, two_for_one: bool) -> Money {
    if !two_for_one {
        return item.line_total();
    }

    let pairs = item.quantity() / 2;
    let remainder = item.quantity() % 2;
    item.unit_price().multiply_quantity(pairs) + item.unit_price().multiply_quantity(remainder)
}

// =============================================================================
// Cart State
// =============================================================================

/// Everything the cart lock guards.
#[derive(Debug, Default)]
struct CartState {
    items: Vec<CartItem>,
    two_for_one: bool,
}

impl CartState {
    fn position(&self, sku: &str) -> Option<usize> {
        self.items.iter().position(|i| i.sku() == sku)
    }

    fn remove(&mut self, sku: &str) -> usize {
        if let Some(index) = self.position(sku) {
            self.items.remove(index);
        }
        self.items.len()
    }

    fn total(&self) -> Decimal {
        let cents: Money = self
            .items
            .iter()
            .map(|i| line_price(i, self.two_for_one))
            .sum();
        trace!(total = %cents, two_for_one = self.two_for_one, "cart total computed");
        cents.to_decimal()
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A user's shopping cart.
///
/// ## Invariants
/// - Items are unique by SKU (adding a known SKU merges quantities)
/// - First-seen SKU order is preserved; merged lines keep their position
/// - Callers only ever get copies of the item list
///
/// Carts are created by [`CartRegistry::provide`](crate::CartRegistry::provide).
///
/// ## Example
/// ```rust
/// use basket_core::{CartItem, CartRegistry};
///
/// let registry = CartRegistry::new();
/// let cart = registry.provide(1);
///
/// cart.add_item(CartItem::new("123456789", "Cornflakes", "Big Box 400g", 2, 235));
/// cart.add_item(CartItem::new("123456789", "Cornflakes", "Big Box 400g", 2, 235));
///
/// assert_eq!(cart.item_count(), 1);
/// assert_eq!(cart.total().to_string(), "9.40");
/// ```
#[derive(Debug)]
pub struct Cart {
    user_id: UserId,
    state: Mutex<CartState>,
}

impl Cart {
    pub(crate) fn new(user_id: UserId) -> Self {
        Cart {
            user_id,
            state: Mutex::new(CartState::default()),
        }
    }

    /// Cart operations never panic while holding the lock, so a poisoned
    /// lock still guards a consistent item list.
    fn lock(&self) -> MutexGuard<'_, CartState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns a copy of the line items.
    pub fn items(&self) -> Vec<CartItem> {
        self.lock().items.clone()
    }

    /// Returns a copy of the line with the given SKU, if any.
    pub fn get_item(&self, sku: &str) -> Option<CartItem> {
        self.lock().items.iter().find(|i| i.sku() == sku).cloned()
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    pub fn is_two_for_one(&self) -> bool {
        self.lock().two_for_one
    }

    /// Adds an item or increases the quantity of its existing line.
    ///
    /// ## Behavior
    /// - SKU not in cart: item appended at the end
    /// - SKU in cart: line replaced in place by a copy whose quantity is
    ///   the sum of both quantities, capped at `u32::MAX`
    ///
    /// ## Returns
    /// Number of distinct lines after the add.
    pub fn add_item(&self, item: CartItem) -> usize {
        let mut state = self.lock();

        match state.position(item.sku()) {
            Some(index) => {
                let merged = {
                    let existing = &state.items[index];
                    existing.with_quantity(existing.quantity().saturating_add(item.quantity()))
                };
                debug!(
                    user_id = self.user_id,
                    sku = %merged.sku(),
                    quantity = merged.quantity(),
                    "merged cart line"
                );
                state.items[index] = merged;
            }
            None => {
                debug!(
                    user_id = self.user_id,
                    sku = %item.sku(),
                    quantity = item.quantity(),
                    "added cart line"
                );
                state.items.push(item);
            }
        }

        state.items.len()
    }

    /// Removes the line matching the item's SKU. Missing SKUs are a no-op.
    pub fn remove_item(&self, item: &CartItem) -> usize {
        self.remove_sku(item.sku())
    }

    /// Removes the line with the given SKU. Missing SKUs are a no-op.
    pub fn remove_sku(&self, sku: &str) -> usize {
        let count = self.lock().remove(sku);
        debug!(user_id = self.user_id, sku = %sku, count, "removed cart line");
        count
    }

    /// Turns the two-for-one promotion on. Idempotent.
    pub fn set_two_for_one(&self) {
        self.set_flag(true);
    }

    /// Turns the two-for-one promotion off. Idempotent.
    pub fn clear_two_for_one(&self) {
        self.set_flag(false);
    }

    fn set_flag(&self, on: bool) {
        let mut state = self.lock();
        if state.two_for_one != on {
            state.two_for_one = on;
            debug!(user_id = self.user_id, two_for_one = on, "promotion toggled");
        }
    }

    /// Current total, rounded half-up to two fractional digits.
    pub fn total(&self) -> Decimal {
        self.lock().total()
    }

    /// Snapshots the cart for checkout.
    ///
    /// Items, flag and total are all read under a single lock
    /// acquisition. The snapshot shares nothing with the cart.
    pub fn final_cart(&self) -> FinalCart {
        let state = self.lock();
        let snapshot = FinalCart::new(state.items.clone(), state.two_for_one, state.total());
        debug!(
            user_id = self.user_id,
            lines = state.items.len(),
            total = %snapshot.total(),
            "cart finalized"
        );
        snapshot
    }
}

impl CartView for Cart {
    fn items(&self) -> Vec<CartItem> {
        Cart::items(self)
    }

    fn total(&self) -> Decimal {
        Cart::total(self)
    }
}

impl CartMutation for Cart {
    fn add_item(&self, item: CartItem) -> usize {
        Cart::add_item(self, item)
    }

    fn remove_item(&self, item: &CartItem) -> usize {
        Cart::remove_item(self, item)
    }

    fn remove_sku(&self, sku: &str) -> usize {
        Cart::remove_sku(self, sku)
    }

    fn set_two_for_one(&self) {
        Cart::set_two_for_one(self);
    }

    fn clear_two_for_one(&self) {
        Cart::clear_two_for_one(self);
    }

    fn final_cart(&self) -> FinalCart {
        Cart::final_cart(self)
    }
}

/// `Cart(items=[..], userId=.., isTwoForOne=..)`
impl fmt::Display for Cart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        write!(f, "Cart(items=[")?;
        for (i, item) in state.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(
            f,
            "], userId={}, isTwoForOne={})",
            self.user_id, state.two_for_one
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    const USER_ID: UserId = 1;

    fn item(quantity: u32, name: &str, sku: &str) -> CartItem {
        CartItem::new(sku, name, "Big Box 400g", quantity, 235)
    }

    fn cornflakes(quantity: u32) -> CartItem {
        item(quantity, "Cornflakes", "123456789")
    }

    fn coco_pops(quantity: u32) -> CartItem {
        item(quantity, "Coco pops", "234567890")
    }

    #[test]
    fn test_add_item_returns_line_count() {
        let cart = Cart::new(USER_ID);
        assert_eq!(cart.add_item(cornflakes(1)), 1);
        assert_eq!(cart.add_item(coco_pops(1)), 2);
    }

    #[test]
    fn test_add_same_sku_merges_quantity() {
        let cart = Cart::new(USER_ID);
        cart.add_item(cornflakes(1));
        cart.add_item(cornflakes(1));
        let count = cart.add_item(cornflakes(1));

        assert_eq!(count, 1);
        assert_eq!(cart.items()[0].quantity(), 3);
    }

    #[test]
    fn test_merge_saturates_quantity() {
        let cart = Cart::new(USER_ID);
        cart.add_item(CartItem::new("A", "Huge", "", u32::MAX, 1));
        assert_eq!(cart.add_item(CartItem::new("A", "Huge", "", 1, 1)), 1);

        assert_eq!(cart.items()[0].quantity(), u32::MAX);
        assert!(!cart.state.is_poisoned());
        assert_eq!(cart.total(), Money::from_cents(u32::MAX as i64).to_decimal());
    }

    #[test]
    fn test_total_saturates_on_huge_lines() {
        let cart = Cart::new(USER_ID);
        cart.add_item(CartItem::new("A", "Gold", "", 4, i64::MAX / 2));
        cart.add_item(CartItem::new("B", "Gold", "", 1, i64::MAX));

        let expected = Money::from_cents(i64::MAX).to_decimal();
        assert_eq!(cart.total(), expected);
        assert_eq!(cart.final_cart().total(), expected);

        cart.set_two_for_one();
        assert_eq!(cart.total(), expected);
    }

    #[test]
    fn test_merge_keeps_line_position() {
        let cart = Cart::new(USER_ID);
        cart.add_item(cornflakes(2));
        cart.add_item(coco_pops(1));
        cart.add_item(cornflakes(2));

        let items = cart.items();
        assert_eq!(items.first().map(CartItem::sku), Some("123456789"));
        assert_eq!(items.first().map(CartItem::quantity), Some(4));
        assert_eq!(items.last().map(CartItem::sku), Some("234567890"));
    }

    #[test]
    fn test_list_contents() {
        let cart = Cart::new(USER_ID);
        let added = cornflakes(1);
        cart.add_item(added.clone());
        assert_eq!(cart.items().first(), Some(&added));
    }

    #[test]
    fn test_remove_item() {
        let cart = Cart::new(USER_ID);
        let added = cornflakes(1);
        cart.add_item(added.clone());
        assert_eq!(cart.remove_item(&added), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_item_by_sku() {
        let cart = Cart::new(USER_ID);
        cart.add_item(cornflakes(1));
        assert_eq!(cart.remove_sku("123456789"), 0);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let cart = Cart::new(USER_ID);
        cart.add_item(cornflakes(1));
        assert_eq!(cart.remove_sku("nope"), 1);
        assert_eq!(cart.remove_item(&coco_pops(3)), 1);
    }

    #[test]
    fn test_items_returns_copy() {
        let cart = Cart::new(USER_ID);
        cart.add_item(cornflakes(2));

        let mut items = cart.items();
        items.clear();
        items.push(coco_pops(9));

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items()[0].sku(), "123456789");
    }

    #[test]
    fn test_get_item() {
        let cart = Cart::new(USER_ID);
        cart.add_item(cornflakes(2));
        assert_eq!(cart.get_item("123456789").map(|i| i.quantity()), Some(2));
        assert!(cart.get_item("234567890").is_none());
    }

    #[test]
    fn test_apply_two_for_one() {
        let cart = Cart::new(USER_ID);
        cart.add_item(cornflakes(2));
        cart.set_two_for_one();
        assert_eq!(cart.items()[0].quantity(), 2);
        assert_eq!(cart.total().to_string(), "2.35");
    }

    #[test]
    fn test_apply_two_for_one_all_eligible_items() {
        let cart = Cart::new(USER_ID);
        cart.add_item(cornflakes(2));
        cart.add_item(coco_pops(1));
        cart.set_two_for_one();

        let items = cart.items();
        assert_eq!(items.first().map(CartItem::quantity), Some(2));
        assert_eq!(items.last().map(CartItem::quantity), Some(1));
        assert_eq!(cart.total().to_string(), "4.70");
    }

    #[test]
    fn test_apply_two_for_one_three_items() {
        let cart = Cart::new(USER_ID);
        cart.add_item(cornflakes(3));
        cart.set_two_for_one();
        assert_eq!(cart.items()[0].quantity(), 3);
        assert_eq!(cart.total().to_string(), "4.70");
    }

    #[test]
    fn test_clear_two_for_one_keeps_quantities() {
        let cart = Cart::new(USER_ID);
        cart.add_item(cornflakes(2));
        cart.add_item(coco_pops(1));
        cart.set_two_for_one();
        cart.clear_two_for_one();

        assert!(!cart.is_two_for_one());
        let items = cart.items();
        assert_eq!(items.first().map(CartItem::quantity), Some(2));
        assert_eq!(items.last().map(CartItem::quantity), Some(1));
    }

    #[test]
    fn test_set_two_for_one_is_idempotent() {
        let cart = Cart::new(USER_ID);
        cart.add_item(cornflakes(2));
        cart.set_two_for_one();
        cart.set_two_for_one();
        assert!(cart.is_two_for_one());
        assert_eq!(cart.total().to_string(), "2.35");
    }

    #[test]
    fn test_clear_two_for_one_is_idempotent() {
        let cart = Cart::new(USER_ID);
        cart.add_item(cornflakes(1));
        cart.set_two_for_one();
        cart.clear_two_for_one();
        cart.clear_two_for_one();
        assert!(!cart.is_two_for_one());
        assert_eq!(cart.total().to_string(), "2.35");
    }

    #[test]
    fn test_calculate_total() {
        let cart = Cart::new(USER_ID);
        cart.add_item(cornflakes(2));
        cart.add_item(cornflakes(2));
        assert_eq!(cart.total().to_string(), "9.40");
    }

    #[test]
    fn test_empty_total() {
        let cart = Cart::new(USER_ID);
        assert_eq!(cart.total().to_string(), "0.00");
    }

    #[test]
    fn test_line_price_formula() {
        let odd = cornflakes(5);
        assert_eq!(line_price(&odd, false).cents(), 1175);
        // 2 pairs + 1 remainder, each at full unit price
        assert_eq!(line_price(&odd, true).cents(), 705);
    }

    #[test]
    fn test_final_cart_is_isolated() {
        let cart = Cart::new(USER_ID);
        cart.add_item(cornflakes(2));
        cart.add_item(cornflakes(2));

        let final_cart = cart.final_cart();

        cart.add_item(cornflakes(2));
        cart.set_two_for_one();

        assert_eq!(final_cart.total().to_string(), "9.40");
        assert_eq!(final_cart.items()[0].quantity(), 4);
        assert!(!final_cart.is_two_for_one());
        assert_eq!(cart.items()[0].quantity(), 6);
    }

    #[test]
    fn test_display() {
        let cart = Cart::new(7);
        cart.add_item(cornflakes(2));
        assert_eq!(
            cart.to_string(),
            "Cart(items=[CartItem(productSKU=123456789, productName=Cornflakes, shortDescription=Big Box 400g, quantity=2, itemPriceInCents=235)], userId=7, isTwoForOne=false)"
        );
    }

    #[test]
    fn test_trait_objects() {
        let cart = Cart::new(USER_ID);
        let mutation: &dyn CartMutation = &cart;
        mutation.add_item(cornflakes(2));
        mutation.set_two_for_one();

        let view: &dyn CartView = &cart;
        assert_eq!(view.items().len(), 1);
        assert_eq!(view.total().to_string(), "2.35");
    }

    #[test]
    fn test_concurrent_adds_never_duplicate_lines() {
        let cart = Arc::new(Cart::new(USER_ID));

        thread::scope(|s| {
            for _ in 0..8 {
                let cart = Arc::clone(&cart);
                s.spawn(move || {
                    for _ in 0..50 {
                        cart.add_item(cornflakes(1));
                        cart.add_item(coco_pops(1));
                    }
                });
            }
        });

        let items = cart.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items.iter().map(CartItem::quantity).sum::<u32>(), 800);
        assert_eq!(cart.total().to_string(), "1880.00");
    }

    #[test]
    fn test_snapshot_is_consistent_under_contention() {
        let cart = Arc::new(Cart::new(USER_ID));

        thread::scope(|s| {
            let writer = Arc::clone(&cart);
            s.spawn(move || {
                for i in 0..200 {
                    writer.add_item(cornflakes(1));
                    if i % 2 == 0 {
                        writer.set_two_for_one();
                    } else {
                        writer.clear_two_for_one();
                    }
                }
            });

            for _ in 0..200 {
                let snapshot = cart.final_cart();
                let cents: i64 = snapshot.items().iter().map(CartItem::line_total_cents).sum();
                assert_eq!(snapshot.total(), Money::from_cents(cents).to_decimal());
            }
        });
    }
}
