//! # Cart Registry
//!
//! Maps a user id to exactly one [`Cart`].
//!
//! The registry is an ordinary value: build one at startup and pass it by
//! reference to whatever handles requests. Nothing here is global.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Registry                                        │
//! │                                                                         │
//! │   provide(1) ──┐                                                        │
//! │   provide(1) ──┼──► Mutex<HashMap<UserId, Arc<Cart>>> ──► same Arc     │
//! │   provide(1) ──┘        │                                               │
//! │                         │ first call for a user creates the cart       │
//! │                         ▼                                               │
//! │   clear_all() ──► map emptied; carts already handed out live on,       │
//! │                   the next provide() builds a fresh one                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::cart::Cart;

/// Identifies the owner of a cart.
pub type UserId = u64;

/// Process-wide lookup of carts by user.
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use basket_core::CartRegistry;
///
/// let registry = CartRegistry::new();
/// let a = registry.provide(42);
/// let b = registry.provide(42);
/// assert!(Arc::ptr_eq(&a, &b));
///
/// registry.clear_all();
/// assert!(!Arc::ptr_eq(&a, &registry.provide(42)));
/// ```
#[derive(Debug, Default)]
pub struct CartRegistry {
    carts: Mutex<HashMap<UserId, Arc<Cart>>>,
}

impl CartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<UserId, Arc<Cart>>> {
        self.carts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the user's cart, creating an empty one on first access.
    ///
    /// Lookup and insertion happen under one lock, so concurrent first
    /// calls for the same user all receive the same cart.
    pub fn provide(&self, user_id: UserId) -> Arc<Cart> {
        let mut carts = self.lock();
        let cart = carts.entry(user_id).or_insert_with(|| {
            debug!(user_id, "created cart");
            Arc::new(Cart::new(user_id))
        });
        Arc::clone(cart)
    }

    /// Returns the user's cart without creating one.
    pub fn get(&self, user_id: UserId) -> Option<Arc<Cart>> {
        self.lock().get(&user_id).cloned()
    }

    /// Forgets every cart.
    pub fn clear_all(&self) {
        let mut carts = self.lock();
        let dropped = carts.len();
        carts.clear();
        debug!(dropped, "cleared cart registry");
    }

    /// Number of users with a cart.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CartItem;
    use std::thread;

    const USER_ID: UserId = 1;

    fn cornflakes() -> CartItem {
        CartItem::new("123456789", "Cornflakes", "Big Box 400g", 1, 235)
    }

    #[test]
    fn test_single_cart_per_user() {
        let registry = CartRegistry::new();
        let cart = registry.provide(USER_ID);
        cart.add_item(cornflakes());

        let again = registry.provide(USER_ID);
        assert!(Arc::ptr_eq(&cart, &again));
        assert_eq!(again.items().len(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_users_are_separate() {
        let registry = CartRegistry::new();
        registry.provide(1).add_item(cornflakes());

        let other = registry.provide(2);
        assert!(other.is_empty());
        assert_eq!(other.user_id(), 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_clear_all_yields_fresh_cart() {
        let registry = CartRegistry::new();
        let old = registry.provide(USER_ID);
        old.add_item(cornflakes());

        registry.clear_all();
        assert!(registry.is_empty());

        let fresh = registry.provide(USER_ID);
        assert!(!Arc::ptr_eq(&old, &fresh));
        assert!(fresh.is_empty());
        // carts handed out before the clear keep working
        assert_eq!(old.item_count(), 1);
    }

    #[test]
    fn test_get_does_not_create() {
        let registry = CartRegistry::new();
        assert!(registry.get(USER_ID).is_none());
        assert!(registry.is_empty());

        let cart = registry.provide(USER_ID);
        let found = registry.get(USER_ID);
        assert!(found.is_some_and(|c| Arc::ptr_eq(&c, &cart)));
    }

    #[test]
    fn test_concurrent_first_access_creates_one_cart() {
        let registry = CartRegistry::new();

        let carts: Vec<Arc<Cart>> = thread::scope(|s| {
            let handles: Vec<_> = (0..16)
                .map(|_| s.spawn(|| registry.provide(USER_ID)))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("provide thread panicked"))
                .collect()
        });

        assert_eq!(registry.len(), 1);
        assert!(carts.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
