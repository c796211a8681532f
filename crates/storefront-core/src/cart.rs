//! # Cart Mutation Engine
//!
//! The cart and every operation allowed to change it.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Machine                                   │
//! │                                                                         │
//! │  ┌──────────┐  add_to_cart  ┌────────────┐                              │
//! │  │  Empty   │──────────────►│ Populated  │◄──┐ add / update / remove    │
//! │  └──────────┘               └─────┬──────┘───┘                          │
//! │       ▲                           │                                     │
//! │       │        complete_order     │   (remove last item also → Empty)   │
//! │       └───────────────────────────┘                                     │
//! │                                                                         │
//! │  No "checking out" state: checkout is instantaneous for this engine.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Items are unique by product id (adding again increases quantity)
//! - Quantity is always ≥ 1; reaching 0 deletes the entry
//! - Quantity never exceeds the product's total stock
//!
//! Every operation returns a [`CartOutcome`] instead of panicking. A
//! failed operation leaves the cart exactly as it was.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CartError;
use crate::money::Money;
use crate::stock::remaining_stock;
use crate::types::Product;

/// Result of a cart mutation: a success message or an engine error.
pub type CartOutcome = Result<CartMessage, CartError>;

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the cart.
///
/// `product` is a frozen copy of the catalog entry at the time it was
/// added, so price and tiers stay stable while the customer shops. The
/// session layer re-snapshots it when an administrator edits the product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product: Product,

    pub quantity: i64,

    /// When this item was first added.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartItem {
            product: product.clone(),
            quantity,
            added_at: Utc::now(),
        }
    }

    #[inline]
    pub fn product_id(&self) -> &str {
        &self.product.id
    }

    /// Unit price × quantity, before any discount.
    pub fn line_subtotal(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart Message
// =============================================================================

/// Success branch of a cart mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum CartMessage {
    /// Product added or its quantity incremented by one.
    Added { product_id: String, quantity: i64 },
    /// Quantity set to a new positive value.
    QuantityUpdated { product_id: String, quantity: i64 },
    /// Entry deleted.
    Removed { product_id: String },
    /// Nothing to do (e.g. the product was not in the cart).
    Unchanged,
    /// Cart cleared at checkout.
    OrderCompleted { line_count: usize, total_quantity: i64 },
}

impl CartMessage {
    /// Stable machine-readable code for the shell.
    pub fn code(&self) -> &'static str {
        match self {
            CartMessage::Added { .. } => "added",
            CartMessage::QuantityUpdated { .. } => "quantity_updated",
            CartMessage::Removed { .. } => "removed",
            CartMessage::Unchanged => "unchanged",
            CartMessage::OrderCompleted { .. } => "order_completed",
        }
    }
}

impl fmt::Display for CartMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartMessage::Added { .. } => write!(f, "Added to cart"),
            CartMessage::QuantityUpdated { quantity, .. } => {
                write!(f, "Quantity updated to {}", quantity)
            }
            CartMessage::Removed { .. } => write!(f, "Removed from cart"),
            CartMessage::Unchanged => write!(f, "Cart unchanged"),
            CartMessage::OrderCompleted { .. } => write!(f, "Order completed"),
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The single active cart of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartItem>,

    /// When the cart was created or last cleared.
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn item(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product_id() == product_id)
    }

    /// Quantity of a product in the cart, 0 if absent.
    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.item(product_id).map_or(0, |i| i.quantity)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities across all lines (the header badge count).
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.items.iter().position(|i| i.product_id() == product_id)
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - No remaining stock: `OutOfStock`, cart unchanged
    /// - Already in cart: quantity + 1
    /// - Not in cart: appended with quantity 1
    ///
    /// `product` should be the current catalog entry so that the stock check
    /// sees the latest total stock.
    pub fn add_to_cart(&mut self, product: &Product) -> CartOutcome {
        if remaining_stock(product, self) <= 0 {
            return Err(CartError::OutOfStock {
                product_id: product.id.clone(),
                name: product.name.clone(),
            });
        }

        let quantity = match self.position(&product.id) {
            Some(idx) => {
                let item = &mut self.items[idx];
                item.quantity += 1;
                item.quantity
            }
            None => {
                self.items.push(CartItem::from_product(product, 1));
                1
            }
        };

        Ok(CartMessage::Added {
            product_id: product.id.clone(),
            quantity,
        })
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - Product not in cart: `Unchanged` (idempotent success)
    /// - `new_quantity <= 0`: same as [`Cart::remove_from_cart`]
    /// - `new_quantity` > total stock: `ExceedsStock`, previous quantity kept
    /// - Otherwise: quantity replaced
    pub fn update_quantity(&mut self, product_id: &str, new_quantity: i64) -> CartOutcome {
        let Some(idx) = self.position(product_id) else {
            return Ok(CartMessage::Unchanged);
        };

        if new_quantity <= 0 {
            return self.remove_from_cart(product_id);
        }

        let item = &mut self.items[idx];
        let available = item.product.stock.max(0);
        if new_quantity > available {
            return Err(CartError::ExceedsStock {
                product_id: product_id.to_string(),
                requested: new_quantity,
                available,
            });
        }

        item.quantity = new_quantity;
        Ok(CartMessage::QuantityUpdated {
            product_id: product_id.to_string(),
            quantity: new_quantity,
        })
    }

    /// Removes a line; `Unchanged` if it was not there.
    pub fn remove_from_cart(&mut self, product_id: &str) -> CartOutcome {
        match self.position(product_id) {
            Some(idx) => {
                self.items.remove(idx);
                Ok(CartMessage::Removed {
                    product_id: product_id.to_string(),
                })
            }
            None => Ok(CartMessage::Unchanged),
        }
    }

    /// Checkout: clears the cart.
    ///
    /// All-or-nothing and infallible, so it returns the message directly.
    /// Decrementing catalog stock is the caller's responsibility. Calling it
    /// on an empty cart reports zero lines.
    pub fn complete_order(&mut self) -> CartMessage {
        let line_count = self.items.len();
        let total_quantity = self.total_quantity();

        self.items.clear();
        self.created_at = Utc::now();

        CartMessage::OrderCompleted {
            line_count,
            total_quantity,
        }
    }

    /// Replaces the frozen snapshot of `product` with the given catalog
    /// entry, clamping the quantity to the new stock.
    ///
    /// Returns `true` if the product was in the cart. A line whose stock
    /// dropped to zero is removed.
    pub fn resnapshot(&mut self, product: &Product) -> bool {
        let Some(idx) = self.position(&product.id) else {
            return false;
        };

        let available = product.stock.max(0);
        if available == 0 {
            self.items.remove(idx);
            return true;
        }

        let item = &mut self.items[idx];
        item.product = product.clone();
        item.quantity = item.quantity.min(available);
        true
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DiscountRate, DiscountTier};

    fn test_product(id: &str, price: i64, stock: i64) -> Product {
        Product::new(id, format!("Product {}", id), Money::from_minor(price), stock)
    }

    #[test]
    fn test_add_appends_then_increments() {
        let mut cart = Cart::new();
        let product = test_product("1", 10_000, 20);

        assert_eq!(
            cart.add_to_cart(&product),
            Ok(CartMessage::Added {
                product_id: "1".to_string(),
                quantity: 1
            })
        );
        cart.add_to_cart(&product).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of("1"), 2);
    }

    #[test]
    fn test_add_out_of_stock_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        let product = test_product("1", 1000, 5);
        cart.add_to_cart(&product).unwrap();
        cart.update_quantity("1", 5).unwrap();

        let before = cart.clone();
        let err = cart.add_to_cart(&product).unwrap_err();

        assert_eq!(err.code(), "out_of_stock");
        assert_eq!(cart, before);
        assert_eq!(cart.quantity_of("1"), 5);
    }

    #[test]
    fn test_add_zero_stock_product() {
        let mut cart = Cart::new();
        let err = cart.add_to_cart(&test_product("1", 1000, 0)).unwrap_err();
        assert!(matches!(err, CartError::OutOfStock { .. }));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_absent_is_noop_success() {
        let mut cart = Cart::new();
        assert_eq!(cart.update_quantity("missing", 3), Ok(CartMessage::Unchanged));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_to_zero_removes() {
        let mut cart = Cart::new();
        cart.add_to_cart(&test_product("1", 1000, 5)).unwrap();

        let msg = cart.update_quantity("1", 0).unwrap();
        assert_eq!(msg.code(), "removed");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_negative_removes() {
        let mut cart = Cart::new();
        cart.add_to_cart(&test_product("1", 1000, 5)).unwrap();
        cart.update_quantity("1", -2).unwrap();
        assert!(cart.item("1").is_none());
    }

    #[test]
    fn test_update_beyond_stock_fails_without_clamping() {
        let mut cart = Cart::new();
        cart.add_to_cart(&test_product("1", 1000, 5)).unwrap();
        cart.update_quantity("1", 3).unwrap();

        let err = cart.update_quantity("1", 6).unwrap_err();
        assert_eq!(
            err,
            CartError::ExceedsStock {
                product_id: "1".to_string(),
                requested: 6,
                available: 5
            }
        );
        assert_eq!(cart.quantity_of("1"), 3);
    }

    #[test]
    fn test_update_to_exact_stock() {
        let mut cart = Cart::new();
        cart.add_to_cart(&test_product("1", 1000, 5)).unwrap();
        assert!(cart.update_quantity("1", 5).is_ok());
        assert_eq!(cart.quantity_of("1"), 5);
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.add_to_cart(&test_product("1", 1000, 5)).unwrap();
        cart.add_to_cart(&test_product("2", 2000, 5)).unwrap();

        assert_eq!(cart.remove_from_cart("1").unwrap().code(), "removed");
        assert_eq!(cart.remove_from_cart("1"), Ok(CartMessage::Unchanged));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].product_id(), "2");
    }

    #[test]
    fn test_complete_order_twice() {
        let mut cart = Cart::new();
        cart.add_to_cart(&test_product("1", 1000, 5)).unwrap();
        cart.add_to_cart(&test_product("1", 1000, 5)).unwrap();

        assert_eq!(
            cart.complete_order(),
            CartMessage::OrderCompleted {
                line_count: 1,
                total_quantity: 2
            }
        );
        assert!(cart.is_empty());

        assert_eq!(
            cart.complete_order(),
            CartMessage::OrderCompleted {
                line_count: 0,
                total_quantity: 0
            }
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_snapshot_is_frozen_at_add_time() {
        let mut cart = Cart::new();
        let mut product = test_product("1", 1000, 5);
        cart.add_to_cart(&product).unwrap();

        product.price = Money::from_minor(9999);
        cart.add_to_cart(&product).unwrap();

        assert_eq!(cart.item("1").unwrap().product.price.minor(), 1000);
        assert_eq!(cart.item("1").unwrap().line_subtotal().minor(), 2000);
    }

    #[test]
    fn test_resnapshot_clamps_quantity() {
        let mut cart = Cart::new();
        let product = test_product("1", 1000, 10);
        cart.add_to_cart(&product).unwrap();
        cart.update_quantity("1", 8).unwrap();

        let updated = test_product("1", 1200, 4)
            .with_discounts(vec![DiscountTier::new(2, DiscountRate::from_bps(500))]);
        assert!(cart.resnapshot(&updated));

        let item = cart.item("1").unwrap();
        assert_eq!(item.quantity, 4);
        assert_eq!(item.product.price.minor(), 1200);
        assert_eq!(item.product.discounts.len(), 1);
    }

    #[test]
    fn test_resnapshot_removes_sold_out_line() {
        let mut cart = Cart::new();
        cart.add_to_cart(&test_product("1", 1000, 10)).unwrap();

        assert!(cart.resnapshot(&test_product("1", 1000, 0)));
        assert!(cart.is_empty());
        assert!(!cart.resnapshot(&test_product("2", 1000, 3)));
    }

    #[test]
    fn test_total_quantity() {
        let mut cart = Cart::new();
        let a = test_product("1", 1000, 10);
        let b = test_product("2", 1000, 10);
        cart.add_to_cart(&a).unwrap();
        cart.add_to_cart(&a).unwrap();
        cart.add_to_cart(&b).unwrap();
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_message_display() {
        assert_eq!(CartMessage::Unchanged.to_string(), "Cart unchanged");
        let msg = CartMessage::QuantityUpdated {
            product_id: "1".to_string(),
            quantity: 4,
        };
        assert_eq!(msg.to_string(), "Quantity updated to 4");
    }
}
