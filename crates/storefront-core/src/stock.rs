//! # Stock Resolver
//!
//! Remaining purchasable quantity of a product, given what the in-flight
//! cart already holds.

use crate::cart::Cart;
use crate::types::Product;

/// Returns `product.stock - quantity already in cart`, floored at zero.
///
/// A cart holding more than the total stock (only possible with stale
/// snapshots) yields 0, never a negative number.
///
/// ## Example
/// ```rust
/// use storefront_core::{remaining_stock, Cart, Money, Product};
///
/// let product = Product::new("p1", "Widget", Money::from_minor(1000), 5);
/// let mut cart = Cart::new();
/// assert_eq!(remaining_stock(&product, &cart), 5);
///
/// cart.add_to_cart(&product).unwrap();
/// assert_eq!(remaining_stock(&product, &cart), 4);
/// ```
pub fn remaining_stock(product: &Product, cart: &Cart) -> i64 {
    let in_cart = cart.quantity_of(&product.id);
    product.stock.saturating_sub(in_cart).max(0)
}
