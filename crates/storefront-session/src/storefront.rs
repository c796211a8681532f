//! # Storefront Session
//!
//! One shopper, one cart. [`Storefront`] owns the catalog, the coupon book,
//! the cart and the coupon selection, and turns every engine outcome into a
//! notification.
//!
//! ## Refresh Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Every Shell Operation                               │
//! │                                                                         │
//! │  add / update / remove / complete / select / clear / admin edit         │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  engine outcome ──► sink (success or error)                             │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  refresh()                                                              │
//! │   1. coupon::validate                                                   │
//! │        ├── Invalid  ──► clear selection, error notification            │
//! │        ├── Advisory ──► warning, once per transition                   │
//! │        └── Valid / NoneSelected                                        │
//! │   2. totals::calculate_total                                            │
//! │   3. CartView back to the shell                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use storefront_session::{MemorySink, StoreConfig, Storefront};
//!
//! let mut store = Storefront::with_defaults(StoreConfig::default(), MemorySink::new());
//! let view = store.add_to_cart("p1");
//! assert_eq!(view.totals.total.minor(), 10_000);
//!
//! let order = store.complete_order();
//! assert!(order.starts_with("ORD-"));
//! assert!(store.cart().is_empty());
//! ```

use chrono::Utc;
use serde::Serialize;
use storefront_core::{
    calculate_total, check_applicable, effective_discount_rate, validate, Cart, CartError,
    CartItem, CartOutcome, Coupon, CouponValidation, CouponWarning, DiscountRate, PricingPolicy,
    Product, Totals,
};
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::catalog::{CouponBook, NewProduct, ProductCatalog, ProductUpdate};
use crate::config::StoreConfig;
use crate::error::{SessionError, SessionResult};
use crate::notify::{Notification, NotificationSink};

/// What the shell renders after each operation.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub totals: Totals,
    pub selected_coupon: Option<Coupon>,

    /// Present while the selected coupon is valid but below its floor.
    pub advisory: Option<CouponWarning>,
}

pub struct Storefront<S: NotificationSink> {
    config: StoreConfig,
    catalog: ProductCatalog,
    coupons: CouponBook,
    cart: Cart,
    selected_coupon: Option<Coupon>,

    /// Whether the last refresh ended in the advisory state.
    advisory_shown: bool,

    sink: S,
}

impl<S: NotificationSink> Storefront<S> {
    pub fn new(config: StoreConfig, catalog: ProductCatalog, coupons: CouponBook, sink: S) -> Self {
        Storefront {
            config,
            catalog,
            coupons,
            cart: Cart::new(),
            selected_coupon: None,
            advisory_shown: false,
            sink,
        }
    }

    /// Session over the seed catalog and coupon book.
    pub fn with_defaults(config: StoreConfig, sink: S) -> Self {
        Self::new(
            config,
            ProductCatalog::storefront_defaults(),
            CouponBook::storefront_defaults(),
            sink,
        )
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.config.pricing
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn coupons(&self) -> &CouponBook {
        &self.coupons
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn selected_coupon(&self) -> Option<&Coupon> {
        self.selected_coupon.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    // =========================================================================
    // Cart Operations
    // =========================================================================

    pub fn add_to_cart(&mut self, product_id: &str) -> CartView {
        match self.catalog.get(product_id) {
            Some(product) => {
                let outcome = self.cart.add_to_cart(product);
                self.forward(product_id, outcome);
            }
            None => {
                warn!(product_id, "Add rejected: unknown product");
                let err = SessionError::ProductNotFound(product_id.to_string());
                self.sink.notify(Notification::from(&err));
            }
        }
        self.refresh()
    }

    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> CartView {
        let outcome = self.cart.update_quantity(product_id, quantity);
        self.forward(product_id, outcome);
        self.refresh()
    }

    pub fn remove_from_cart(&mut self, product_id: &str) -> CartView {
        let outcome = self.cart.remove_from_cart(product_id);
        self.forward(product_id, outcome);
        self.refresh()
    }

    /// Empties the cart, drops the coupon selection and returns the order
    /// number (`ORD-<unix millis>`). Catalog stock is left as it is.
    pub fn complete_order(&mut self) -> String {
        let order_number = format!("ORD-{}", Utc::now().timestamp_millis());
        let message = self.cart.complete_order();

        info!(order = %order_number, "{}", message);
        self.sink.notify(Notification::success(
            message.code(),
            format!("{}. Order number: {}", message, order_number),
        ));

        self.selected_coupon = None;
        self.advisory_shown = false;
        self.refresh();
        order_number
    }

    /// Selects a coupon from the book by code (case-insensitive).
    ///
    /// A coupon that cannot apply to the current cart (empty cart, malformed
    /// value) is rejected with a single error notification and the previous
    /// selection is kept.
    pub fn select_coupon(&mut self, code: &str) -> CartView {
        let Some(coupon) = self.coupons.find(code).cloned() else {
            warn!(coupon = code, "Coupon selection rejected: not found");
            let err = CartError::CouponNotFound {
                code: code.to_string(),
            };
            self.sink.notify(Notification::from(&err));
            return self.refresh();
        };

        if let Err(err) = check_applicable(&coupon, &self.cart) {
            warn!(coupon = %coupon.code, code = err.code(), "Coupon selection rejected: {}", err);
            self.sink.notify(Notification::from(&err));
            return self.refresh();
        }

        debug!(coupon = %coupon.code, "Coupon selected");
        self.sink
            .notify(Notification::success("coupon_selected", "Coupon applied"));
        self.selected_coupon = Some(coupon);
        self.advisory_shown = false;
        self.refresh()
    }

    pub fn clear_coupon(&mut self) -> CartView {
        self.selected_coupon = None;
        self.advisory_shown = false;
        self.refresh()
    }

    /// Re-validates the coupon selection and recomputes totals.
    pub fn refresh(&mut self) -> CartView {
        let validation = validate(
            self.selected_coupon.as_ref(),
            &self.cart,
            self.coupons.coupons(),
            &self.config.pricing,
        );

        match &validation {
            CouponValidation::Invalid { error } => {
                warn!(code = error.code(), "Coupon selection cleared: {}", error);
                self.selected_coupon = None;
                self.advisory_shown = false;
                self.sink.notify(Notification::from(error));
            }
            CouponValidation::Advisory { warning } => {
                if !self.advisory_shown {
                    self.advisory_shown = true;
                    self.sink.notify(Notification::from(warning));
                }
            }
            CouponValidation::Valid | CouponValidation::NoneSelected => {
                self.advisory_shown = false;
            }
        }

        let totals = calculate_total(
            &self.cart,
            self.selected_coupon.as_ref(),
            &self.config.pricing,
        );
        debug!(
            subtotal = %totals.subtotal,
            total = %totals.total,
            coupon = totals.coupon_applied,
            "Cart refreshed"
        );

        CartView {
            items: self.cart.items().to_vec(),
            totals,
            selected_coupon: self.selected_coupon.clone(),
            advisory: validation.warning().cloned(),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Remaining purchasable quantity, or `None` for an unknown product.
    pub fn remaining_stock(&self, product_id: &str) -> Option<i64> {
        self.catalog
            .get(product_id)
            .map(|p| storefront_core::remaining_stock(p, &self.cart))
    }

    pub fn search_products(&self, term: &str) -> SessionResult<Vec<&Product>> {
        self.catalog.search(term)
    }

    /// Effective per-line rate (tier combined with bulk), or `None` if the
    /// product is not in the cart.
    pub fn item_discount_rate(&self, product_id: &str) -> Option<DiscountRate> {
        self.cart
            .item(product_id)
            .map(|item| effective_discount_rate(item, &self.cart, &self.config.pricing))
    }

    /// Units across all lines (header badge).
    pub fn total_item_count(&self) -> i64 {
        self.cart.total_quantity()
    }

    // =========================================================================
    // Catalog Administration
    // =========================================================================

    pub fn add_product(&mut self, input: NewProduct) -> SessionResult<Product> {
        let result = self.catalog.add_product(input);
        if let Ok(product) = &result {
            info!(product_id = %product.id, name = %product.name, "Product added");
        }
        self.report(result, |_| Notification::success("product_added", "Product added"))
    }

    /// Edits a product and re-snapshots its cart line, clamping the
    /// quantity to the new stock.
    pub fn update_product(&mut self, product_id: &str, update: ProductUpdate) -> SessionResult<Product> {
        let result = self.catalog.update_product(product_id, update);
        if let Ok(product) = &result {
            info!(product_id, "Product updated");
            if self.cart.resnapshot(product) {
                debug!(product_id, quantity = self.cart.quantity_of(product_id), "Cart line re-snapshotted");
            }
        }
        let result = self.report(result, |_| {
            Notification::success("product_updated", "Product updated")
        });
        self.refresh();
        result
    }

    /// Removes a product from the catalog. A cart line for it keeps its
    /// snapshot until the shopper removes it.
    pub fn delete_product(&mut self, product_id: &str) -> SessionResult<Product> {
        let result = self.catalog.delete_product(product_id);
        if result.is_ok() {
            info!(product_id, "Product deleted");
        }
        self.report(result, |_| Notification::success("product_deleted", "Product deleted"))
    }

    pub fn add_coupon(&mut self, coupon: Coupon) -> SessionResult<()> {
        let code = coupon.code.clone();
        let result = self.coupons.add_coupon(coupon);
        if result.is_ok() {
            info!(coupon = %code, "Coupon added");
        }
        self.report(result, |_| Notification::success("coupon_added", "Coupon added"))
    }

    /// Deletes a coupon. If it was selected, the next refresh clears it.
    pub fn delete_coupon(&mut self, code: &str) -> SessionResult<Coupon> {
        let result = self.coupons.delete_coupon(code);
        if result.is_ok() {
            info!(coupon = code, "Coupon deleted");
        }
        let result = self.report(result, |_| {
            Notification::success("coupon_deleted", "Coupon deleted")
        });
        self.refresh();
        result
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn forward(&mut self, product_id: &str, outcome: CartOutcome) {
        match outcome {
            Ok(message) => {
                debug!(product_id, quantity = self.cart.quantity_of(product_id), "{}", message);
                self.sink.notify(Notification::from(&message));
            }
            Err(error) => {
                warn!(product_id, code = error.code(), "Cart operation rejected: {}", error);
                self.sink.notify(Notification::from(&error));
            }
        }
    }

    fn report<T>(
        &mut self,
        result: SessionResult<T>,
        on_success: impl FnOnce(&T) -> Notification,
    ) -> SessionResult<T> {
        match &result {
            Ok(value) => self.sink.notify(on_success(value)),
            Err(error) => {
                warn!(code = error.code(), "Admin operation rejected: {}", error);
                self.sink.notify(Notification::from(error));
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{MemorySink, NotificationLevel};
    use storefront_core::{DiscountTier, Money};

    fn codes(store: &mut Storefront<MemorySink>) -> Vec<String> {
        store.sink_mut().drain().into_iter().map(|n| n.code).collect()
    }

    fn default_store() -> Storefront<MemorySink> {
        Storefront::with_defaults(StoreConfig::default(), MemorySink::new())
    }

    /// A cheap product so percentage coupons land below the floor.
    fn cheap_store() -> Storefront<MemorySink> {
        let catalog = ProductCatalog::new(vec![
            Product::new("gum", "Gum", Money::from_minor(1_000), 50),
            Product::new("w", "Widget", Money::from_minor(1_000), 20)
                .with_discounts(vec![DiscountTier::new(10, DiscountRate::from_fraction(0.1))]),
        ]);
        let coupons = CouponBook::new(vec![
            Coupon::percentage("5% off", "PCT5", DiscountRate::from_fraction(0.05)),
            Coupon::amount("500 off", "AMT500", Money::from_minor(500)),
        ]);
        Storefront::new(StoreConfig::default(), catalog, coupons, MemorySink::new())
    }

    #[test]
    fn test_add_unknown_product_notifies() {
        let mut store = default_store();
        let view = store.add_to_cart("nope");

        assert!(view.items.is_empty());
        let pending = store.sink().pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].level, NotificationLevel::Error);
        assert_eq!(pending[0].code, "product_not_found");
    }

    #[test]
    fn test_add_and_out_of_stock() {
        let catalog = ProductCatalog::new(vec![Product::new("p", "P", Money::from_minor(1_000), 2)]);
        let mut store = Storefront::new(
            StoreConfig::default(),
            catalog,
            CouponBook::default(),
            MemorySink::new(),
        );

        store.add_to_cart("p");
        store.add_to_cart("p");
        assert_eq!(store.remaining_stock("p"), Some(0));
        let view = store.add_to_cart("p");

        assert_eq!(view.items[0].quantity, 2);
        assert_eq!(codes(&mut store), vec!["added", "added", "out_of_stock"]);
    }

    #[test]
    fn test_tier_and_coupon_example() {
        let mut store = cheap_store();
        store.add_to_cart("w");
        store.update_quantity("w", 10);
        assert_eq!(store.item_discount_rate("w").unwrap().bps(), 1_000);

        let view = store.select_coupon("pct5");
        assert_eq!(view.totals.total.minor(), 8_550);
        assert!(view.advisory.is_none());
        assert_eq!(store.total_item_count(), 10);
    }

    #[test]
    fn test_advisory_once_per_transition() {
        let mut store = cheap_store();
        store.add_to_cart("gum");
        store.sink_mut().drain();

        // 1,000 < 10,000: advisory, but still applied.
        let view = store.select_coupon("PCT5");
        assert!(view.advisory.is_some());
        assert_eq!(view.totals.total.minor(), 950);
        assert_eq!(codes(&mut store), vec!["coupon_selected", "below_minimum_subtotal"]);

        // Still below: no repeat warning.
        let view = store.update_quantity("gum", 5);
        assert!(view.advisory.is_some());
        assert_eq!(codes(&mut store), vec!["quantity_updated"]);

        // Above the floor, then back below: warns again.
        store.update_quantity("gum", 10);
        assert_eq!(codes(&mut store), vec!["quantity_updated"]);
        store.update_quantity("gum", 9);
        assert_eq!(
            codes(&mut store),
            vec!["quantity_updated", "below_minimum_subtotal"]
        );
        assert!(store.selected_coupon().is_some());
    }

    #[test]
    fn test_emptying_cart_clears_coupon() {
        let mut store = cheap_store();
        store.add_to_cart("gum");
        store.select_coupon("AMT500");
        store.sink_mut().drain();

        let view = store.remove_from_cart("gum");
        assert!(view.selected_coupon.is_none());
        assert!(store.selected_coupon().is_none());
        assert_eq!(codes(&mut store), vec!["removed", "empty_cart"]);
        assert_eq!(view.totals, Totals::default());
    }

    #[test]
    fn test_select_unknown_coupon() {
        let mut store = cheap_store();
        store.add_to_cart("gum");
        store.sink_mut().drain();

        let view = store.select_coupon("NOPE");
        assert!(view.selected_coupon.is_none());
        assert_eq!(codes(&mut store), vec!["coupon_not_found"]);
    }

    #[test]
    fn test_select_on_empty_cart_reports_one_error() {
        let mut store = cheap_store();
        let view = store.select_coupon("AMT500");

        assert!(view.selected_coupon.is_none());
        let pending = store.sink_mut().drain();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].code, "empty_cart");
        assert_eq!(pending[0].level, NotificationLevel::Error);
    }

    #[test]
    fn test_rejected_selection_keeps_previous_coupon() {
        let mut store = cheap_store();
        store.add_to_cart("gum");
        store.select_coupon("AMT500");
        store.sink_mut().drain();

        // Malformed entry slipped into the book without admin validation.
        store.coupons = CouponBook::new(vec![
            Coupon::amount("500 off", "AMT500", Money::from_minor(500)),
            Coupon::amount("Broken", "BROKEN", Money::zero()),
        ]);
        let view = store.select_coupon("broken");

        assert_eq!(view.selected_coupon.unwrap().code, "AMT500");
        assert_eq!(codes(&mut store), vec!["invalid_coupon_for_cart"]);
    }

    #[test]
    fn test_complete_order() {
        let mut store = cheap_store();
        store.add_to_cart("gum");
        store.select_coupon("AMT500");
        store.sink_mut().drain();

        let order = store.complete_order();
        assert!(order.starts_with("ORD-"));
        assert!(store.cart().is_empty());
        assert!(store.selected_coupon().is_none());

        let pending = store.sink_mut().drain();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].code, "order_completed");
        assert!(pending[0].message.contains(&order));
    }

    #[test]
    fn test_update_product_resnapshots_cart() {
        let mut store = default_store();
        store.add_to_cart("p1");
        store.update_quantity("p1", 8);

        store
            .update_product(
                "p1",
                ProductUpdate {
                    price: Some(Money::from_minor(5_000)),
                    stock: Some(3),
                    ..ProductUpdate::default()
                },
            )
            .unwrap();

        let item = store.cart().item("p1").unwrap();
        assert_eq!(item.quantity, 3);
        assert_eq!(item.product.price.minor(), 5_000);
        assert_eq!(store.refresh().totals.total.minor(), 15_000);
    }

    #[test]
    fn test_admin_errors_are_notified() {
        let mut store = default_store();
        let err = store
            .add_coupon(Coupon::amount("dup", "amount5000", Money::from_minor(1)))
            .unwrap_err();

        assert!(matches!(err, SessionError::DuplicateCoupon(_)));
        assert_eq!(codes(&mut store), vec!["duplicate_coupon"]);
    }

    #[test]
    fn test_delete_selected_coupon_clears_selection() {
        let mut store = default_store();
        store.add_to_cart("p1");
        store.select_coupon("AMOUNT5000");
        store.sink_mut().drain();

        store.delete_coupon("AMOUNT5000").unwrap();
        assert!(store.selected_coupon().is_none());
        assert_eq!(codes(&mut store), vec!["coupon_deleted", "coupon_not_found"]);
    }

    #[test]
    fn test_queries() {
        let mut store = default_store();
        assert_eq!(store.remaining_stock("missing"), None);
        assert_eq!(store.item_discount_rate("p1"), None);

        store.add_to_cart("p2");
        assert_eq!(store.remaining_stock("p2"), Some(19));
        assert_eq!(store.search_products("product 2").unwrap().len(), 1);

        let added = store
            .add_product(NewProduct {
                name: "Lamp".into(),
                price: Money::from_minor(2_500),
                stock: 4,
                discounts: vec![],
                description: None,
                is_recommended: false,
            })
            .unwrap();
        assert_eq!(store.remaining_stock(&added.id), Some(4));
        store.delete_product(&added.id).unwrap();
        assert_eq!(store.remaining_stock(&added.id), None);
    }
}
