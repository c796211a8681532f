//! # Cart Total Calculator
//!
//! Composes tier discounts, the bulk bonus and the selected coupon into the
//! cart totals.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  for each line:                                                         │
//! │    line_subtotal = unit_price × quantity                 (exact)        │
//! │    line_total    = line_subtotal × (1-tier) × (1-bulk)   (scale 10^8)   │
//! │                                                                         │
//! │  subtotal           = Σ line_subtotal                                   │
//! │  after_item_discount = Σ line_total                                     │
//! │                                                                         │
//! │  coupon (if applicable to this cart):                                   │
//! │    amount     → max(0, after_item_discount - value)                     │
//! │    percentage → after_item_discount × (1 - rate)         (scale 10^12)  │
//! │                                                                         │
//! │  total          = round_half_up(...)   ← the ONLY rounding step         │
//! │  total_discount = subtotal - total                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pure: no mutation, no side effects. Calling it twice on the same input
//! yields identical totals.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::coupon::check_applicable;
use crate::discount::{bulk_bonus_rate, item_discount_rate};
use crate::money::{round_half_up, Money};
use crate::policy::PricingPolicy;
use crate::types::{Coupon, CouponDiscount, BPS_PER_UNIT};

const UNIT: i128 = BPS_PER_UNIT as i128;

/// Scale of a line total after tier and bulk rates.
const LINE_SCALE: i128 = UNIT * UNIT;

/// Scale after the coupon rate as well.
const TOTAL_SCALE: i128 = LINE_SCALE * UNIT;

/// Derived cart totals. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Sum of unit price × quantity, before any discount.
    pub subtotal: Money,

    /// After tier and bulk discounts, before the coupon.
    pub after_item_discount: Money,

    /// Final amount due, never negative.
    pub total: Money,

    /// `subtotal - total`.
    pub total_discount: Money,

    /// Lines whose effective rate is above zero.
    pub discounted_item_count: usize,

    /// Whether the selected coupon contributed to `total`.
    pub coupon_applied: bool,
}

/// Computes totals for `cart` with the currently selected coupon.
///
/// The coupon only takes part when it is applicable to this cart (cart not
/// empty, coupon value well-formed). Catalog membership is checked by
/// [`crate::coupon::validate`], which the caller runs first and which
/// clears invalid selections.
///
/// ## Example
/// ```rust
/// use storefront_core::*;
///
/// let product = Product::new("p1", "Widget", Money::from_minor(1000), 20)
///     .with_discounts(vec![DiscountTier::new(10, DiscountRate::from_fraction(0.1))]);
/// let mut cart = Cart::new();
/// cart.add_to_cart(&product).unwrap();
/// cart.update_quantity("p1", 10).unwrap();
///
/// let policy = PricingPolicy::default();
/// assert_eq!(calculate_total(&cart, None, &policy).total.minor(), 9_000);
///
/// let coupon = Coupon::percentage("5% off", "PCT5", DiscountRate::from_fraction(0.05));
/// assert_eq!(calculate_total(&cart, Some(&coupon), &policy).total.minor(), 8_550);
/// ```
pub fn calculate_total(
    cart: &Cart,
    selected_coupon: Option<&Coupon>,
    policy: &PricingPolicy,
) -> Totals {
    let bulk_remaining = i128::from(bulk_bonus_rate(cart, policy).remaining_bps());

    let mut subtotal = Money::zero();
    let mut after_items_scaled: i128 = 0;
    let mut discounted_item_count = 0;

    for item in cart.items() {
        let line_subtotal = item.line_subtotal();
        let remaining = i128::from(item_discount_rate(item).remaining_bps()) * bulk_remaining;

        subtotal += line_subtotal;
        after_items_scaled = after_items_scaled
            .saturating_add(i128::from(line_subtotal.minor()).saturating_mul(remaining));

        if remaining < LINE_SCALE {
            discounted_item_count += 1;
        }
    }

    let coupon = selected_coupon.filter(|c| check_applicable(c, cart).is_ok());

    let total_scaled = match coupon.map(|c| c.discount) {
        None => after_items_scaled.saturating_mul(UNIT),
        Some(CouponDiscount::Amount { value }) => after_items_scaled
            .saturating_mul(UNIT)
            .saturating_sub(i128::from(value.minor()).saturating_mul(TOTAL_SCALE)),
        Some(CouponDiscount::Percentage { rate }) => {
            after_items_scaled.saturating_mul(i128::from(rate.remaining_bps()))
        }
    };

    let total = round_half_up(total_scaled.max(0), TOTAL_SCALE);

    Totals {
        subtotal,
        after_item_discount: round_half_up(after_items_scaled.max(0), LINE_SCALE),
        total,
        total_discount: subtotal - total,
        discounted_item_count,
        coupon_applied: coupon.is_some(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
