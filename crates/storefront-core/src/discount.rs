//! # Discount Calculator
//!
//! Per-line tier rates and the cart-wide bulk bonus.
//!
//! ## Combination Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  effective = 1 - (1 - line_rate) × (1 - bulk_rate)                      │
//! │                                                                         │
//! │  line 10%, bulk 5%   → 1 - 0.90 × 0.95 = 14.5%                          │
//! │  line 60%, bulk 60%  → 1 - 0.40 × 0.40 = 84%   (summing would be 120%) │
//! │                                                                         │
//! │  Rates are NEVER summed: the product of remaining shares stays ≥ 0.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::cart::{Cart, CartItem};
use crate::policy::PricingPolicy;
use crate::types::{DiscountRate, DiscountTier, BPS_PER_UNIT};

/// Rate of the richest tier `quantity` qualifies for.
///
/// Scans `tiers` in the order given and keeps the rate of the LAST tier
/// whose `min_quantity <= quantity`; 0 if none qualifies. For well-formed
/// (ascending) tiers that is the highest threshold met. Two tiers with the
/// same threshold resolve to the later one. Unsorted tiers never panic,
/// they just follow the same last-match rule.
///
/// A malformed tier (threshold below 1, or rate of 100% or more) never
/// qualifies, so the result always stays below 100%.
///
/// ## Example
/// ```rust
/// use storefront_core::{line_discount_rate, DiscountRate, DiscountTier};
///
/// let tiers = vec![
///     DiscountTier::new(10, DiscountRate::from_bps(1000)),
///     DiscountTier::new(20, DiscountRate::from_bps(2000)),
/// ];
/// assert_eq!(line_discount_rate(9, &tiers).bps(), 0);
/// assert_eq!(line_discount_rate(10, &tiers).bps(), 1000);
/// assert_eq!(line_discount_rate(25, &tiers).bps(), 2000);
/// ```
pub fn line_discount_rate(quantity: i64, tiers: &[DiscountTier]) -> DiscountRate {
    let mut rate = DiscountRate::zero();
    for tier in tiers {
        let malformed = tier.min_quantity < 1 || tier.rate.bps() >= BPS_PER_UNIT;
        if !malformed && tier.min_quantity <= quantity {
            rate = tier.rate;
        }
    }
    rate
}

/// Tier rate of a cart line, using the line's frozen product snapshot.
pub fn item_discount_rate(item: &CartItem) -> DiscountRate {
    line_discount_rate(item.quantity, &item.product.discounts)
}

/// Cart-wide bonus: `policy.bulk_bonus_rate` once any line reaches
/// `policy.bulk_threshold` units, otherwise 0.
pub fn bulk_bonus_rate(cart: &Cart, policy: &PricingPolicy) -> DiscountRate {
    let qualifies = cart
        .items()
        .iter()
        .any(|item| item.quantity >= policy.bulk_threshold);

    if qualifies {
        policy.bulk_bonus_rate
    } else {
        DiscountRate::zero()
    }
}

/// Effective rate of one line: its tier rate combined multiplicatively with
/// the cart's bulk bonus. Rounded to a basis point; for display.
pub fn effective_discount_rate(
    item: &CartItem,
    cart: &Cart,
    policy: &PricingPolicy,
) -> DiscountRate {
    item_discount_rate(item).combine(bulk_bonus_rate(cart, policy))
}
