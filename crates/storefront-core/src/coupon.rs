//! # Coupon Validator
//!
//! Decides whether the selected coupon still holds for the current cart.
//!
//! ## Rules (first failure wins)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. code not in catalog (case-insensitive) → Invalid(CouponNotFound)    │
//! │  2. cart is empty                          → Invalid(EmptyCart)         │
//! │  3. coupon unusable as selected            → Invalid(InvalidCouponFor…) │
//! │     • percentage ≥ 100% or amount ≤ 0                                   │
//! │     • selection disagrees with the catalog entry of the same code       │
//! │  4. percentage coupon, subtotal < floor    → Advisory (still valid)     │
//! │  5. otherwise                              → Valid                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Invalid` means "clear the selection". The validator never substitutes a
//! different coupon. Callers re-run it after every cart mutation and every
//! selection change.

use std::fmt;

use serde::Serialize;
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::CartError;
use crate::money::Money;
use crate::policy::PricingPolicy;
use crate::types::{Coupon, CouponDiscount, BPS_PER_UNIT};

// =============================================================================
// Outcome
// =============================================================================

/// A non-blocking remark about a still-valid coupon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum CouponWarning {
    /// Percentage coupon on a subtotal below the store's floor.
    BelowMinimumSubtotal { subtotal: Money, minimum: Money },
}

impl CouponWarning {
    pub fn code(&self) -> &'static str {
        match self {
            CouponWarning::BelowMinimumSubtotal { .. } => "below_minimum_subtotal",
        }
    }
}

impl fmt::Display for CouponWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CouponWarning::BelowMinimumSubtotal { minimum, .. } => write!(
                f,
                "Percentage coupons are intended for purchases of {} or more",
                minimum
            ),
        }
    }
}

/// Result of validating the selected coupon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CouponValidation {
    /// Nothing selected; nothing to check.
    NoneSelected,
    Valid,
    /// Still valid, but the shell should surface the warning.
    Advisory { warning: CouponWarning },
    /// The selection must be cleared.
    Invalid { error: CartError },
}

impl CouponValidation {
    /// `true` for `Valid`, `Advisory` and `NoneSelected`.
    pub fn is_valid(&self) -> bool {
        !matches!(self, CouponValidation::Invalid { .. })
    }

    /// Whether the caller should drop the current selection.
    pub fn should_clear_selection(&self) -> bool {
        matches!(self, CouponValidation::Invalid { .. })
    }

    /// Machine-readable reason, if any.
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            CouponValidation::NoneSelected | CouponValidation::Valid => None,
            CouponValidation::Advisory { warning } => Some(warning.code()),
            CouponValidation::Invalid { error } => Some(error.code()),
        }
    }

    pub fn warning(&self) -> Option<&CouponWarning> {
        match self {
            CouponValidation::Advisory { warning } => Some(warning),
            _ => None,
        }
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Finds a coupon by code, case-insensitively.
pub fn find_coupon<'a>(code: &str, catalog: &'a [Coupon]) -> Option<&'a Coupon> {
    catalog.iter().find(|c| c.matches_code(code))
}

/// Checks the rules that depend only on the coupon itself and the cart:
/// non-empty cart, well-formed value.
///
/// [`crate::totals::calculate_total`] uses this to decide whether the coupon
/// takes part in the total.
pub fn check_applicable(coupon: &Coupon, cart: &Cart) -> Result<(), CartError> {
    if cart.is_empty() {
        return Err(CartError::EmptyCart);
    }

    match coupon.discount {
        CouponDiscount::Percentage { rate } if rate.bps() >= BPS_PER_UNIT => {
            Err(CartError::InvalidCouponForCart {
                code: coupon.code.clone(),
                reason: "percentage must be below 100%".to_string(),
            })
        }
        CouponDiscount::Amount { value } if !value.is_positive() => {
            Err(CartError::InvalidCouponForCart {
                code: coupon.code.clone(),
                reason: "amount must be positive".to_string(),
            })
        }
        _ => Ok(()),
    }
}

/// Validates the selected coupon against the current cart and catalog.
///
/// ## Example
/// ```rust
/// use storefront_core::*;
///
/// let catalog = vec![Coupon::amount("5000 off", "AMOUNT5000", Money::from_minor(5000))];
/// let cart = Cart::new();
///
/// let result = validate(Some(&catalog[0]), &cart, &catalog, &PricingPolicy::default());
/// assert_eq!(result.reason(), Some("empty_cart"));
/// assert!(result.should_clear_selection());
/// ```
pub fn validate(
    selected: Option<&Coupon>,
    cart: &Cart,
    catalog: &[Coupon],
    policy: &PricingPolicy,
) -> CouponValidation {
    let Some(selected) = selected else {
        return CouponValidation::NoneSelected;
    };

    let Some(listed) = find_coupon(&selected.code, catalog) else {
        return CouponValidation::Invalid {
            error: CartError::CouponNotFound {
                code: selected.code.clone(),
            },
        };
    };

    if let Err(error) = check_applicable(selected, cart) {
        return CouponValidation::Invalid { error };
    }

    if listed.discount != selected.discount {
        return CouponValidation::Invalid {
            error: CartError::InvalidCouponForCart {
                code: selected.code.clone(),
                reason: "coupon terms changed in the catalog".to_string(),
            },
        };
    }

    if selected.is_percentage() {
        let subtotal: Money = cart.items().iter().map(|i| i.line_subtotal()).sum();
        if subtotal < policy.percentage_coupon_min_subtotal {
            return CouponValidation::Advisory {
                warning: CouponWarning::BelowMinimumSubtotal {
                    subtotal,
                    minimum: policy.percentage_coupon_min_subtotal,
                },
            };
        }
    }

    CouponValidation::Valid
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DiscountRate, Product};

    fn catalog() -> Vec<Coupon> {
        vec![
            Coupon::amount("5000 off", "AMOUNT5000", Money::from_minor(5000)),
            Coupon::percentage("10% off", "PERCENT10", DiscountRate::from_bps(1000)),
        ]
    }

    fn cart_worth(price: i64, qty: i64) -> Cart {
        let product = Product::new("p1", "Widget", Money::from_minor(price), 100);
        let mut cart = Cart::new();
        cart.add_to_cart(&product).unwrap();
        cart.update_quantity("p1", qty).unwrap();
        cart
    }

    #[test]
    fn test_nothing_selected() {
        let result = validate(None, &Cart::new(), &catalog(), &PricingPolicy::default());
        assert_eq!(result, CouponValidation::NoneSelected);
        assert!(result.is_valid());
        assert!(result.reason().is_none());
    }

    #[test]
    fn test_not_found_wins_over_empty_cart() {
        let ghost = Coupon::amount("ghost", "GHOST", Money::from_minor(100));
        let result = validate(Some(&ghost), &Cart::new(), &catalog(), &PricingPolicy::default());
        assert_eq!(result.reason(), Some("coupon_not_found"));
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let mut selected = catalog()[0].clone();
        selected.code = "amount5000".to_string();
        let result = validate(
            Some(&selected),
            &cart_worth(10_000, 1),
            &catalog(),
            &PricingPolicy::default(),
        );
        assert_eq!(result, CouponValidation::Valid);
    }

    #[test]
    fn test_empty_cart_invalidates() {
        let coupons = catalog();
        let result = validate(Some(&coupons[0]), &Cart::new(), &coupons, &PricingPolicy::default());
        assert_eq!(
            result,
            CouponValidation::Invalid {
                error: CartError::EmptyCart
            }
        );
    }

    #[test]
    fn test_small_percentage_cart_is_advisory_not_invalid() {
        let coupons = catalog();
        let result = validate(
            Some(&coupons[1]),
            &cart_worth(3_000, 3),
            &coupons,
            &PricingPolicy::default(),
        );

        assert!(result.is_valid());
        assert!(!result.should_clear_selection());
        assert_eq!(result.reason(), Some("below_minimum_subtotal"));
        assert_eq!(
            result.warning(),
            Some(&CouponWarning::BelowMinimumSubtotal {
                subtotal: Money::from_minor(9_000),
                minimum: Money::from_minor(10_000),
            })
        );
    }

    #[test]
    fn test_percentage_at_floor_is_valid() {
        let coupons = catalog();
        let result = validate(
            Some(&coupons[1]),
            &cart_worth(1_000, 10),
            &coupons,
            &PricingPolicy::default(),
        );
        assert_eq!(result, CouponValidation::Valid);
    }

    #[test]
    fn test_amount_coupon_has_no_floor() {
        let coupons = catalog();
        let result = validate(
            Some(&coupons[0]),
            &cart_worth(100, 1),
            &coupons,
            &PricingPolicy::default(),
        );
        assert_eq!(result, CouponValidation::Valid);
    }

    #[test]
    fn test_malformed_percentage_is_invalid_for_cart() {
        let broken = Coupon::percentage("all free", "FREE", DiscountRate::from_bps(BPS_PER_UNIT));
        let coupons = vec![broken.clone()];
        let result = validate(
            Some(&broken),
            &cart_worth(1_000, 20),
            &coupons,
            &PricingPolicy::default(),
        );
        assert_eq!(result.reason(), Some("invalid_coupon_for_cart"));
    }

    #[test]
    fn test_stale_selection_is_invalid_for_cart() {
        let coupons = catalog();
        let stale = Coupon::amount("5000 off", "AMOUNT5000", Money::from_minor(9000));
        let result = validate(
            Some(&stale),
            &cart_worth(10_000, 1),
            &coupons,
            &PricingPolicy::default(),
        );
        assert!(matches!(
            result,
            CouponValidation::Invalid {
                error: CartError::InvalidCouponForCart { .. }
            }
        ));
    }

    #[test]
    fn test_becomes_invalid_when_cart_empties() {
        let coupons = catalog();
        let policy = PricingPolicy::default();
        let mut cart = cart_worth(10_000, 2);
        assert_eq!(validate(Some(&coupons[0]), &cart, &coupons, &policy), CouponValidation::Valid);

        cart.remove_from_cart("p1").unwrap();
        assert!(validate(Some(&coupons[0]), &cart, &coupons, &policy).should_clear_selection());
    }

    #[test]
    fn test_warning_message() {
        let warning = CouponWarning::BelowMinimumSubtotal {
            subtotal: Money::from_minor(9_000),
            minimum: Money::from_minor(10_000),
        };
        assert_eq!(
            warning.to_string(),
            "Percentage coupons are intended for purchases of 10,000 or more"
        );
    }
}
