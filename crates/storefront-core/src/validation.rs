//! # Validation Module
//!
//! Input validation for catalog administration (new products, product
//! edits, new coupons).
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation shell                                           │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (admin input)                                    │
//! │  ├── Names, prices, stock, tiers, coupon codes                         │
//! │  └── Rejects bad data before it reaches the catalog                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Engine                                                       │
//! │  └── Tolerates whatever still slips through (clamps, never panics)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_coupon_code, validate_stock};
//!
//! validate_coupon_code("PERCENT10").unwrap();
//! assert!(validate_stock(-1).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{Coupon, CouponDiscount, DiscountTier, Product, BPS_PER_UNIT};
use crate::{MAX_NAME_LEN, MAX_SEARCH_LEN, MAX_STOCK};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (product or coupon).
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most `MAX_NAME_LEN` characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a coupon code.
///
/// ## Rules
/// - Must not be empty
/// - 4 to 12 characters
/// - ASCII letters and digits only (matching is case-insensitive)
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_coupon_code;
///
/// assert!(validate_coupon_code("AMOUNT5000").is_ok());
/// assert!(validate_coupon_code("").is_err());
/// assert!(validate_coupon_code("HAS SPACE").is_err());
/// ```
pub fn validate_coupon_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "coupon code".to_string(),
        });
    }

    if code.len() > 12 {
        return Err(ValidationError::TooLong {
            field: "coupon code".to_string(),
            max: 12,
        });
    }

    if code.len() < 4 || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidFormat {
            field: "coupon code".to_string(),
            reason: "must be 4-12 letters or digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a search query and returns it trimmed.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price. Zero is allowed (free items).
pub fn validate_price(units: i64) -> ValidationResult<()> {
    if units < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a stock level.
///
/// ## Rules
/// - Must be non-negative
/// - Must not exceed `MAX_STOCK`
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if !(0..=MAX_STOCK).contains(&stock) {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: MAX_STOCK,
        });
    }

    Ok(())
}

/// Validates a product's discount tiers.
///
/// ## Rules
/// - Every threshold ≥ 1
/// - Every rate below 100%
/// - Thresholds strictly increasing
///
/// Rates that decrease across tiers are allowed; the calculator handles
/// them.
pub fn validate_discount_tiers(tiers: &[DiscountTier]) -> ValidationResult<()> {
    for tier in tiers {
        if tier.min_quantity < 1 {
            return Err(ValidationError::MustBePositive {
                field: "discount quantity".to_string(),
            });
        }

        if tier.rate.bps() >= BPS_PER_UNIT {
            return Err(ValidationError::OutOfRange {
                field: "discount rate (bps)".to_string(),
                min: 0,
                max: i64::from(BPS_PER_UNIT) - 1,
            });
        }
    }

    if tiers.windows(2).any(|w| w[0].min_quantity >= w[1].min_quantity) {
        return Err(ValidationError::InvalidFormat {
            field: "discounts".to_string(),
            reason: "quantities must be strictly increasing".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates every field of a product.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_name("name", &product.name)?;
    validate_price(product.price.minor())?;
    validate_stock(product.stock)?;
    validate_discount_tiers(&product.discounts)?;
    Ok(())
}

/// Validates every field of a coupon.
///
/// ## Rules
/// - Amount coupons: value > 0
/// - Percentage coupons: 0 < rate < 100%
pub fn validate_coupon(coupon: &Coupon) -> ValidationResult<()> {
    validate_name("coupon name", &coupon.name)?;
    validate_coupon_code(&coupon.code)?;

    match coupon.discount {
        CouponDiscount::Amount { value } => {
            if !value.is_positive() {
                return Err(ValidationError::MustBePositive {
                    field: "coupon amount".to_string(),
                });
            }
        }
        CouponDiscount::Percentage { rate } => {
            if rate.is_zero() || rate.bps() >= BPS_PER_UNIT {
                return Err(ValidationError::OutOfRange {
                    field: "coupon rate (bps)".to_string(),
                    min: 1,
                    max: i64::from(BPS_PER_UNIT) - 1,
                });
            }
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::DiscountRate;

    fn tier(q: i64, bps: u32) -> DiscountTier {
        DiscountTier::new(q, DiscountRate::from_bps(bps))
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Widget").is_ok());
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", "   ").is_err());
        assert!(validate_name("name", &"A".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_coupon_code() {
        assert!(validate_coupon_code("AMOUNT5000").is_ok());
        assert!(validate_coupon_code("pct10").is_ok());

        assert!(validate_coupon_code("").is_err());
        assert!(validate_coupon_code("ABC").is_err());
        assert!(validate_coupon_code("HAS SPACE").is_err());
        assert!(validate_coupon_code("WAYTOOLONGCODE").is_err());
    }

    #[test]
    fn test_validate_price_and_stock() {
        assert!(validate_price(0).is_ok());
        assert!(validate_price(-1).is_err());

        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(MAX_STOCK).is_ok());
        assert!(validate_stock(-1).is_err());
        assert!(validate_stock(MAX_STOCK + 1).is_err());
    }

    #[test]
    fn test_validate_discount_tiers() {
        assert!(validate_discount_tiers(&[]).is_ok());
        assert!(validate_discount_tiers(&[tier(10, 1000), tier(20, 2000)]).is_ok());
        // Decreasing rates are tolerated.
        assert!(validate_discount_tiers(&[tier(10, 2000), tier(20, 1000)]).is_ok());

        assert!(validate_discount_tiers(&[tier(0, 1000)]).is_err());
        assert!(validate_discount_tiers(&[tier(10, 10_000)]).is_err());
        assert!(validate_discount_tiers(&[tier(20, 1000), tier(10, 2000)]).is_err());
        assert!(validate_discount_tiers(&[tier(10, 1000), tier(10, 2000)]).is_err());
    }

    #[test]
    fn test_validate_coupon() {
        let ok = Coupon::percentage("10% off", "PERCENT10", DiscountRate::from_bps(1000));
        assert!(validate_coupon(&ok).is_ok());

        let zero = Coupon::amount("nothing", "ZERO0", Money::zero());
        assert!(matches!(
            validate_coupon(&zero),
            Err(ValidationError::MustBePositive { .. })
        ));

        let full = Coupon::percentage("free", "FREE100", DiscountRate::from_bps(10_000));
        assert!(validate_coupon(&full).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  widget ").unwrap(), "widget");
        assert!(validate_search_query(&"x".repeat(MAX_SEARCH_LEN + 1)).is_err());
    }
}
