//! # Pricing Policy
//!
//! Store-wide constants the engine consults. Pure data: loading it from a
//! file or environment is the session crate's job.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{DiscountRate, BPS_PER_UNIT};

/// Default line quantity that triggers the cart-wide bulk bonus.
pub const DEFAULT_BULK_THRESHOLD: i64 = 10;

/// Default pre-discount subtotal below which a percentage coupon draws an
/// advisory warning.
pub const DEFAULT_PERCENT_COUPON_MIN_SUBTOTAL: i64 = 10_000;

/// Bulk bonus rate of the reference storefront preset (5%).
pub const STOREFRONT_BULK_BONUS_BPS: u32 = 500;

/// Pricing knobs shared by the discount calculator, coupon validator and
/// total calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct PricingPolicy {
    /// Any single line at or above this quantity earns the bulk bonus.
    pub bulk_threshold: i64,

    /// Cart-wide bonus combined multiplicatively with each line's tier rate.
    /// Zero disables the bonus.
    pub bulk_bonus_rate: DiscountRate,

    /// Advisory floor for percentage coupons, compared to the pre-discount
    /// subtotal.
    pub percentage_coupon_min_subtotal: Money,
}

impl PricingPolicy {
    /// Preset matching the reference storefront: 5% bulk bonus once any
    /// line reaches 10 units.
    pub fn storefront() -> Self {
        PricingPolicy {
            bulk_bonus_rate: DiscountRate::from_bps(STOREFRONT_BULK_BONUS_BPS),
            ..PricingPolicy::default()
        }
    }

    /// Checks that the policy cannot drive prices negative or never trigger.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.bulk_threshold < 1 {
            return Err(ValidationError::MustBePositive {
                field: "bulk_threshold".to_string(),
            });
        }

        if self.bulk_bonus_rate.bps() >= BPS_PER_UNIT {
            return Err(ValidationError::OutOfRange {
                field: "bulk_bonus_rate (bps)".to_string(),
                min: 0,
                max: i64::from(BPS_PER_UNIT) - 1,
            });
        }

        if self.percentage_coupon_min_subtotal.is_negative() {
            return Err(ValidationError::OutOfRange {
                field: "percentage_coupon_min_subtotal".to_string(),
                min: 0,
                max: i64::MAX,
            });
        }

        Ok(())
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy {
            bulk_threshold: DEFAULT_BULK_THRESHOLD,
            bulk_bonus_rate: DiscountRate::zero(),
            percentage_coupon_min_subtotal: Money::from_minor(DEFAULT_PERCENT_COUPON_MIN_SUBTOTAL),
        }
    }
}
