//! # Domain Types
//!
//! Catalog-side value types: products, their quantity tiers, and coupons.
//! Cart-side types live in [`crate::cart`], derived totals in
//! [`crate::totals`].
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  DiscountTier   │   │     Coupon      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  min_quantity   │   │  name           │       │
//! │  │  name           │──►│  rate (bps)     │   │  code (no case) │       │
//! │  │  price (Money)  │   └─────────────────┘   │  discount       │       │
//! │  │  stock          │                         └────────┬────────┘       │
//! │  │  discounts[]    │   ┌─────────────────┐            │                │
//! │  └─────────────────┘   │  DiscountRate   │   ┌────────▼────────┐       │
//! │                        │  ─────────────  │   │ CouponDiscount  │       │
//! │                        │  bps (u32)      │   │  Amount(Money)  │       │
//! │                        │  1000 = 10%     │   │  Percentage(r)  │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use crate::money::Money;

/// Basis points in 100%.
pub const BPS_PER_UNIT: u32 = 10_000;

// =============================================================================
// Discount Rate
// =============================================================================

/// A discount rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 1000 bps = 10%. The value is always within
/// `0..=10_000`; constructors clamp instead of failing so that malformed
/// catalog data degrades rather than crashes.
///
/// On the wire the rate travels as a fraction (`0.1`), matching what catalog
/// providers supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a rate from basis points, clamped to 100%.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        if bps > BPS_PER_UNIT {
            DiscountRate(BPS_PER_UNIT)
        } else {
            DiscountRate(bps)
        }
    }

    /// Creates a rate from a fraction (`0.1` = 10%).
    ///
    /// Rounds to the nearest basis point. NaN and negative values become
    /// zero, values at or above 1 become 100%.
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction.is_nan() || fraction <= 0.0 {
            return DiscountRate(0);
        }
        if fraction >= 1.0 {
            return DiscountRate(BPS_PER_UNIT);
        }
        DiscountRate::from_bps((fraction * BPS_PER_UNIT as f64).round() as u32)
    }

    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a fraction (for display and serialization only).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / BPS_PER_UNIT as f64
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// The share of the price that remains after this discount, in bps.
    #[inline]
    pub const fn remaining_bps(&self) -> u32 {
        BPS_PER_UNIT - self.0
    }

    /// Combines two rates multiplicatively: `1 - (1-a)(1-b)`.
    ///
    /// Summing would let two large rates exceed 100%; the product of the
    /// remaining shares cannot go below zero. The result is rounded to the
    /// nearest basis point, so use it for display, not for totals.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::DiscountRate;
    ///
    /// let tier = DiscountRate::from_bps(1000); // 10%
    /// let bulk = DiscountRate::from_bps(500);  // 5%
    /// assert_eq!(tier.combine(bulk).bps(), 1450); // 14.5%, not 15%
    /// ```
    pub fn combine(self, other: DiscountRate) -> DiscountRate {
        let remaining = u64::from(self.remaining_bps()) * u64::from(other.remaining_bps());
        let unit = u64::from(BPS_PER_UNIT);
        let remaining_bps = (remaining + unit / 2) / unit;
        DiscountRate::from_bps(BPS_PER_UNIT - remaining_bps as u32)
    }
}

impl From<f64> for DiscountRate {
    fn from(fraction: f64) -> Self {
        DiscountRate::from_fraction(fraction)
    }
}

impl Serialize for DiscountRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.fraction())
    }
}

impl<'de> Deserialize<'de> for DiscountRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(DiscountRate::from_fraction)
    }
}

// =============================================================================
// Discount Tier
// =============================================================================

/// A quantity threshold past which a discount rate applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountTier {
    /// Smallest line quantity that qualifies (≥ 1 in well-formed data).
    pub min_quantity: i64,

    pub rate: DiscountRate,
}

impl DiscountTier {
    pub fn new(min_quantity: i64, rate: DiscountRate) -> Self {
        DiscountTier { min_quantity, rate }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product offered in the catalog.
///
/// `discounts` should be sorted ascending by `min_quantity` with
/// non-decreasing rates. This is NOT enforced here; the discount calculator
/// tolerates violations (see [`crate::discount::line_discount_rate`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit price in the smallest currency unit.
    pub price: Money,

    /// Total stock on hand.
    pub stock: i64,

    /// Quantity discount tiers.
    #[serde(default)]
    pub discounts: Vec<DiscountTier>,

    /// Optional description, searched alongside the name.
    #[serde(default)]
    pub description: Option<String>,

    /// Flag the shell uses to badge a product as recommended.
    #[serde(default)]
    pub is_recommended: bool,
}

impl Product {
    /// Creates a product without discount tiers.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money, stock: i64) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            price,
            stock,
            discounts: Vec::new(),
            description: None,
            is_recommended: false,
        }
    }

    /// Builder-style setter for discount tiers.
    pub fn with_discounts(mut self, discounts: Vec<DiscountTier>) -> Self {
        self.discounts = discounts;
        self
    }

    /// Builder-style setter for the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// How a coupon reduces the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "discountType", rename_all = "snake_case")]
pub enum CouponDiscount {
    /// Flat deduction in the smallest currency unit.
    Amount { value: Money },
    /// Fractional deduction of the already item-discounted total.
    Percentage { rate: DiscountRate },
}

/// A coupon from the coupon catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Display name.
    pub name: String,

    /// Unique code, matched case-insensitively.
    pub code: String,

    pub discount: CouponDiscount,
}

impl Coupon {
    /// Creates a flat-amount coupon.
    pub fn amount(name: impl Into<String>, code: impl Into<String>, value: Money) -> Self {
        Coupon {
            name: name.into(),
            code: code.into(),
            discount: CouponDiscount::Amount { value },
        }
    }

    /// Creates a percentage coupon.
    pub fn percentage(
        name: impl Into<String>,
        code: impl Into<String>,
        rate: DiscountRate,
    ) -> Self {
        Coupon {
            name: name.into(),
            code: code.into(),
            discount: CouponDiscount::Percentage { rate },
        }
    }

    /// Case-insensitive code comparison, ignoring surrounding whitespace.
    pub fn matches_code(&self, code: &str) -> bool {
        self.code.trim().eq_ignore_ascii_case(code.trim())
    }

    pub fn is_percentage(&self) -> bool {
        matches!(self.discount, CouponDiscount::Percentage { .. })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
