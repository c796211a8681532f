//! # Money Module
//!
//! Provides the `Money` type for monetary values in the smallest currency
//! unit, and the single rounding rule the engine uses.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  10,000 × 0.9 × 0.95 in f64 = 8549.999999999999  ❌                     │
//! │                                                                         │
//! │  OUR SOLUTION: integer units + basis points                             │
//! │    10,000 × 9,000 × 9,500 = 855,000,000,000 (scale 10^8)               │
//! │    round_half_up(855,000,000,000, 10^8) = 8,550  ✅                     │
//! │                                                                         │
//! │  Intermediate values stay exact in i128; rounding happens ONCE.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_minor(1000);
//! let line = price.multiply_quantity(10);
//! assert_eq!(line.minor(), 10_000);
//! assert_eq!(line.to_string(), "10,000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (won, cents, ...).
///
/// ## Design Decisions
/// - **i64 (signed)**: discounts are computed as `subtotal - total`
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **No float constructor**: prices come from integer catalog data
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from the smallest currency unit.
    #[inline]
    pub const fn from_minor(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in the smallest currency unit.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity, saturating instead of
    /// overflowing on absurd inputs.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::from_minor(20_000);
    /// assert_eq!(unit_price.multiply_quantity(3).minor(), 60_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Rounding
// =============================================================================

/// Converts an exact scaled amount (`numerator / denominator` minor units)
/// into `Money`, rounding half-up (ties away from zero).
///
/// This is the ONLY place the engine rounds. Totals are accumulated at full
/// precision and passed through here once.
///
/// ## Example
/// ```rust
/// use storefront_core::money::round_half_up;
///
/// assert_eq!(round_half_up(85_495, 10).minor(), 8_550); // 8549.5 → 8550
/// assert_eq!(round_half_up(85_494, 10).minor(), 8_549); // 8549.4 → 8549
/// ```
pub fn round_half_up(numerator: i128, denominator: i128) -> Money {
    if denominator <= 0 {
        return Money::zero();
    }

    let half = denominator / 2;
    let rounded = if numerator >= 0 {
        (numerator + half) / denominator
    } else {
        -((-numerator + half) / denominator)
    };

    let clamped = i64::try_from(rounded).unwrap_or(if rounded < 0 { i64::MIN } else { i64::MAX });
    Money(clamped)
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Formats with thousands separators and no currency symbol; the symbol is
/// a presentation concern.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        if self.0 < 0 {
            write!(f, "-{}", grouped)
        } else {
            write!(f, "{}", grouped)
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
