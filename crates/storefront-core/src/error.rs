//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CartError        - Engine outcomes surfaced as data               │
//! │  └── ValidationError  - Catalog input validation failures              │
//! │                                                                         │
//! │  storefront-session errors (separate crate)                            │
//! │  └── SessionError     - Catalog admin + configuration failures         │
//! │                                                                         │
//! │  None of these are fatal. The shell decides whether to block the       │
//! │  action or merely notify.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every `CartError` has a stable `code()` plus a default message
//! 3. Errors are enum variants, never String

use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Cart Error
// =============================================================================

/// Engine error taxonomy.
///
/// Returned as the `Err` branch of [`crate::cart::CartOutcome`] and inside
/// [`crate::coupon::CouponValidation::Invalid`]. Never raised as a panic.
///
/// On the wire the reason code travels as `kind`; `code` is the coupon code
/// of the coupon variants.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CartError {
    /// No purchasable stock left once the cart's own quantity is counted.
    ///
    /// ## User Workflow
    /// ```text
    /// Product stock: 5, already in cart: 5
    ///      │
    ///      ▼
    /// add_to_cart(product)
    ///      │
    ///      ▼
    /// OutOfStock { product_id: "p1", .. }   (cart unchanged)
    /// ```
    #[error("{name} is out of stock")]
    OutOfStock { product_id: String, name: String },

    /// Requested quantity is larger than the product's total stock.
    /// The previous quantity is kept; no silent clamping.
    #[error("Only {available} of {product_id} in stock, requested {requested}")]
    ExceedsStock {
        product_id: String,
        requested: i64,
        available: i64,
    },

    /// Selected coupon code is not in the coupon catalog.
    #[error("Coupon {code} not found")]
    CouponNotFound { code: String },

    /// A coupon cannot apply to an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// The coupon exists but cannot be applied as selected.
    #[error("Coupon {code} cannot be applied: {reason}")]
    InvalidCouponForCart { code: String, reason: String },
}

impl CartError {
    /// Stable machine-readable reason code for the shell.
    pub fn code(&self) -> &'static str {
        match self {
            CartError::OutOfStock { .. } => "out_of_stock",
            CartError::ExceedsStock { .. } => "exceeds_stock",
            CartError::CouponNotFound { .. } => "coupon_not_found",
            CartError::EmptyCart => "empty_cart",
            CartError::InvalidCouponForCart { .. } => "invalid_coupon_for_cart",
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for catalog administration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., coupon code with spaces, unordered tiers).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate coupon code).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Unit Tests
// =============================================================================
