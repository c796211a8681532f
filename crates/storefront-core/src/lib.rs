//! # storefront-core: Pricing & Validation Engine
//!
//! The pure functions and invariant checks behind the storefront cart:
//! remaining stock, tier and bulk discounts, coupon eligibility, totals,
//! and the cart mutations that keep all of it consistent.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation shell (catalog / admin views)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain data in, plain results out       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        storefront-session (catalog, coupons, notifications)     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   cart ──► stock        coupon ──► totals ◄── discount          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO GLOBAL STATE • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, DiscountTier, DiscountRate, Coupon
//! - [`money`] - Integer money and the single rounding rule
//! - [`stock`] - Stock Resolver
//! - [`discount`] - Discount Calculator (tier + bulk)
//! - [`coupon`] - Coupon Validator
//! - [`totals`] - Cart Total Calculator
//! - [`cart`] - Cart Mutation Engine
//! - [`policy`] - Store-wide pricing knobs
//! - [`validation`] - Catalog input rules
//! - [`error`] - Engine error taxonomy
//!
//! ## Re-run Contract
//! After every cart mutation and every coupon selection change, callers run
//! [`coupon::validate`] and then [`totals::calculate_total`], in that order.
//! The engine has no listeners; the caller drives recomputation.
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::*;
//!
//! let product = Product::new("p1", "Widget", Money::from_minor(1000), 5);
//! let mut cart = Cart::new();
//!
//! for _ in 0..5 {
//!     cart.add_to_cart(&product).unwrap();
//! }
//! let err = cart.add_to_cart(&product).unwrap_err();
//! assert_eq!(err.code(), "out_of_stock");
//! assert_eq!(cart.quantity_of("p1"), 5);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod coupon;
pub mod discount;
pub mod error;
pub mod money;
pub mod policy;
pub mod stock;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem, CartMessage, CartOutcome};
pub use coupon::{check_applicable, find_coupon, validate, CouponValidation, CouponWarning};
pub use discount::{bulk_bonus_rate, effective_discount_rate, item_discount_rate, line_discount_rate};
pub use error::{CartError, ValidationError};
pub use money::Money;
pub use policy::PricingPolicy;
pub use stock::remaining_stock;
pub use totals::{calculate_total, Totals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Longest product or coupon name accepted by catalog administration.
pub const MAX_NAME_LEN: usize = 100;

/// Longest search query accepted.
pub const MAX_SEARCH_LEN: usize = 100;

/// Highest stock level accepted by catalog administration.
///
/// ## Business Reason
/// Catches typos such as an extra zero typed into the admin form.
pub const MAX_STOCK: i64 = 9_999;
