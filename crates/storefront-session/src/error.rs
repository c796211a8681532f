//! # Session Error Types
//!
//! Errors raised by catalog administration and configuration loading.
//!
//! Cart outcomes are NOT errors of this layer: they stay `CartError` data
//! and are forwarded to the notification sink.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Session Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │    Catalog      │  │  Configuration  │  │       Input             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │ ProductNotFound │  │  ConfigLoad     │  │  Validation             │ │
//! │  │ CouponNotFound  │  │  InvalidConfig  │  │  CatalogParse           │ │
//! │  │ DuplicateCoupon │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_core::ValidationError;
use thiserror::Error;

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    // =========================================================================
    // Catalog Errors
    // =========================================================================
    /// No product with this id in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No coupon with this code in the coupon book.
    #[error("Coupon not found: {0}")]
    CouponNotFound(String),

    /// A coupon with the same code (case-insensitive) already exists.
    #[error("Coupon code already exists: {0}")]
    DuplicateCoupon(String),

    /// Admin input failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A JSON product catalog could not be parsed.
    #[error("Failed to parse catalog: {0}")]
    CatalogParse(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Config file could not be read or parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Config parsed but holds unusable values.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for SessionError {
    fn from(err: std::io::Error) -> Self {
        SessionError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for SessionError {
    fn from(err: toml::de::Error) -> Self {
        SessionError::ConfigLoadFailed(err.to_string())
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::CatalogParse(err.to_string())
    }
}

impl SessionError {
    /// Stable code used when the error is forwarded to the notification sink.
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::ProductNotFound(_) => "product_not_found",
            SessionError::CouponNotFound(_) => "coupon_not_found",
            SessionError::DuplicateCoupon(_) => "duplicate_coupon",
            SessionError::Validation(_) => "validation",
            SessionError::CatalogParse(_) => "catalog_parse",
            SessionError::ConfigLoadFailed(_) => "config_load_failed",
            SessionError::InvalidConfig(_) => "invalid_config",
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SessionError::ConfigLoadFailed(_) | SessionError::InvalidConfig(_)
        )
    }
}
