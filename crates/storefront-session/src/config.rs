//! # Store Configuration
//!
//! Configuration management for a storefront session.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_BULK_RATE=0.05                                          │
//! │     STOREFRONT_LOG_FILTER=debug                                        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     bulk bonus off, percentage coupon floor 10,000                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Hanghae Mart"
//! currency_symbol = "₩"
//!
//! [pricing]
//! bulk_threshold = 10
//! bulk_bonus_rate = 0.05
//! percentage_coupon_min_subtotal = 10000
//!
//! [logging]
//! filter = "info,storefront=debug"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use storefront_core::{DiscountRate, Money, PricingPolicy};
use tracing::{debug, info, warn};

use crate::error::{SessionError, SessionResult};

/// Default tracing filter when neither `RUST_LOG` nor config sets one.
pub const DEFAULT_LOG_FILTER: &str = "info,storefront=debug";

// =============================================================================
// Sections
// =============================================================================

/// Store identity shown by the shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub name: String,

    /// Currency symbol (display only; amounts are in the smallest unit).
    pub currency_symbol: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: "Storefront".to_string(),
            currency_symbol: "₩".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` wins over it.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

// =============================================================================
// Store Config
// =============================================================================

/// Complete session configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub pricing: PricingPolicy,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl StoreConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SessionResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading store config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns the default if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load store config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document (no env overrides, no validation).
    pub fn from_toml(contents: &str) -> SessionResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SessionResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(SessionError::InvalidConfig(
                "store.name must not be empty".into(),
            ));
        }

        self.pricing
            .validate()
            .map_err(|e| SessionError::InvalidConfig(format!("pricing: {}", e)))?;

        Ok(())
    }

    /// Applies `STOREFRONT_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an arbitrary key lookup. Unparseable values
    /// are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("STOREFRONT_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(symbol) = lookup("STOREFRONT_CURRENCY_SYMBOL") {
            self.store.currency_symbol = symbol;
        }

        if let Some(raw) = lookup("STOREFRONT_BULK_THRESHOLD") {
            match raw.parse::<i64>() {
                Ok(threshold) => {
                    debug!(threshold, "Overriding bulk threshold from environment");
                    self.pricing.bulk_threshold = threshold;
                }
                Err(_) => warn!(value = %raw, "Ignoring invalid STOREFRONT_BULK_THRESHOLD"),
            }
        }

        if let Some(raw) = lookup("STOREFRONT_BULK_RATE") {
            match raw.parse::<f64>() {
                Ok(rate) => {
                    debug!(rate, "Overriding bulk bonus rate from environment");
                    self.pricing.bulk_bonus_rate = DiscountRate::from_fraction(rate);
                }
                Err(_) => warn!(value = %raw, "Ignoring invalid STOREFRONT_BULK_RATE"),
            }
        }

        if let Some(raw) = lookup("STOREFRONT_PERCENT_COUPON_MIN_SUBTOTAL") {
            match raw.parse::<i64>() {
                Ok(units) => {
                    self.pricing.percentage_coupon_min_subtotal = Money::from_minor(units);
                }
                Err(_) => warn!(
                    value = %raw,
                    "Ignoring invalid STOREFRONT_PERCENT_COUPON_MIN_SUBTOTAL"
                ),
            }
        }

        if let Some(filter) = lookup("STOREFRONT_LOG_FILTER") {
            self.logging.filter = filter;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "cart")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = StoreConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.pricing.bulk_bonus_rate.is_zero());
        assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = StoreConfig::from_toml(
            r#"
            [pricing]
            bulk_bonus_rate = 0.05
            "#,
        )
        .unwrap();

        assert_eq!(config.pricing.bulk_bonus_rate.bps(), 500);
        assert_eq!(config.pricing.bulk_threshold, 10);
        assert_eq!(config.store, StoreSettings::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [store]
            name = "Hanghae Mart"

            [pricing]
            bulk_threshold = 5
            percentage_coupon_min_subtotal = 20000
            "#
        )
        .unwrap();

        let config = StoreConfig::load(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.store.name, "Hanghae Mart");
        assert_eq!(config.pricing.bulk_threshold, 5);
        assert_eq!(config.pricing.percentage_coupon_min_subtotal.minor(), 20_000);
    }

    #[test]
    fn test_load_rejects_invalid_pricing() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[pricing]\nbulk_threshold = 0").unwrap();

        let err = StoreConfig::load(Some(file.path().to_path_buf())).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[pricing\nbulk_threshold = ").unwrap();

        let err = StoreConfig::load(Some(file.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, SessionError::ConfigLoadFailed(_)));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not toml at all [").unwrap();

        let config = StoreConfig::load_or_default(Some(file.path().to_path_buf()));
        assert_eq!(config.store, StoreSettings::default());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("STOREFRONT_STORE_NAME", "Env Mart"),
            ("STOREFRONT_BULK_THRESHOLD", "20"),
            ("STOREFRONT_BULK_RATE", "0.07"),
            ("STOREFRONT_PERCENT_COUPON_MIN_SUBTOTAL", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = StoreConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.store.name, "Env Mart");
        assert_eq!(config.pricing.bulk_threshold, 20);
        assert_eq!(config.pricing.bulk_bonus_rate.bps(), 700);
        // Unparseable value ignored.
        assert_eq!(
            config.pricing.percentage_coupon_min_subtotal,
            PricingPolicy::default().percentage_coupon_min_subtotal
        );
    }
}
