//! # storefront-session: Single-Session Orchestration
//!
//! Wraps the pure engine in `storefront-core` with the state one shopper's
//! session needs: a product catalog, a coupon book, the cart, the coupon
//! selection, store configuration and a notification sink.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     storefront-session                                  │
//! │                                                                         │
//! │  ┌──────────────┐   ┌──────────────┐   ┌────────────────────────────┐  │
//! │  │   config     │   │   catalog    │   │          notify            │  │
//! │  │ StoreConfig  │   │ProductCatalog│   │ NotificationSink           │  │
//! │  │ TOML + env   │   │ CouponBook   │   │ MemorySink / TracingSink   │  │
//! │  └──────┬───────┘   └──────┬───────┘   └─────────────▲──────────────┘  │
//! │         │                  │                         │                  │
//! │         └─────────┬────────┘                         │                  │
//! │                   ▼                                  │                  │
//! │           ┌───────────────┐     outcomes             │                  │
//! │           │  Storefront   │──────────────────────────┘                  │
//! │           │  refresh()    │                                             │
//! │           └───────┬───────┘                                             │
//! │                   ▼                                                     │
//! │            storefront-core                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//! ```rust,no_run
//! use storefront_session::{init_tracing, StoreConfig, Storefront, TracingSink};
//!
//! let config = StoreConfig::load_or_default(None);
//! init_tracing(&config.logging.filter);
//!
//! let mut store = Storefront::with_defaults(config, TracingSink);
//! store.add_to_cart("p1");
//! store.select_coupon("PERCENT10");
//! let view = store.refresh();
//! println!("total: {}", view.totals.total);
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod notify;
pub mod storefront;
pub mod telemetry;

pub use catalog::{CouponBook, NewProduct, ProductCatalog, ProductUpdate};
pub use config::{LoggingSettings, StoreConfig, StoreSettings};
pub use error::{SessionError, SessionResult};
pub use notify::{MemorySink, Notification, NotificationLevel, NotificationSink, TracingSink};
pub use storefront::{CartView, Storefront};
pub use telemetry::init_tracing;
