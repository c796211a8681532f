//! # Notifications
//!
//! Every cart and admin outcome becomes a [`Notification`] handed to a
//! [`NotificationSink`]. The shell decides how to show them (banner, toast,
//! log line).
//!
//! ```text
//!   Storefront ──notify()──► NotificationSink
//!                              ├── MemorySink   (shell polls + dismisses)
//!                              └── TracingSink  (log only)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_core::{CartError, CartMessage, CouponWarning};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Error,
    Warning,
}

/// One user-facing message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub level: NotificationLevel,

    /// Machine code of the outcome (`added`, `out_of_stock`, ...).
    pub code: String,

    pub message: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(level: NotificationLevel, code: impl Into<String>, message: impl Into<String>) -> Self {
        Notification {
            id: Uuid::new_v4().to_string(),
            level,
            code: code.into(),
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    pub fn success(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, code, message)
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, code, message)
    }

    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, code, message)
    }
}

impl From<&CartMessage> for Notification {
    fn from(message: &CartMessage) -> Self {
        Notification::success(message.code(), message.to_string())
    }
}

impl From<&CartError> for Notification {
    fn from(error: &CartError) -> Self {
        Notification::error(error.code(), error.to_string())
    }
}

impl From<&CouponWarning> for Notification {
    fn from(warning: &CouponWarning) -> Self {
        Notification::warning(warning.code(), warning.to_string())
    }
}

impl From<&SessionError> for Notification {
    fn from(error: &SessionError) -> Self {
        Notification::error(error.code(), error.to_string())
    }
}

// =============================================================================
// Sinks
// =============================================================================

/// Receiver of session notifications.
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

/// Keeps notifications until the shell drains or dismisses them.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pending: Vec<Notification>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }

    /// Takes every pending notification, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    /// Removes one notification. Returns false if the id is unknown.
    pub fn dismiss(&mut self, id: &str) -> bool {
        let before = self.pending.len();
        self.pending.retain(|n| n.id != id);
        self.pending.len() != before
    }
}

impl NotificationSink for MemorySink {
    fn notify(&mut self, notification: Notification) {
        self.pending.push(notification);
    }
}

/// Writes notifications to the log and keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&mut self, n: Notification) {
        match n.level {
            NotificationLevel::Success => {
                tracing::info!(code = %n.code, id = %n.id, "{}", n.message)
            }
            NotificationLevel::Warning => {
                tracing::warn!(code = %n.code, id = %n.id, "{}", n.message)
            }
            NotificationLevel::Error => {
                tracing::error!(code = %n.code, id = %n.id, "{}", n.message)
            }
        }
    }
}

impl<S: NotificationSink + ?Sized> NotificationSink for Box<S> {
    fn notify(&mut self, notification: Notification) {
        (**self).notify(notification)
    }
}
