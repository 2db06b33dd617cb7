//! User-facing notification channel.
//!
//! The store calls [`Notifier::notify`] exactly at the rejection and failure
//! points of each operation. Nothing is returned to the store.

use std::sync::{Arc, Mutex, PoisonError};

/// Fixed user-facing messages.
pub mod messages {
    /// Requested quantity exceeds known stock.
    pub const STOCK_UNAVAILABLE: &str = "requested quantity unavailable";
    /// Adding a product failed.
    pub const ADD_FAILED: &str = "failed to add product";
    /// Removing a product failed.
    pub const REMOVE_FAILED: &str = "failed to remove product";
    /// Changing a product's quantity failed.
    pub const UPDATE_FAILED: &str = "failed to update product quantity";
}

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    /// An error-level notification.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// A warning-level notification.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// Sink for user-facing notifications.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

/// Emits notifications as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Error => tracing::error!(
                severity = %notification.severity,
                "{}",
                notification.message
            ),
            Severity::Warning => tracing::warn!(
                severity = %notification.severity,
                "{}",
                notification.message
            ),
        }
    }
}

/// Keeps every notification in memory.
///
/// Clones share the same buffer, so one handle can be given to a store while
/// another is used to inspect what was sent.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications sent so far, oldest first.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages of all notifications sent so far.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .map(|n| n.message)
            .collect()
    }

    /// Drop everything recorded so far.
    pub fn clear(&self) {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}
