//! Push Notification Channel

use crate::alert::{Alert, Severity};
use thiserror::Error;
use tracing::{info, warn};

/// Notification dispatch errors
#[derive(Debug, Clone, Error)]
pub enum NotifyError {
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Payload handed to the notification channel
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon_hint: &'static str,
    /// Alert id; lets the channel replace or correlate notifications
    pub tag: String,
    /// Whether the notification should stay until the user interacts
    pub require_interaction: bool,
}

impl Notification {
    /// Build the notification for an alert
    pub fn for_alert(alert: &Alert) -> Self {
        Self {
            title: alert.title.clone(),
            body: alert.message.clone(),
            icon_hint: alert.severity.icon(),
            tag: alert.id.clone(),
            require_interaction: alert.severity == Severity::Critical,
        }
    }
}

/// Best-effort push notification delivery
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError>;
}

impl<T> Notifier for std::sync::Arc<T>
where
    T: Notifier + ?Sized,
{
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        (**self).notify(notification)
    }
}

/// Notifier that writes notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        if notification.require_interaction {
            warn!(
                tag = %notification.tag,
                "{} {}: {}",
                notification.icon_hint, notification.title, notification.body
            );
        } else {
            info!(
                tag = %notification.tag,
                "{} {}: {}",
                notification.icon_hint, notification.title, notification.body
            );
        }
        Ok(())
    }
}
