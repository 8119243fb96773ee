//! Alert creation observers

use crate::alert::Alert;
use serde::Serialize;

/// Handle returned by `AlertStore::subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SubscriptionId(pub(crate) u64);

/// Receives every newly created alert, synchronously, after persistence
/// and notification dispatch.
pub trait AlertObserver: Send + Sync {
    fn on_alert(&self, alert: &Alert);
}

impl<F> AlertObserver for F
where
    F: Fn(&Alert) + Send + Sync,
{
    fn on_alert(&self, alert: &Alert) {
        self(alert)
    }
}
