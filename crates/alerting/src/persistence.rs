//! Persistence seam for the alert store

use crate::alert::Alert;
use thiserror::Error;

/// Persistence errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PersistenceError {
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Load and save the two alert lists.
///
/// Implementations back onto an opaque key-value store with one key for the
/// active list and one for the history.
pub trait AlertPersistence: Send + Sync {
    fn load_active(&self) -> Result<Vec<Alert>, PersistenceError>;
    fn save_active(&self, alerts: &[Alert]) -> Result<(), PersistenceError>;
    fn load_history(&self) -> Result<Vec<Alert>, PersistenceError>;
    fn save_history(&self, alerts: &[Alert]) -> Result<(), PersistenceError>;
}

impl<T> AlertPersistence for std::sync::Arc<T>
where
    T: AlertPersistence + ?Sized,
{
    fn load_active(&self) -> Result<Vec<Alert>, PersistenceError> {
        (**self).load_active()
    }

    fn save_active(&self, alerts: &[Alert]) -> Result<(), PersistenceError> {
        (**self).save_active(alerts)
    }

    fn load_history(&self) -> Result<Vec<Alert>, PersistenceError> {
        (**self).load_history()
    }

    fn save_history(&self, alerts: &[Alert]) -> Result<(), PersistenceError> {
        (**self).save_history(alerts)
    }
}
