//! Storage Layer
//!
//! Key-value backends (in-memory and JSON files) and the repository that
//! persists the alert store's lists through them.

mod backend;
mod repository;

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
pub use repository::{AlertRepository, ACTIVE_ALERTS_KEY, ALERT_HISTORY_KEY};

use alerting::PersistenceError;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Lock error: {0}")]
    Lock(String),
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<StorageError> for PersistenceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Serialization(e) => PersistenceError::Serialization(e.to_string()),
            other => PersistenceError::Backend(other.to_string()),
        }
    }
}
