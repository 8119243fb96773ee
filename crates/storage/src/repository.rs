//! Repository Implementation

use crate::backend::KeyValueBackend;
use crate::StorageError;
use alerting::{Alert, AlertPersistence, PersistenceError};
use tracing::debug;

/// Key holding the active alert list
pub const ACTIVE_ALERTS_KEY: &str = "health_active_alerts";
/// Key holding the alert history
pub const ALERT_HISTORY_KEY: &str = "health_alert_history";

/// Persists alert lists as JSON arrays under two fixed keys
pub struct AlertRepository<B> {
    backend: B,
}

impl<B: KeyValueBackend> AlertRepository<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn load(&self, key: &str) -> Result<Vec<Alert>, StorageError> {
        match self.backend.get(key)? {
            Some(raw) => {
                let alerts: Vec<Alert> = serde_json::from_str(&raw)?;
                debug!("Loaded {} alerts from {}", alerts.len(), key);
                Ok(alerts)
            }
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, key: &str, alerts: &[Alert]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(alerts)?;
        self.backend.set(key, &raw)
    }
}

impl<B: KeyValueBackend> AlertPersistence for AlertRepository<B> {
    fn load_active(&self) -> Result<Vec<Alert>, PersistenceError> {
        Ok(self.load(ACTIVE_ALERTS_KEY)?)
    }

    fn save_active(&self, alerts: &[Alert]) -> Result<(), PersistenceError> {
        Ok(self.save(ACTIVE_ALERTS_KEY, alerts)?)
    }

    fn load_history(&self) -> Result<Vec<Alert>, PersistenceError> {
        Ok(self.load(ALERT_HISTORY_KEY)?)
    }

    fn save_history(&self, alerts: &[Alert]) -> Result<(), PersistenceError> {
        Ok(self.save(ALERT_HISTORY_KEY, alerts)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{FileBackend, MemoryBackend};
    use alerting::{AlertStore, AlertType, Severity};
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_missing_keys_load_empty() {
        let repo = AlertRepository::new(MemoryBackend::new());
        assert!(repo.load_active().unwrap().is_empty());
        assert!(repo.load_history().unwrap().is_empty());
    }

    #[test]
    fn test_store_writes_both_keys() {
        let repo = Arc::new(AlertRepository::new(MemoryBackend::new()));
        let mut store = AlertStore::new(Box::new(repo.clone()));

        let alert = store.create(
            AlertType::BloodPressure,
            Severity::Critical,
            "Hypertensive Crisis",
            "Blood pressure 185/95 mmHg.",
            json!({ "systolic": 185, "diastolic": 95 }),
        );

        let active = repo.load_active().unwrap();
        let history = repo.load_history().unwrap();
        assert_eq!(active, vec![alert.clone()]);
        assert_eq!(history, vec![alert]);
        assert_eq!(repo.backend().len(), 2);
    }

    #[test]
    fn test_corrupt_value_is_serialization_error() {
        let backend = MemoryBackend::new();
        backend.set(ACTIVE_ALERTS_KEY, "not json").unwrap();
        let repo = AlertRepository::new(backend);

        assert!(matches!(
            repo.load_active(),
            Err(PersistenceError::Serialization(_))
        ));

        // the store starts empty instead of failing
        let store = AlertStore::open(Box::new(repo));
        assert_eq!(store.active_count(), 0);
        assert!(store.last_persistence_error().is_some());
    }

    #[test]
    fn test_file_backed_store_survives_restart() {
        let dir = std::env::temp_dir().join(format!("health-alerts-{}", uuid::Uuid::new_v4()));

        let (kept_id, dismissed_id) = {
            let repo = AlertRepository::new(FileBackend::open(&dir).unwrap());
            let mut store = AlertStore::open(Box::new(repo));
            let kept = store.create(AlertType::Sleep, Severity::Moderate, "Fragmented Sleep", "12 awakenings", json!({}));
            let gone = store.create(AlertType::Spo2, Severity::High, "Moderate Hypoxemia", "SpO2 88%", json!({}));
            store.dismiss(&gone.id);
            (kept.id, gone.id)
        };

        let repo = AlertRepository::new(FileBackend::open(&dir).unwrap());
        let store = AlertStore::open(Box::new(repo));
        let active: Vec<_> = store.get_active(None).iter().map(|a| a.id.clone()).collect();
        assert_eq!(active, vec![kept_id]);
        assert_eq!(store.history().len(), 2);
        assert!(store.get(&dismissed_id).map_or(false, |a| a.dismissed));

        std::fs::remove_dir_all(dir).unwrap();
    }
}
