//! Alert Store Implementation

use crate::alert::{generate_id, Alert, AlertRequest, AlertType, Severity};
use crate::clock::{Clock, SystemClock};
use crate::notify::{LogNotifier, Notification, Notifier};
use crate::observer::{AlertObserver, SubscriptionId};
use crate::persistence::{AlertPersistence, PersistenceError};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Maximum number of alerts kept in history
pub const HISTORY_LIMIT: usize = 100;

type IdGenerator = Box<dyn Fn(DateTime<Utc>) -> String + Send + Sync>;

/// Owner of the active alerts and the bounded history.
///
/// Every mutation is persisted before returning. Persistence failures are
/// logged and recorded, never propagated: the in-memory lists stay
/// authoritative.
pub struct AlertStore {
    /// Not yet dismissed, insertion order
    active: Vec<Alert>,
    /// Most recent first, at most `HISTORY_LIMIT`
    history: Vec<Alert>,
    persistence: Box<dyn AlertPersistence>,
    notifier: Box<dyn Notifier>,
    clock: Arc<dyn Clock>,
    observers: Vec<(SubscriptionId, Box<dyn AlertObserver>)>,
    next_subscription: u64,
    last_persistence_error: Option<PersistenceError>,
    id_generator: IdGenerator,
    /// Every id issued or loaded, including alerts evicted from history
    issued_ids: HashSet<String>,
}

impl AlertStore {
    /// Create an empty store. Nothing is loaded from `persistence`.
    pub fn new(persistence: Box<dyn AlertPersistence>) -> Self {
        Self {
            active: Vec::new(),
            history: Vec::new(),
            persistence,
            notifier: Box::new(LogNotifier),
            clock: Arc::new(SystemClock),
            observers: Vec::new(),
            next_subscription: 1,
            last_persistence_error: None,
            id_generator: Box::new(generate_id),
            issued_ids: HashSet::new(),
        }
    }

    /// Create a store initialised from previously persisted lists.
    ///
    /// A list that fails to load starts empty.
    pub fn open(persistence: Box<dyn AlertPersistence>) -> Self {
        let mut store = Self::new(persistence);

        match store.persistence.load_active() {
            Ok(alerts) => {
                store.active = alerts.into_iter().filter(|a| !a.dismissed).collect();
            }
            Err(e) => {
                warn!("Could not load active alerts, starting empty: {}", e);
                store.last_persistence_error = Some(e);
            }
        }

        match store.persistence.load_history() {
            Ok(mut alerts) => {
                alerts.truncate(HISTORY_LIMIT);
                store.history = alerts;
            }
            Err(e) => {
                warn!("Could not load alert history, starting empty: {}", e);
                store.last_persistence_error = Some(e);
            }
        }

        let loaded: Vec<String> = store
            .active
            .iter()
            .chain(store.history.iter())
            .map(|a| a.id.clone())
            .collect();
        store.issued_ids.extend(loaded);

        info!(
            "Opened alert store: {} active, {} in history",
            store.active.len(),
            store.history.len()
        );
        store
    }

    /// Replace the notification channel
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Create an alert: record it, persist, notify when urgent, then publish.
    pub fn create(
        &mut self,
        alert_type: AlertType,
        severity: Severity,
        title: impl Into<String>,
        message: impl Into<String>,
        data: Value,
    ) -> Alert {
        self.submit(AlertRequest::new(alert_type, severity, title, message, data))
    }

    /// Create an alert from a prepared request. Its id is never reused for
    /// the lifetime of the store, even after eviction from history.
    pub fn submit(&mut self, request: AlertRequest) -> Alert {
        let mut alert = Alert::new(request, self.clock.now());
        alert.id = self.next_id(alert.created_at);

        self.active.push(alert.clone());
        self.history.insert(0, alert.clone());
        self.history.truncate(HISTORY_LIMIT);
        self.persist(true);

        info!(
            id = %alert.id,
            "Alert created: [{}] {} - {}",
            alert.severity, alert.alert_type, alert.title
        );

        if alert.severity.is_urgent() {
            self.dispatch_notification(&alert);
        }
        self.publish(&alert);

        alert
    }

    /// Acknowledge an active alert. Returns whether it was found.
    pub fn acknowledge(&mut self, id: &str) -> bool {
        let now = self.clock.now();
        let Some(alert) = self.active.iter_mut().find(|a| a.id == id) else {
            debug!("Acknowledge ignored, no active alert {}", id);
            return false;
        };

        alert.acknowledge(now);
        let updated = alert.clone();
        self.sync_history(updated);
        self.persist(true);

        info!("Alert acknowledged: {}", id);
        true
    }

    /// Dismiss an active alert, removing it from the active list.
    /// Returns whether it was found.
    pub fn dismiss(&mut self, id: &str) -> bool {
        let Some(position) = self.active.iter().position(|a| a.id == id) else {
            debug!("Dismiss ignored, no active alert {}", id);
            return false;
        };

        let mut alert = self.active.remove(position);
        alert.dismiss(self.clock.now());
        self.sync_history(alert);
        self.persist(true);

        info!("Alert dismissed: {}", id);
        true
    }

    /// Drop every active alert. History is untouched.
    pub fn clear_all(&mut self) {
        let cleared = self.active.len();
        self.active.clear();
        self.persist(false);
        info!("Cleared {} active alerts", cleared);
    }

    /// Active alerts in insertion order, optionally of a single severity
    pub fn get_active(&self, severity: Option<Severity>) -> Vec<&Alert> {
        self.active
            .iter()
            .filter(|a| !a.dismissed)
            .filter(|a| severity.map_or(true, |s| a.severity == s))
            .collect()
    }

    /// Active critical and high alerts, insertion order, at most `limit`
    pub fn priority(&self, limit: usize) -> Vec<&Alert> {
        self.active
            .iter()
            .filter(|a| !a.dismissed && a.severity.is_urgent())
            .take(limit)
            .collect()
    }

    /// History, newest first
    pub fn history(&self) -> &[Alert] {
        &self.history
    }

    /// Look up an alert, active list first
    pub fn get(&self, id: &str) -> Option<&Alert> {
        self.active
            .iter()
            .find(|a| a.id == id)
            .or_else(|| self.history.iter().find(|a| a.id == id))
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn unacknowledged_count(&self) -> usize {
        self.active.iter().filter(|a| !a.acknowledged).count()
    }

    /// Most recent persistence failure, cleared by the next successful write
    pub fn last_persistence_error(&self) -> Option<&PersistenceError> {
        self.last_persistence_error.as_ref()
    }

    /// Register an observer for newly created alerts
    pub fn subscribe<O>(&mut self, observer: O) -> SubscriptionId
    where
        O: AlertObserver + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        debug!("Observer {:?} subscribed", id);
        id
    }

    /// Remove an observer. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn next_id(&mut self, now: DateTime<Utc>) -> String {
        loop {
            let id = (self.id_generator)(now);
            if self.issued_ids.insert(id.clone()) {
                return id;
            }
            debug!("Alert id {} already issued, regenerating", id);
        }
    }

    #[cfg(test)]
    fn with_id_generator<F>(mut self, generator: F) -> Self
    where
        F: Fn(DateTime<Utc>) -> String + Send + Sync + 'static,
    {
        self.id_generator = Box::new(generator);
        self
    }

    fn sync_history(&mut self, updated: Alert) {
        if let Some(entry) = self.history.iter_mut().find(|a| a.id == updated.id) {
            *entry = updated;
        }
    }

    fn persist(&mut self, include_history: bool) {
        let mut failure = None;

        if let Err(e) = self.persistence.save_active(&self.active) {
            error!("Failed to persist active alerts: {}", e);
            failure = Some(e);
        }

        if include_history {
            if let Err(e) = self.persistence.save_history(&self.history) {
                error!("Failed to persist alert history: {}", e);
                failure = failure.or(Some(e));
            }
        }

        self.last_persistence_error = failure;
    }

    fn dispatch_notification(&self, alert: &Alert) {
        let notification = Notification::for_alert(alert);
        if let Err(e) = self.notifier.notify(&notification) {
            warn!(id = %alert.id, "Notification dispatch failed: {}", e);
        }
    }

    fn publish(&self, alert: &Alert) {
        for (_, observer) in &self.observers {
            observer.on_alert(alert);
        }
    }
}
