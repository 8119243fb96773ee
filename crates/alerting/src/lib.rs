//! Alerting System
//!
//! Provides the health alert model and the alert store that owns active
//! alerts and the bounded history, plus the seams it drives on every
//! creation: persistence, push notification and observer fan-out.

mod alert;
pub mod clock;
mod notify;
mod observer;
mod persistence;
mod store;

pub use alert::{Alert, AlertRequest, AlertType, ParseSeverityError, Severity};
pub use clock::{Clock, ManualClock, SystemClock};
pub use notify::{LogNotifier, Notification, NotifyError, Notifier};
pub use observer::{AlertObserver, SubscriptionId};
pub use persistence::{AlertPersistence, PersistenceError};
pub use store::{AlertStore, HISTORY_LIMIT};
