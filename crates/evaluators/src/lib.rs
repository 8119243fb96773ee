//! Health Evaluators
//!
//! Fixed-threshold rules that turn metric windows into alert requests:
//! - Heart rate (tachycardia, bradycardia, elevated resting rate)
//! - HRV (low variability, week-over-week decline)
//! - Sleep (deprivation, REM/deep share, fragmentation)
//! - SpO2 (hypoxemia, nocturnal desaturations)
//! - Blood pressure (hypertension stages)
//! - Composite risk across metrics
//!
//! Evaluators are pure; `HealthMonitor` dispatches their requests through
//! the alert store.

pub mod blood_pressure;
pub mod composite;
pub mod heart_rate;
pub mod hrv;
mod monitor;
pub mod sleep;
pub mod spo2;

pub use composite::{RiskAssessment, RiskFactor};
pub use monitor::{BatchReport, HealthMonitor};

/// Format an optional millisecond reading for alert messages
pub(crate) fn fmt_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    /// Midnight of the n-th day of a test series
    pub fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap() + Duration::days(n)
    }
}
