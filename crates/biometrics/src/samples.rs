//! Sample Types
//!
//! One struct per metric. Field names on the wire follow the device
//! integration payloads (`avgHR`, `totalSleep`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Daily heart rate summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateSample {
    pub timestamp: DateTime<Utc>,
    /// Average heart rate (bpm)
    #[serde(rename = "avgHR")]
    pub avg_hr: f64,
    /// Resting heart rate (bpm), when the device reports it
    #[serde(rename = "restingHR", default, skip_serializing_if = "Option::is_none")]
    pub resting_hr: Option<f64>,
}

/// Heart rate variability reading, both metrics in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HrvSample {
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdnn: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rmssd: Option<f64>,
}

/// One night of sleep staging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepSample {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "totalSleep")]
    pub total_sleep_hours: f64,
    #[serde(rename = "remSleep", default, skip_serializing_if = "Option::is_none")]
    pub rem_hours: Option<f64>,
    #[serde(rename = "deepSleep", default, skip_serializing_if = "Option::is_none")]
    pub deep_hours: Option<f64>,
    #[serde(default)]
    pub awakenings: u32,
}

/// Peripheral oxygen saturation reading (percent)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spo2Sample {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "spo2")]
    pub spo2_percent: f64,
}

/// Blood pressure reading (mmHg)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodPressureSample {
    pub timestamp: DateTime<Utc>,
    pub systolic: f64,
    pub diastolic: f64,
}

impl HeartRateSample {
    pub fn new(timestamp: DateTime<Utc>, avg_hr: f64, resting_hr: Option<f64>) -> Self {
        Self { timestamp, avg_hr, resting_hr }
    }
}

impl HrvSample {
    pub fn new(timestamp: DateTime<Utc>, sdnn: Option<f64>, rmssd: Option<f64>) -> Self {
        Self { timestamp, sdnn, rmssd }
    }
}

impl SleepSample {
    pub fn new(timestamp: DateTime<Utc>, total_sleep_hours: f64) -> Self {
        Self {
            timestamp,
            total_sleep_hours,
            rem_hours: None,
            deep_hours: None,
            awakenings: 0,
        }
    }

    /// Set REM and deep sleep hours
    pub fn with_stages(mut self, rem_hours: Option<f64>, deep_hours: Option<f64>) -> Self {
        self.rem_hours = rem_hours;
        self.deep_hours = deep_hours;
        self
    }

    /// Set the number of wake-up events
    pub fn with_awakenings(mut self, awakenings: u32) -> Self {
        self.awakenings = awakenings;
        self
    }
}

impl Spo2Sample {
    pub fn new(timestamp: DateTime<Utc>, spo2_percent: f64) -> Self {
        Self { timestamp, spo2_percent }
    }
}

impl BloodPressureSample {
    pub fn new(timestamp: DateTime<Utc>, systolic: f64, diastolic: f64) -> Self {
        Self { timestamp, systolic, diastolic }
    }
}
