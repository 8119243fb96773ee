//! Batch Input Contract

use crate::samples::{
    BloodPressureSample, HeartRateSample, HrvSample, SleepSample, Spo2Sample,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Metric kinds carried by a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    HeartRate,
    Hrv,
    Sleep,
    Spo2,
    BloodPressure,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::HeartRate => "heart_rate",
            Metric::Hrv => "hrv",
            Metric::Sleep => "sleep",
            Metric::Spo2 => "spo2",
            Metric::BloodPressure => "blood_pressure",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One batch of wearable data, each window chronological (oldest first).
///
/// Every window may be absent or empty; both mean "nothing to evaluate".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiometricBatch {
    #[serde(default)]
    pub heart_rate: Vec<HeartRateSample>,
    #[serde(default)]
    pub hrv: Vec<HrvSample>,
    #[serde(default)]
    pub sleep: Vec<SleepSample>,
    #[serde(default)]
    pub spo2: Vec<Spo2Sample>,
    #[serde(default)]
    pub blood_pressure: Vec<BloodPressureSample>,
}

impl BiometricBatch {
    /// Total number of samples across all windows
    pub fn sample_count(&self) -> usize {
        self.heart_rate.len()
            + self.hrv.len()
            + self.sleep.len()
            + self.spo2.len()
            + self.blood_pressure.len()
    }

    /// Whether every window is empty
    pub fn is_empty(&self) -> bool {
        self.sample_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_windows_are_empty() {
        let json = r#"{"spo2":[{"timestamp":"2024-03-01T03:00:00Z","spo2":97}]}"#;
        let batch: BiometricBatch = serde_json::from_str(json).unwrap();
        assert!(batch.heart_rate.is_empty());
        assert!(batch.blood_pressure.is_empty());
        assert_eq!(batch.spo2.len(), 1);
        assert_eq!(batch.sample_count(), 1);
    }

    #[test]
    fn test_empty_batch() {
        let batch: BiometricBatch = serde_json::from_str("{}").unwrap();
        assert!(batch.is_empty());
    }
}
