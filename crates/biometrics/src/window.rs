//! Positional Sample Windows
//!
//! A window keeps one slot per submitted sample. Slots whose sample failed
//! validation stay in place as empty, so "latest" and "N positions back"
//! keep referring to the same readings the device sent.

use crate::batch::BiometricBatch;
use crate::samples::{
    BloodPressureSample, HeartRateSample, HrvSample, SleepSample, Spo2Sample,
};

/// Chronological window of sample slots (oldest first)
#[derive(Debug, Clone, PartialEq)]
pub struct Window<T> {
    slots: Vec<Option<T>>,
}

impl<T> Default for Window<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<T> Window<T> {
    /// Number of slots, rejected ones included
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Sample at a position, `None` when out of bounds or rejected
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Sample in the last slot, `None` when it was rejected
    pub fn latest(&self) -> Option<&T> {
        self.slots.last().and_then(Option::as_ref)
    }

    /// The last `n` slots (fewer when the window is shorter)
    pub fn tail(&self, n: usize) -> &[Option<T>] {
        &self.slots[self.slots.len().saturating_sub(n)..]
    }

    /// Accepted samples in order
    pub fn samples(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots.iter().flatten()
    }

    pub fn accepted_count(&self) -> usize {
        self.samples().count()
    }

    pub fn slots(&self) -> &[Option<T>] {
        &self.slots
    }
}

impl<T> FromIterator<Option<T>> for Window<T> {
    fn from_iter<I: IntoIterator<Item = Option<T>>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

impl<T> From<Vec<T>> for Window<T> {
    fn from(samples: Vec<T>) -> Self {
        samples.into_iter().map(Some).collect()
    }
}

impl<T: Clone> From<&[T]> for Window<T> {
    fn from(samples: &[T]) -> Self {
        samples.iter().cloned().map(Some).collect()
    }
}

/// A batch after validation, every window still positionally aligned with
/// the submitted one
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenedBatch {
    pub heart_rate: Window<HeartRateSample>,
    pub hrv: Window<HrvSample>,
    pub sleep: Window<SleepSample>,
    pub spo2: Window<Spo2Sample>,
    pub blood_pressure: Window<BloodPressureSample>,
}

impl ScreenedBatch {
    /// Number of accepted samples across all windows
    pub fn accepted_count(&self) -> usize {
        self.heart_rate.accepted_count()
            + self.hrv.accepted_count()
            + self.sleep.accepted_count()
            + self.spo2.accepted_count()
            + self.blood_pressure.accepted_count()
    }
}

impl From<&BiometricBatch> for ScreenedBatch {
    /// Every sample accepted
    fn from(batch: &BiometricBatch) -> Self {
        Self {
            heart_rate: batch.heart_rate.as_slice().into(),
            hrv: batch.hrv.as_slice().into(),
            sleep: batch.sleep.as_slice().into(),
            spo2: batch.spo2.as_slice().into(),
            blood_pressure: batch.blood_pressure.as_slice().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn spo2(value: f64) -> Spo2Sample {
        Spo2Sample::new(Utc.with_ymd_and_hms(2024, 3, 1, 3, 0, 0).unwrap(), value)
    }

    #[test]
    fn test_rejected_slot_keeps_positions() {
        let window: Window<Spo2Sample> =
            vec![Some(spo2(97.0)), None, Some(spo2(91.0))].into_iter().collect();

        assert_eq!(window.len(), 3);
        assert_eq!(window.accepted_count(), 2);
        assert!(window.get(1).is_none());
        assert_eq!(window.get(2).map(|s| s.spo2_percent), Some(91.0));
        assert_eq!(window.latest().map(|s| s.spo2_percent), Some(91.0));
        assert_eq!(window.tail(2).len(), 2);
        assert_eq!(window.tail(10).len(), 3);
    }

    #[test]
    fn test_rejected_latest_has_no_latest() {
        let window: Window<Spo2Sample> = vec![Some(spo2(97.0)), None].into_iter().collect();
        assert!(window.latest().is_none());
        assert_eq!(window.samples().count(), 1);
    }

    #[test]
    fn test_from_batch_accepts_everything() {
        let batch = BiometricBatch {
            spo2: vec![spo2(97.0), spo2(95.0)],
            ..Default::default()
        };
        let screened = ScreenedBatch::from(&batch);
        assert_eq!(screened.spo2.len(), 2);
        assert_eq!(screened.accepted_count(), 2);
        assert!(screened.hrv.is_empty());
    }
}
