//! Plausibility Validation for Wearable Batches

use crate::batch::{BiometricBatch, Metric};
use crate::error::ValidationError;
use crate::samples::{
    BloodPressureSample, HeartRateSample, HrvSample, SleepSample, Spo2Sample,
};
use crate::window::{ScreenedBatch, Window};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Validation configuration.
///
/// The defaults reject only readings no living wearer can produce, so that
/// critical values still reach the evaluators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Heart rate valid range (bpm), applies to average and resting
    pub heart_rate_range: (f64, f64),
    /// SDNN/RMSSD valid range (ms); zero is rejected
    pub hrv_range: (f64, f64),
    /// Sleep duration valid range (hours), applies to every stage
    pub sleep_hours_range: (f64, f64),
    /// Maximum wake-up events per night
    pub max_awakenings: u32,
    /// SpO2 valid range (%)
    pub spo2_range: (f64, f64),
    /// Systolic valid range (mmHg)
    pub systolic_range: (f64, f64),
    /// Diastolic valid range (mmHg)
    pub diastolic_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            heart_rate_range: (f64::MIN_POSITIVE, 400.0),
            hrv_range: (f64::MIN_POSITIVE, 500.0),
            sleep_hours_range: (0.0, 24.0),
            max_awakenings: 200,
            spo2_range: (f64::MIN_POSITIVE, 100.0),
            systolic_range: (f64::MIN_POSITIVE, 400.0),
            diastolic_range: (f64::MIN_POSITIVE, 300.0),
        }
    }
}

/// A sample rejected from its window
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedSample {
    pub metric: Metric,
    /// Position in the submitted window
    pub index: usize,
    pub error: ValidationError,
}

/// Result of validating a batch
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// The batch with every rejected sample left as an empty slot
    pub batch: ScreenedBatch,
    pub rejected: Vec<RejectedSample>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Validator for wearable batches
pub struct BatchValidator {
    config: ValidationConfig,
}

impl BatchValidator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { field });
        }
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    pub fn validate_heart_rate(&self, sample: &HeartRateSample) -> Result<(), ValidationError> {
        self.validate_range("avgHR", sample.avg_hr, self.config.heart_rate_range)?;
        if let Some(resting) = sample.resting_hr {
            self.validate_range("restingHR", resting, self.config.heart_rate_range)?;
        }
        Ok(())
    }

    pub fn validate_hrv(&self, sample: &HrvSample) -> Result<(), ValidationError> {
        if let Some(sdnn) = sample.sdnn {
            self.validate_range("sdnn", sdnn, self.config.hrv_range)?;
        }
        if let Some(rmssd) = sample.rmssd {
            self.validate_range("rmssd", rmssd, self.config.hrv_range)?;
        }
        Ok(())
    }

    pub fn validate_sleep(&self, sample: &SleepSample) -> Result<(), ValidationError> {
        let range = self.config.sleep_hours_range;
        let total = sample.total_sleep_hours;
        self.validate_range("totalSleep", total, range)?;

        for (stage, hours) in [("remSleep", sample.rem_hours), ("deepSleep", sample.deep_hours)] {
            if let Some(hours) = hours {
                self.validate_range(stage, hours, range)?;
                if hours > total {
                    return Err(ValidationError::StageExceedsTotal {
                        stage,
                        stage_hours: hours,
                        total_hours: total,
                    });
                }
            }
        }

        if sample.awakenings > self.config.max_awakenings {
            return Err(ValidationError::OutOfRange {
                field: "awakenings",
                value: sample.awakenings as f64,
                min: 0.0,
                max: self.config.max_awakenings as f64,
            });
        }
        Ok(())
    }

    pub fn validate_spo2(&self, sample: &Spo2Sample) -> Result<(), ValidationError> {
        self.validate_range("spo2", sample.spo2_percent, self.config.spo2_range)
    }

    pub fn validate_blood_pressure(
        &self,
        sample: &BloodPressureSample,
    ) -> Result<(), ValidationError> {
        self.validate_range("systolic", sample.systolic, self.config.systolic_range)?;
        self.validate_range("diastolic", sample.diastolic, self.config.diastolic_range)
    }

    /// Validate every window of a batch, blanking implausible samples.
    pub fn validate(&self, batch: &BiometricBatch) -> ValidationReport {
        let mut rejected = Vec::new();

        let screened = ScreenedBatch {
            heart_rate: screen(&batch.heart_rate, Metric::HeartRate, &mut rejected, |s| {
                self.validate_heart_rate(s)
            }),
            hrv: screen(&batch.hrv, Metric::Hrv, &mut rejected, |s| self.validate_hrv(s)),
            sleep: screen(&batch.sleep, Metric::Sleep, &mut rejected, |s| {
                self.validate_sleep(s)
            }),
            spo2: screen(&batch.spo2, Metric::Spo2, &mut rejected, |s| {
                self.validate_spo2(s)
            }),
            blood_pressure: screen(
                &batch.blood_pressure,
                Metric::BloodPressure,
                &mut rejected,
                |s| self.validate_blood_pressure(s),
            ),
        };

        debug!(
            "Validated batch: {} samples kept, {} rejected",
            screened.accepted_count(),
            rejected.len()
        );

        ValidationReport {
            batch: screened,
            rejected,
        }
    }
}

impl Default for BatchValidator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

fn screen<T, F>(
    window: &[T],
    metric: Metric,
    rejected: &mut Vec<RejectedSample>,
    check: F,
) -> Window<T>
where
    T: Clone,
    F: Fn(&T) -> Result<(), ValidationError>,
{
    window
        .iter()
        .enumerate()
        .map(|(index, sample)| match check(sample) {
            Ok(()) => Some(sample.clone()),
            Err(error) => {
                warn!("Rejected {} sample #{}: {}", metric, index, error);
                rejected.push(RejectedSample { metric, index, error });
                None
            }
        })
        .collect()
}
