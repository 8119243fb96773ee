//! Biometric Samples
//!
//! Sample types collected from wearable devices, the per-batch input contract,
//! plausibility validation, and window statistics used by the evaluators.

mod batch;
mod error;
mod samples;
mod statistics;
mod validator;
mod window;

pub use batch::{BiometricBatch, Metric};
pub use error::ValidationError;
pub use samples::{
    BloodPressureSample, HeartRateSample, HrvSample, SleepSample, Spo2Sample,
};
pub use statistics::WindowStats;
pub use validator::{BatchValidator, RejectedSample, ValidationConfig, ValidationReport};
pub use window::{ScreenedBatch, Window};
