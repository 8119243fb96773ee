//! Validation Error Types

use thiserror::Error;

/// Reasons a sample is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// NaN or infinite value
    #[error("{field} is not a finite number")]
    NotFinite { field: &'static str },

    /// A sleep stage longer than the whole night
    #[error("{stage} of {stage_hours}h exceeds total sleep of {total_hours}h")]
    StageExceedsTotal {
        stage: &'static str,
        stage_hours: f64,
        total_hours: f64,
    },
}
