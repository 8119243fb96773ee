//! Composite Risk Scoring
//!
//! Weighs the latest reading of each metric (blood pressure excluded) into a
//! single score out of 100. One alert is raised when two or more factors
//! are present.

use crate::{heart_rate, hrv, sleep, spo2};
use alerting::{AlertRequest, AlertType, Severity};
use biometrics::{ScreenedBatch, WindowStats};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

/// Factors required before a composite alert is raised
pub const MIN_FACTORS: usize = 2;
/// Score at or above which the composite alert is critical
pub const CRITICAL_SCORE: u32 = 60;
/// Score at or above which the composite alert is high
pub const HIGH_SCORE: u32 = 40;

/// A contributing risk factor, declared in check order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    ReducedHrv,
    ElevatedRestingHr,
    SleepDeprivation,
    ReducedSpo2,
}

impl RiskFactor {
    pub fn label(&self) -> &'static str {
        match self {
            RiskFactor::ReducedHrv => "reduced HRV",
            RiskFactor::ElevatedRestingHr => "elevated resting HR",
            RiskFactor::SleepDeprivation => "sleep deprivation",
            RiskFactor::ReducedSpo2 => "reduced SpO2",
        }
    }
}

/// Score and factors for one batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub score: u32,
    pub factors: Vec<RiskFactor>,
}

impl RiskAssessment {
    /// Assess the latest readings of a screened batch
    pub fn assess(batch: &ScreenedBatch) -> Self {
        let mut assessment = Self::default();

        if let Some(sdnn) = batch.hrv.latest().and_then(|s| s.sdnn) {
            if sdnn < hrv::REDUCED_SDNN {
                let weight = if sdnn < hrv::CRITICAL_SDNN { 30 } else { 20 };
                assessment.add(RiskFactor::ReducedHrv, weight);
            }
        }

        if let Some(resting) = batch.heart_rate.latest().and_then(|s| s.resting_hr) {
            if resting > heart_rate::RESTING_HR {
                assessment.add(RiskFactor::ElevatedRestingHr, 15);
            }
        }

        if let Some(night) = batch.sleep.latest() {
            if night.total_sleep_hours < sleep::MIN_SLEEP_HOURS {
                assessment.add(RiskFactor::SleepDeprivation, 10);
            }
        }

        if let Some(stats) = WindowStats::compute(batch.spo2.samples().map(|s| s.spo2_percent)) {
            if stats.mean < spo2::IDEAL_SPO2 {
                assessment.add(RiskFactor::ReducedSpo2, 15);
            }
        }

        debug!(
            "Composite risk: score {} from {} factors",
            assessment.score,
            assessment.factors.len()
        );
        assessment
    }

    fn add(&mut self, factor: RiskFactor, weight: u32) {
        self.factors.push(factor);
        self.score += weight;
    }

    pub fn severity(&self) -> Severity {
        if self.score >= CRITICAL_SCORE {
            Severity::Critical
        } else if self.score >= HIGH_SCORE {
            Severity::High
        } else {
            Severity::Moderate
        }
    }

    /// Factor labels in check order
    pub fn labels(&self) -> Vec<&'static str> {
        self.factors.iter().map(|f| f.label()).collect()
    }

    /// The composite alert, if enough factors are present
    pub fn to_alert(&self) -> Option<AlertRequest> {
        if self.factors.len() < MIN_FACTORS {
            return None;
        }

        let labels = self.labels();
        Some(AlertRequest::new(
            AlertType::Composite,
            self.severity(),
            "Multiple Risk Factors",
            format!(
                "Detected {} risk indicators: {}. Risk score: {}/100. \
                 A cardiology evaluation is recommended.",
                self.factors.len(),
                labels.join(", "),
                self.score
            ),
            json!({ "riskFactors": labels, "riskScore": self.score }),
        ))
    }
}

/// Composite alert for a batch, if any
pub fn evaluate(batch: &ScreenedBatch) -> Option<AlertRequest> {
    RiskAssessment::assess(batch).to_alert()
}
