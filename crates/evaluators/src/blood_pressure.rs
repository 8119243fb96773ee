//! Blood Pressure Rules

use alerting::{AlertRequest, AlertType, Severity};
use biometrics::{BloodPressureSample, Window};
use serde_json::json;
use tracing::debug;

/// Hypertensive crisis, exclusive (systolic, diastolic)
pub const CRISIS: (f64, f64) = (180.0, 120.0);
/// Stage 2 hypertension, inclusive
pub const STAGE_2: (f64, f64) = (140.0, 90.0);
/// Stage 1 hypertension, inclusive
pub const STAGE_1: (f64, f64) = (130.0, 80.0);

/// Evaluate the latest blood pressure reading
pub fn evaluate(window: &Window<BloodPressureSample>) -> Vec<AlertRequest> {
    let Some(latest) = window.latest() else {
        return Vec::new();
    };

    let (systolic, diastolic) = (latest.systolic, latest.diastolic);
    let reading = format!("{}/{} mmHg", systolic, diastolic);

    let alert = if systolic > CRISIS.0 || diastolic > CRISIS.1 {
        Some(AlertRequest::new(
            AlertType::BloodPressure,
            Severity::Critical,
            "Hypertensive Crisis",
            format!(
                "Blood pressure: {}. MEDICAL EMERGENCY: seek care immediately or call emergency services.",
                reading
            ),
            json!({ "systolic": systolic, "diastolic": diastolic, "threshold": "180/120" }),
        ))
    } else if systolic >= STAGE_2.0 || diastolic >= STAGE_2.1 {
        Some(AlertRequest::new(
            AlertType::BloodPressure,
            Severity::High,
            "Stage 2 Hypertension",
            format!(
                "Blood pressure: {}. Medication and lifestyle changes are needed; consult your doctor.",
                reading
            ),
            json!({ "systolic": systolic, "diastolic": diastolic, "category": "Stage 2" }),
        ))
    } else if systolic >= STAGE_1.0 || diastolic >= STAGE_1.1 {
        Some(AlertRequest::new(
            AlertType::BloodPressure,
            Severity::Moderate,
            "Stage 1 Hypertension",
            format!(
                "Blood pressure: {}. Consider medication and lifestyle changes; medical \
                 follow-up recommended.",
                reading
            ),
            json!({ "systolic": systolic, "diastolic": diastolic, "category": "Stage 1" }),
        ))
    } else {
        None
    };

    debug!("Blood pressure {} classified: {:?}", reading, alert.as_ref().map(|a| a.severity));
    alert.into_iter().collect()
}
