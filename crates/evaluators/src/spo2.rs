//! Blood Oxygen Rules

use alerting::{AlertRequest, AlertType, Severity};
use biometrics::{Spo2Sample, Window, WindowStats};
use serde_json::json;
use tracing::debug;

/// Severe hypoxemia (%)
pub const SEVERE_SPO2: f64 = 85.0;
/// Moderate hypoxemia (%), also the desaturation cut-off
pub const MODERATE_SPO2: f64 = 90.0;
/// Ideal average saturation (%)
pub const IDEAL_SPO2: f64 = 95.0;
/// Desaturation count above which apnea is suspected
pub const MAX_DESATURATIONS: usize = 5;

/// Evaluate every accepted sample of the SpO2 window
pub fn evaluate(window: &Window<Spo2Sample>) -> Vec<AlertRequest> {
    let values = || window.samples().map(|s| s.spo2_percent);
    let Some(stats) = WindowStats::compute(values()) else {
        return Vec::new();
    };

    let mut alerts = Vec::new();

    if stats.min < SEVERE_SPO2 {
        alerts.push(AlertRequest::new(
            AlertType::Spo2,
            Severity::Critical,
            "Severe Hypoxemia Detected",
            format!(
                "Oxygen saturation dropped to {}%. MEDICAL EMERGENCY: seek care immediately.",
                stats.min
            ),
            json!({ "minSpO2": stats.min, "threshold": SEVERE_SPO2 as u32 }),
        ));
    } else if stats.min < MODERATE_SPO2 {
        alerts.push(AlertRequest::new(
            AlertType::Spo2,
            Severity::High,
            "Moderate Hypoxemia",
            format!(
                "Oxygen saturation at {}%. Medical evaluation needed; this may indicate \
                 cardiac or pulmonary problems.",
                stats.min
            ),
            json!({ "minSpO2": stats.min, "threshold": MODERATE_SPO2 as u32 }),
        ));
    } else if stats.mean < IDEAL_SPO2 {
        alerts.push(AlertRequest::new(
            AlertType::Spo2,
            Severity::Moderate,
            "Below-Ideal SpO2",
            format!(
                "Average saturation at {:.1}%. 95% or higher is ideal; monitoring recommended.",
                stats.mean
            ),
            json!({ "avgSpO2": stats.mean, "threshold": IDEAL_SPO2 as u32 }),
        ));
    }

    let desaturations = WindowStats::count_below(values(), MODERATE_SPO2);
    if desaturations > MAX_DESATURATIONS {
        alerts.push(AlertRequest::new(
            AlertType::Spo2,
            Severity::High,
            "Frequent Nocturnal Desaturations",
            format!(
                "{} episodes of SpO2 below 90%. Possible sleep apnea, a risk factor for \
                 hypertension and arrhythmias.",
                desaturations
            ),
            json!({ "desaturations": desaturations, "threshold": MAX_DESATURATIONS }),
        ));
    }

    debug!(
        "SpO2 window of {} (min {}, avg {:.1}, {} desaturations) produced {} alerts",
        stats.count,
        stats.min,
        stats.mean,
        desaturations,
        alerts.len()
    );
    alerts
}
