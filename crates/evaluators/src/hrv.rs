//! Heart Rate Variability Rules

use crate::fmt_optional;
use alerting::{AlertRequest, AlertType, Severity};
use biometrics::{HrvSample, Window};
use serde_json::json;
use tracing::debug;

/// Critical SDNN (ms)
pub const CRITICAL_SDNN: f64 = 20.0;
/// Critical RMSSD (ms)
pub const CRITICAL_RMSSD: f64 = 15.0;
/// Reduced SDNN (ms)
pub const REDUCED_SDNN: f64 = 30.0;
/// Reduced RMSSD (ms)
pub const REDUCED_RMSSD: f64 = 20.0;
/// Span of the decline check, in samples (one per day)
pub const DECLINE_WINDOW: usize = 7;
/// Decline over the span that raises an alert (%)
pub const DECLINE_PERCENT: f64 = 30.0;

fn below(value: Option<f64>, threshold: f64) -> bool {
    value.map_or(false, |v| v < threshold)
}

/// Evaluate HRV. Needs at least two slots, rejected ones included.
pub fn evaluate(window: &Window<HrvSample>) -> Vec<AlertRequest> {
    if window.len() < 2 {
        return Vec::new();
    }
    let Some(latest) = window.latest() else {
        return Vec::new();
    };

    let (sdnn, rmssd) = (latest.sdnn, latest.rmssd);
    let mut alerts = Vec::new();

    if below(sdnn, CRITICAL_SDNN) || below(rmssd, CRITICAL_RMSSD) {
        alerts.push(AlertRequest::new(
            AlertType::Hrv,
            Severity::Critical,
            "Critically Low HRV",
            format!(
                "Heart rate variability is severely reduced (SDNN: {}ms, RMSSD: {}ms). \
                 High risk of cardiovascular events; contact your cardiologist urgently.",
                fmt_optional(sdnn),
                fmt_optional(rmssd)
            ),
            json!({
                "sdnn": sdnn,
                "rmssd": rmssd,
                "threshold": { "sdnn": CRITICAL_SDNN as u32, "rmssd": CRITICAL_RMSSD as u32 },
            }),
        ));
    } else if below(sdnn, REDUCED_SDNN) || below(rmssd, REDUCED_RMSSD) {
        alerts.push(AlertRequest::new(
            AlertType::Hrv,
            Severity::High,
            "Reduced HRV",
            format!(
                "Heart rate variability below the ideal range (SDNN: {}ms, RMSSD: {}ms). \
                 Significant autonomic dysfunction detected.",
                fmt_optional(sdnn),
                fmt_optional(rmssd)
            ),
            json!({
                "sdnn": sdnn,
                "rmssd": rmssd,
                "threshold": { "sdnn": REDUCED_SDNN as u32, "rmssd": REDUCED_RMSSD as u32 },
            }),
        ));
    }

    if let Some(alert) = check_decline(window) {
        alerts.push(alert);
    }

    debug!("HRV window of {} produced {} alerts", window.len(), alerts.len());
    alerts
}

/// Compare the latest SDNN with the first day of the trailing 7-day span.
/// A rejected sample at either end skips the check.
fn check_decline(window: &Window<HrvSample>) -> Option<AlertRequest> {
    if window.len() < DECLINE_WINDOW {
        return None;
    }

    let before = window.get(window.len() - DECLINE_WINDOW)?.sdnn?;
    let after = window.latest()?.sdnn?;
    if before <= 0.0 {
        return None;
    }

    let decline = (before - after) * 100.0 / before;
    if decline < DECLINE_PERCENT {
        return None;
    }

    Some(AlertRequest::new(
        AlertType::Hrv,
        Severity::High,
        "Progressive HRV Decline",
        format!(
            "Your HRV fell {:.1}% over the last 7 days. This may indicate chronic stress, \
             overtraining or an early inflammatory process.",
            decline
        ),
        json!({ "decline": decline, "before": before, "after": after }),
    ))
}
