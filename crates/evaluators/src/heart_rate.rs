//! Heart Rate Rules

use alerting::{AlertRequest, AlertType, Severity};
use biometrics::{HeartRateSample, Window};
use serde_json::json;
use tracing::debug;

/// Sustained tachycardia (bpm)
pub const CRITICAL_HR: f64 = 120.0;
/// Tachycardia (bpm)
pub const HIGH_HR: f64 = 100.0;
/// Elevated resting rate (bpm)
pub const RESTING_HR: f64 = 80.0;
/// Bradycardia (bpm)
pub const LOW_HR: f64 = 50.0;

/// Evaluate the latest heart rate sample. A rejected latest slot yields nothing.
pub fn evaluate(window: &Window<HeartRateSample>) -> Vec<AlertRequest> {
    let Some(latest) = window.latest() else {
        return Vec::new();
    };

    let hr = latest.avg_hr;
    let mut alerts = Vec::new();

    if hr > CRITICAL_HR {
        alerts.push(AlertRequest::new(
            AlertType::HeartRate,
            Severity::Critical,
            "Very High Heart Rate",
            format!(
                "Your heart rate is {} bpm, above the critical threshold of {} bpm. \
                 Seek medical care immediately if you have symptoms.",
                hr, CRITICAL_HR
            ),
            json!({ "hr": hr, "threshold": CRITICAL_HR as u32 }),
        ));
    } else if hr > HIGH_HR {
        alerts.push(AlertRequest::new(
            AlertType::HeartRate,
            Severity::High,
            "Tachycardia Detected",
            format!(
                "Elevated heart rate: {} bpm. A medical consultation within the next 24-48h is recommended.",
                hr
            ),
            json!({ "hr": hr, "threshold": HIGH_HR as u32 }),
        ));
    } else if let Some(resting) = latest.resting_hr.filter(|r| *r > RESTING_HR) {
        alerts.push(AlertRequest::new(
            AlertType::HeartRate,
            Severity::High,
            "Elevated Resting Heart Rate",
            format!(
                "Your resting heart rate is {} bpm. With comorbidities, a resting rate above \
                 {} bpm raises cardiovascular risk by 45%.",
                resting, RESTING_HR
            ),
            json!({ "restingHR": resting, "threshold": RESTING_HR as u32 }),
        ));
    }

    if hr < LOW_HR {
        alerts.push(AlertRequest::new(
            AlertType::HeartRate,
            Severity::Critical,
            "Bradycardia Detected",
            format!(
                "Very low heart rate: {} bpm. If you are not an athlete and have symptoms \
                 (dizziness, fatigue), seek medical care.",
                hr
            ),
            json!({ "hr": hr, "threshold": LOW_HR as u32 }),
        ));
    }

    debug!("Heart rate {} bpm produced {} alerts", hr, alerts.len());
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::day;

    fn sample(avg: f64, resting: Option<f64>) -> Window<HeartRateSample> {
        vec![HeartRateSample::new(day(0), avg, resting)].into()
    }

    #[test]
    fn test_empty_window() {
        assert!(evaluate(&Window::default()).is_empty());
    }

    #[test]
    fn test_very_high_heart_rate() {
        let alerts = evaluate(&sample(125.0, None));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::Critical);
        assert_eq!(alerts[0].data["threshold"], 120);
        assert_eq!(alerts[0].data["hr"], 125.0);
        assert!(alerts[0].message.contains("125 bpm"));
    }

    #[test]
    fn test_tachycardia() {
        let alerts = evaluate(&sample(110.0, Some(95.0)));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::High);
        assert_eq!(alerts[0].title, "Tachycardia Detected");
        assert_eq!(alerts[0].data["threshold"], 100);
    }

    #[test]
    fn test_elevated_resting_only() {
        let alerts = evaluate(&sample(65.0, Some(85.0)));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::High);
        assert_eq!(alerts[0].title, "Elevated Resting Heart Rate");
        assert_eq!(alerts[0].data["restingHR"], 85.0);
    }

    #[test]
    fn test_bradycardia_independent_of_resting_branch() {
        let alerts = evaluate(&sample(45.0, Some(85.0)));
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].title, "Elevated Resting Heart Rate");
        assert_eq!(alerts[1].title, "Bradycardia Detected");
        assert_eq!(alerts[1].severity, Severity::Critical);
    }

    #[test]
    fn test_boundaries_are_exclusive() {
        assert!(evaluate(&sample(100.0, Some(80.0))).is_empty());
        assert!(evaluate(&sample(50.0, None)).is_empty());
        assert_eq!(evaluate(&sample(120.0, None))[0].severity, Severity::High);
    }

    #[test]
    fn test_uses_latest_sample_only() {
        let window = vec![
            HeartRateSample::new(day(0), 130.0, None),
            HeartRateSample::new(day(1), 70.0, Some(60.0)),
        ];
        assert!(evaluate(&window.into()).is_empty());
    }

    #[test]
    fn test_rejected_latest_does_not_fall_back() {
        let window: Window<HeartRateSample> =
            vec![Some(HeartRateSample::new(day(0), 130.0, None)), None]
                .into_iter()
                .collect();
        assert!(evaluate(&window).is_empty());
    }
}
