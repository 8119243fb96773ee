//! Sleep Rules

use alerting::{AlertRequest, AlertType, Severity};
use biometrics::{SleepSample, Window};
use serde_json::json;
use tracing::debug;

/// Minimum healthy sleep (hours)
pub const MIN_SLEEP_HOURS: f64 = 6.0;
/// Consecutive short nights that count as chronic
pub const CHRONIC_NIGHTS: usize = 3;
/// Recommended sleep (hours), reported in alert data
pub const RECOMMENDED_HOURS: u32 = 7;
/// Minimum REM share (%)
pub const MIN_REM_PERCENT: f64 = 15.0;
/// Minimum deep sleep share (%)
pub const MIN_DEEP_PERCENT: f64 = 10.0;
/// Awakenings per night above which sleep counts as fragmented
pub const MAX_AWAKENINGS: u32 = 10;

/// Evaluate the latest night of sleep. A rejected latest night yields nothing.
pub fn evaluate(window: &Window<SleepSample>) -> Vec<AlertRequest> {
    let Some(latest) = window.latest() else {
        return Vec::new();
    };

    let total = latest.total_sleep_hours;
    let mut alerts = Vec::new();

    // Only judged once three nights exist; shorter windows emit nothing here.
    // A rejected night inside the span breaks the streak.
    if total < MIN_SLEEP_HOURS && window.len() >= CHRONIC_NIGHTS {
        let recent: Option<Vec<f64>> = window
            .tail(CHRONIC_NIGHTS)
            .iter()
            .map(|n| n.as_ref().map(|n| n.total_sleep_hours))
            .collect();
        let chronic = recent.filter(|hours| hours.iter().all(|h| *h < MIN_SLEEP_HOURS));
        if let Some(hours) = chronic {
            let average = hours.iter().sum::<f64>() / CHRONIC_NIGHTS as f64;
            alerts.push(AlertRequest::new(
                AlertType::Sleep,
                Severity::High,
                "Chronic Sleep Deprivation",
                format!(
                    "You slept less than {} hours for {} consecutive nights. \
                     Chronic sleep deprivation raises cardiovascular risk by 48%.",
                    MIN_SLEEP_HOURS, CHRONIC_NIGHTS
                ),
                json!({
                    "latestSleep": total,
                    "avgSleep": average,
                    "nights": CHRONIC_NIGHTS,
                }),
            ));
        } else {
            alerts.push(AlertRequest::new(
                AlertType::Sleep,
                Severity::Moderate,
                "Insufficient Sleep",
                format!(
                    "Only {:.1} hours of sleep. 7-9 hours is ideal for proper cardiovascular recovery.",
                    total
                ),
                json!({ "totalSleep": total, "recommended": RECOMMENDED_HOURS }),
            ));
        }
    }

    if total > 0.0 {
        if let Some(rem) = latest.rem_hours {
            let percent = rem / total * 100.0;
            if percent < MIN_REM_PERCENT {
                alerts.push(AlertRequest::new(
                    AlertType::Sleep,
                    Severity::Moderate,
                    "Reduced REM Sleep",
                    format!(
                        "REM sleep at only {:.1}% (ideal: 20-25%). REM is essential for cardiovascular recovery.",
                        percent
                    ),
                    json!({ "remPercentage": percent, "remHours": rem }),
                ));
            }
        }

        if let Some(deep) = latest.deep_hours {
            let percent = deep / total * 100.0;
            if percent < MIN_DEEP_PERCENT {
                alerts.push(AlertRequest::new(
                    AlertType::Sleep,
                    Severity::Moderate,
                    "Insufficient Deep Sleep",
                    format!(
                        "Deep sleep at only {:.1}% (ideal: 15-20%). Deep sleep is crucial for \
                         nighttime blood pressure regulation.",
                        percent
                    ),
                    json!({ "deepPercentage": percent, "deepHours": deep }),
                ));
            }
        }
    }

    if latest.awakenings > MAX_AWAKENINGS {
        alerts.push(AlertRequest::new(
            AlertType::Sleep,
            Severity::Moderate,
            "Fragmented Sleep",
            format!(
                "{} awakenings during the night. Sleep fragmentation is associated with \
                 hypertension and may indicate sleep apnea.",
                latest.awakenings
            ),
            json!({ "awakenings": latest.awakenings, "threshold": MAX_AWAKENINGS }),
        ));
    }

    debug!("Sleep of {}h produced {} alerts", total, alerts.len());
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::day;

    fn nights(hours: &[f64]) -> Vec<SleepSample> {
        hours
            .iter()
            .enumerate()
            .map(|(i, h)| SleepSample::new(day(i as i64), *h))
            .collect()
    }

    #[test]
    fn test_empty_window() {
        assert!(evaluate(&Window::default()).is_empty());
    }

    #[test]
    fn test_chronic_deprivation() {
        let alerts = evaluate(&nights(&[7.5, 5.0, 5.5, 4.5]).into());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::High);
        assert_eq!(alerts[0].title, "Chronic Sleep Deprivation");
        assert_eq!(alerts[0].data["nights"], 3);
        assert_eq!(alerts[0].data["avgSleep"], 5.0);
    }

    #[test]
    fn test_single_short_night_with_history() {
        let alerts = evaluate(&nights(&[7.0, 8.0, 5.25]).into());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::Moderate);
        assert_eq!(alerts[0].title, "Insufficient Sleep");
        assert!(alerts[0].message.contains("5.2 hours") || alerts[0].message.contains("5.3 hours"));
    }

    #[test]
    fn test_short_night_without_history_is_silent() {
        assert!(evaluate(&nights(&[5.0]).into()).is_empty());
        assert!(evaluate(&nights(&[4.0, 5.0]).into()).is_empty());
    }

    #[test]
    fn test_rejected_night_breaks_chronic_streak() {
        let mut slots: Vec<Option<SleepSample>> = nights(&[5.0, 5.0, 7.5, 5.0])
            .into_iter()
            .map(Some)
            .collect();
        slots[2] = None;
        let window: Window<SleepSample> = slots.into_iter().collect();

        let alerts = evaluate(&window);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].title, "Insufficient Sleep");
        assert_eq!(alerts[0].severity, Severity::Moderate);
    }

    #[test]
    fn test_rejected_latest_night_is_silent() {
        let mut slots: Vec<Option<SleepSample>> =
            nights(&[4.0, 4.0, 4.0]).into_iter().map(Some).collect();
        slots.push(None);
        let window: Window<SleepSample> = slots.into_iter().collect();
        assert!(evaluate(&window).is_empty());
    }

    #[test]
    fn test_reduced_rem_and_deep() {
        let window = vec![SleepSample::new(day(0), 8.0).with_stages(Some(1.0), Some(0.5))];
        let alerts = evaluate(&window.into());
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].title, "Reduced REM Sleep");
        assert!(alerts[0].message.contains("12.5%"));
        assert_eq!(alerts[1].title, "Insufficient Deep Sleep");
        assert!(alerts[1].message.contains("6.2%") || alerts[1].message.contains("6.3%"));
        assert!(alerts.iter().all(|a| a.severity == Severity::Moderate));
    }

    #[test]
    fn test_healthy_stages() {
        let window = vec![SleepSample::new(day(0), 8.0).with_stages(Some(1.8), Some(1.4))];
        assert!(evaluate(&window.into()).is_empty());
    }

    #[test]
    fn test_zero_total_skips_stage_shares() {
        let window = vec![SleepSample::new(day(0), 0.0).with_stages(Some(0.0), Some(0.0))];
        assert!(evaluate(&window.into()).is_empty());
    }

    #[test]
    fn test_fragmented_sleep() {
        let window = vec![SleepSample::new(day(0), 7.5).with_awakenings(12)];
        let alerts = evaluate(&window.into());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].title, "Fragmented Sleep");
        assert_eq!(alerts[0].data["awakenings"], 12);

        let window = vec![SleepSample::new(day(0), 7.5).with_awakenings(10)];
        assert!(evaluate(&window.into()).is_empty());
    }

    #[test]
    fn test_all_rules_in_order() {
        let mut window = nights(&[5.0, 5.0]);
        window.push(
            SleepSample::new(day(2), 4.0)
                .with_stages(Some(0.4), Some(0.2))
                .with_awakenings(15),
        );
        let titles: Vec<_> = evaluate(&window.into()).into_iter().map(|a| a.title).collect();
        assert_eq!(
            titles,
            vec![
                "Chronic Sleep Deprivation",
                "Reduced REM Sleep",
                "Insufficient Deep Sleep",
                "Fragmented Sleep",
            ]
        );
    }
}
