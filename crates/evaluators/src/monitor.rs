//! Batch Health Monitor

use crate::composite::RiskAssessment;
use crate::{blood_pressure, composite, heart_rate, hrv, sleep, spo2};
use alerting::{Alert, AlertRequest, AlertStore};
use biometrics::{BatchValidator, BiometricBatch, RejectedSample, ScreenedBatch};
use tracing::info;

/// Outcome of processing one batch
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Alerts created, in evaluation order
    pub created: Vec<Alert>,
    /// Samples rejected by validation
    pub rejected: Vec<RejectedSample>,
    /// Composite score of the validated batch, whether or not it alerted
    pub assessment: RiskAssessment,
}

/// Runs every evaluator over a batch and records the results in its store
pub struct HealthMonitor {
    store: AlertStore,
    validator: BatchValidator,
}

impl HealthMonitor {
    pub fn new(store: AlertStore, validator: BatchValidator) -> Self {
        Self { store, validator }
    }

    pub fn store(&self) -> &AlertStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut AlertStore {
        &mut self.store
    }

    /// Alert requests for a batch without touching any store, every sample
    /// taken as valid.
    pub fn evaluate(batch: &BiometricBatch) -> Vec<AlertRequest> {
        Self::evaluate_screened(&ScreenedBatch::from(batch))
    }

    /// Alert requests for a validated batch: heart rate, HRV, sleep, SpO2,
    /// blood pressure, then the composite score.
    pub fn evaluate_screened(batch: &ScreenedBatch) -> Vec<AlertRequest> {
        let mut requests = heart_rate::evaluate(&batch.heart_rate);
        requests.extend(hrv::evaluate(&batch.hrv));
        requests.extend(sleep::evaluate(&batch.sleep));
        requests.extend(spo2::evaluate(&batch.spo2));
        requests.extend(blood_pressure::evaluate(&batch.blood_pressure));
        requests.extend(composite::evaluate(batch));
        requests
    }

    /// Validate a batch, evaluate it, and create the resulting alerts
    pub fn process_batch(&mut self, batch: &BiometricBatch) -> BatchReport {
        let validation = self.validator.validate(batch);
        let requests = Self::evaluate_screened(&validation.batch);
        let assessment = RiskAssessment::assess(&validation.batch);

        let created: Vec<Alert> = requests
            .into_iter()
            .map(|request| self.store.submit(request))
            .collect();

        info!(
            "Processed batch of {} samples: {} alerts created, {} samples rejected",
            batch.sample_count(),
            created.len(),
            validation.rejected.len()
        );

        BatchReport {
            created,
            rejected: validation.rejected,
            assessment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::day;
    use alerting::{AlertType, ManualClock, Severity};
    use biometrics::{
        BloodPressureSample, HeartRateSample, HrvSample, Metric, SleepSample, Spo2Sample,
    };
    use std::sync::{Arc, Mutex};
    use storage::{AlertRepository, MemoryBackend};

    fn monitor() -> HealthMonitor {
        let store = AlertStore::new(Box::new(AlertRepository::new(MemoryBackend::new())))
            .with_clock(Arc::new(ManualClock::new(day(10))));
        HealthMonitor::new(store, BatchValidator::default())
    }

    #[test]
    fn test_empty_batch_creates_nothing() {
        let mut monitor = monitor();
        let report = monitor.process_batch(&BiometricBatch::default());
        assert!(report.created.is_empty());
        assert!(report.rejected.is_empty());
        assert_eq!(monitor.store().active_count(), 0);
    }

    #[test]
    fn test_evaluation_order() {
        let batch = BiometricBatch {
            heart_rate: vec![HeartRateSample::new(day(0), 125.0, Some(90.0))],
            hrv: vec![
                HrvSample::new(day(0), Some(40.0), None),
                HrvSample::new(day(1), Some(15.0), None),
            ],
            sleep: vec![SleepSample::new(day(0), 7.5).with_awakenings(14)],
            spo2: vec![Spo2Sample::new(day(0), 88.0)],
            blood_pressure: vec![BloodPressureSample::new(day(0), 135.0, 85.0)],
        };

        let types: Vec<_> = HealthMonitor::evaluate(&batch)
            .into_iter()
            .map(|r| (r.alert_type, r.severity))
            .collect();

        assert_eq!(
            types,
            vec![
                (AlertType::HeartRate, Severity::Critical),
                (AlertType::Hrv, Severity::Critical),
                (AlertType::Sleep, Severity::Moderate),
                (AlertType::Spo2, Severity::High),
                (AlertType::BloodPressure, Severity::Moderate),
                // sdnn 15 (+30), resting 90 (+15), mean SpO2 88 (+15)
                (AlertType::Composite, Severity::Critical),
            ]
        );
    }

    #[test]
    fn test_process_batch_records_alerts() {
        let mut monitor = monitor();
        let seen = Arc::new(Mutex::new(0usize));
        let counter = seen.clone();
        monitor
            .store_mut()
            .subscribe(move |_: &Alert| *counter.lock().unwrap() += 1);

        let batch = BiometricBatch {
            hrv: vec![HrvSample::new(day(0), Some(15.0), None), HrvSample::new(day(1), Some(15.0), None)],
            heart_rate: vec![HeartRateSample::new(day(1), 65.0, Some(90.0))],
            ..Default::default()
        };

        let report = monitor.process_batch(&batch);
        let titles: Vec<_> = report.created.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Elevated Resting Heart Rate", "Critically Low HRV", "Multiple Risk Factors"]
        );

        let composite = &report.created[2];
        assert_eq!(composite.severity, Severity::High);
        assert_eq!(composite.data["riskScore"], 45);
        assert_eq!(report.assessment.score, 45);

        assert_eq!(monitor.store().get_active(None).len(), 3);
        assert_eq!(monitor.store().history()[0].id, composite.id);
        assert_eq!(*seen.lock().unwrap(), 3);
    }

    #[test]
    fn test_rejected_samples_are_skipped() {
        let mut monitor = monitor();
        let batch = BiometricBatch {
            spo2: vec![Spo2Sample::new(day(0), 104.0), Spo2Sample::new(day(0), 97.0)],
            heart_rate: vec![HeartRateSample::new(day(0), f64::NAN, None)],
            ..Default::default()
        };

        let report = monitor.process_batch(&batch);
        assert!(report.created.is_empty());
        assert_eq!(report.rejected.len(), 2);
        assert!(report.rejected.iter().any(|r| r.metric == Metric::Spo2 && r.index == 0));
        assert!(report.rejected.iter().any(|r| r.metric == Metric::HeartRate));
    }

    #[test]
    fn test_critical_readings_reach_the_store() {
        let mut monitor = monitor();
        let batch = BiometricBatch {
            spo2: vec![Spo2Sample::new(day(0), 45.0)],
            blood_pressure: vec![BloodPressureSample::new(day(0), 310.0, 130.0)],
            ..Default::default()
        };

        let report = monitor.process_batch(&batch);
        assert!(report.rejected.is_empty());
        let titles: Vec<_> = report.created.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Severe Hypoxemia Detected", "Hypertensive Crisis"]);
        assert!(report.created.iter().all(|a| a.severity == Severity::Critical));
        assert_eq!(HealthMonitor::evaluate(&batch).len(), report.created.len());
    }

    #[test]
    fn test_rejected_hrv_sample_keeps_decline_span() {
        let mut monitor = monitor();
        let sdnn = [100.0, 40.0, 600.0, 40.0, 40.0, 40.0, 40.0, 30.0];
        let batch = BiometricBatch {
            hrv: sdnn
                .iter()
                .enumerate()
                .map(|(i, s)| HrvSample::new(day(i as i64), Some(*s), None))
                .collect(),
            ..Default::default()
        };

        let report = monitor.process_batch(&batch);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].metric, Metric::Hrv);
        assert_eq!(report.rejected[0].index, 2);
        assert!(report.created.is_empty());
    }

    #[test]
    fn test_rejected_night_does_not_count_as_short() {
        let mut monitor = monitor();
        let batch = BiometricBatch {
            sleep: vec![
                SleepSample::new(day(0), 5.0),
                SleepSample::new(day(1), 5.0),
                SleepSample::new(day(2), 7.5).with_stages(Some(8.0), None),
                SleepSample::new(day(3), 5.0),
            ],
            ..Default::default()
        };

        let report = monitor.process_batch(&batch);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].index, 2);
        assert_eq!(report.created.len(), 1);
        assert_eq!(report.created[0].title, "Insufficient Sleep");
        assert_eq!(report.created[0].severity, Severity::Moderate);
    }

    #[test]
    fn test_rejected_latest_heart_rate_is_not_replaced() {
        let mut monitor = monitor();
        let batch = BiometricBatch {
            heart_rate: vec![
                HeartRateSample::new(day(0), 130.0, None),
                HeartRateSample::new(day(1), 72.0, Some(500.0)),
            ],
            ..Default::default()
        };

        let report = monitor.process_batch(&batch);
        assert_eq!(report.rejected.len(), 1);
        assert!(report.created.is_empty());
    }

    #[test]
    fn test_repeated_batches_accumulate() {
        let mut monitor = monitor();
        let batch = BiometricBatch {
            blood_pressure: vec![BloodPressureSample::new(day(0), 150.0, 95.0)],
            ..Default::default()
        };

        monitor.process_batch(&batch);
        monitor.process_batch(&batch);
        assert_eq!(monitor.store().get_active(Some(Severity::High)).len(), 2);
    }
}
