//! Prometheus Metrics

use alerting::{Alert, AlertObserver};
use metrics::{counter, gauge};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Counts every created alert by type and severity
pub struct MetricsObserver;

impl AlertObserver for MetricsObserver {
    fn on_alert(&self, alert: &Alert) {
        counter!(
            "health_alerts_created_total",
            "type" => alert.alert_type.as_str(),
            "severity" => alert.severity.as_str()
        )
        .increment(1);
    }
}

/// Record one processed batch and its rejected samples
pub fn record_batch(rejected: usize, active: usize) {
    counter!("health_batches_processed_total").increment(1);
    if rejected > 0 {
        counter!("health_samples_rejected_total").increment(rejected as u64);
    }
    gauge!("health_active_alerts").set(active as f64);
}

/// Install the global Prometheus recorder
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}
