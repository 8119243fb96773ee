//! Batch Ingestion Route

use alerting::Alert;
use axum::{extract::State, Json};
use biometrics::{BiometricBatch, Metric, RejectedSample};
use evaluators::RiskAssessment;
use serde::Serialize;

use crate::telemetry::record_batch;
use crate::SharedState;

/// A sample dropped by validation
#[derive(Debug, Serialize)]
pub struct RejectedRecord {
    pub metric: Metric,
    pub index: usize,
    pub reason: String,
}

impl From<RejectedSample> for RejectedRecord {
    fn from(sample: RejectedSample) -> Self {
        Self {
            metric: sample.metric,
            index: sample.index,
            reason: sample.error.to_string(),
        }
    }
}

/// Response for batch processing
#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub created: Vec<Alert>,
    pub rejected: Vec<RejectedRecord>,
    pub risk: RiskAssessment,
}

/// Validate and evaluate a batch, creating its alerts
pub async fn post_batch(
    State(state): State<SharedState>,
    Json(batch): Json<BiometricBatch>,
) -> Json<BatchResponse> {
    let mut state = state.write().await;
    let report = state.monitor.process_batch(&batch);
    record_batch(report.rejected.len(), state.monitor.store().active_count());

    Json(BatchResponse {
        created: report.created,
        rejected: report.rejected.into_iter().map(RejectedRecord::from).collect(),
        risk: report.assessment,
    })
}
