//! Alert Routes

use alerting::{Alert, Severity};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::SharedState;

/// Query parameters for the active alerts endpoint
#[derive(Debug, Deserialize)]
pub struct AlertQuery {
    /// Filter by severity
    pub severity: Option<String>,
    /// Maximum number of records
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Query parameters for the priority endpoint
#[derive(Debug, Deserialize)]
pub struct PriorityQuery {
    #[serde(default = "default_priority_limit")]
    pub limit: usize,
}

/// Query parameters for the history endpoint
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

fn default_priority_limit() -> usize {
    3
}

fn default_history_limit() -> usize {
    alerting::HISTORY_LIMIT
}

/// Response for alert list endpoints
#[derive(Debug, Serialize)]
pub struct AlertResponse {
    pub data: Vec<Alert>,
    pub count: usize,
    pub unacknowledged_count: usize,
}

impl AlertResponse {
    fn from_alerts<'a>(alerts: impl IntoIterator<Item = &'a Alert>, limit: usize) -> Self {
        let data: Vec<Alert> = alerts.into_iter().take(limit).cloned().collect();
        Self {
            count: data.len(),
            unacknowledged_count: data.iter().filter(|a| !a.acknowledged).count(),
            data,
        }
    }
}

/// Response for acknowledge and dismiss
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub id: String,
    pub updated: bool,
}

/// Response for clearing active alerts
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub cleared: usize,
}

/// Get active alerts
pub async fn get_alerts(
    State(state): State<SharedState>,
    Query(params): Query<AlertQuery>,
) -> Result<Json<AlertResponse>, ApiError> {
    let severity = params
        .severity
        .as_deref()
        .map(str::parse::<Severity>)
        .transpose()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let state = state.read().await;
    let alerts = state.monitor.store().get_active(severity);
    Ok(Json(AlertResponse::from_alerts(alerts, params.limit)))
}

/// Get critical and high active alerts in creation order
pub async fn get_priority(
    State(state): State<SharedState>,
    Query(params): Query<PriorityQuery>,
) -> Json<AlertResponse> {
    let state = state.read().await;
    let alerts = state.monitor.store().priority(params.limit);
    Json(AlertResponse::from_alerts(alerts, params.limit))
}

/// Get alert history, newest first
pub async fn get_history(
    State(state): State<SharedState>,
    Query(params): Query<HistoryQuery>,
) -> Json<AlertResponse> {
    let state = state.read().await;
    let alerts = state.monitor.store().history();
    Json(AlertResponse::from_alerts(alerts, params.limit))
}

/// Get one alert by id, active or historical
pub async fn get_alert(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Alert>, ApiError> {
    let state = state.read().await;
    state
        .monitor
        .store()
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Alert not found: {}", id)))
}

/// Acknowledge an active alert
pub async fn acknowledge(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Json<UpdateResponse> {
    let mut state = state.write().await;
    let updated = state.monitor.store_mut().acknowledge(&id);
    Json(UpdateResponse { id, updated })
}

/// Dismiss an active alert
pub async fn dismiss(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Json<UpdateResponse> {
    let mut state = state.write().await;
    let updated = state.monitor.store_mut().dismiss(&id);
    Json(UpdateResponse { id, updated })
}

/// Clear every active alert, history untouched
pub async fn clear_all(State(state): State<SharedState>) -> Json<ClearResponse> {
    let mut state = state.write().await;
    let cleared = state.monitor.store().active_count();
    state.monitor.store_mut().clear_all();
    info!("Cleared {} active alerts via API", cleared);
    Json(ClearResponse { cleared })
}
