//! Health Alerts API Server
//!
//! REST API over the health monitor: batch ingestion, alert queries and
//! lifecycle actions, service health, and Prometheus metrics.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_governor::GovernorLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod config;
mod error;
pub mod rate_limit;
mod routes;
pub mod telemetry;

pub use config::{AppConfig, ConfigError, LoggingConfig};
pub use error::ApiError;

use alerting::{AlertPersistence, AlertStore, LogNotifier};
use biometrics::BatchValidator;
use evaluators::HealthMonitor;
use storage::{AlertRepository, FileBackend, MemoryBackend, StorageError};

/// Application state shared across handlers
pub struct AppState {
    pub monitor: HealthMonitor,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
    /// Prometheus renderer, when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(monitor: HealthMonitor) -> Self {
        Self {
            monitor,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// State handle passed to every handler
pub type SharedState = Arc<RwLock<AppState>>;

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: i64,
    pub version: String,
    pub uptime_seconds: u64,
    pub alerts: AlertCounts,
    pub persistence: PersistenceStatus,
}

/// Alert store counters
#[derive(Debug, Serialize)]
pub struct AlertCounts {
    pub active: usize,
    pub unacknowledged: usize,
    pub history: usize,
}

/// Persistence health
#[derive(Debug, Serialize)]
pub struct PersistenceStatus {
    pub status: String,
    pub last_error: Option<String>,
}

/// Build the health monitor described by `config`.
///
/// Alerts are persisted as JSON files when a data directory is set, and
/// kept in memory otherwise.
pub fn build_monitor(config: &AppConfig) -> Result<HealthMonitor, StorageError> {
    let persistence: Box<dyn AlertPersistence> = match &config.storage.data_dir {
        Some(dir) => {
            info!("Persisting alerts under {}", dir.display());
            Box::new(AlertRepository::new(FileBackend::open(dir)?))
        }
        None => {
            info!("No data directory configured, alerts are kept in memory");
            Box::new(AlertRepository::new(MemoryBackend::new()))
        }
    };

    let mut store = AlertStore::open(persistence).with_notifier(Box::new(LogNotifier));
    store.subscribe(telemetry::MetricsObserver);

    Ok(HealthMonitor::new(
        store,
        BatchValidator::new(config.validation.clone()),
    ))
}

/// Create the application router
pub fn create_router(state: SharedState, config: &AppConfig) -> Router {
    let mut ingest = Router::new().route("/api/v1/batches", post(routes::batches::post_batch));
    if let Some(governor) = rate_limit::create_governor_config(&config.rate_limit) {
        ingest = ingest.layer(GovernorLayer { config: governor });
    }

    let mut router = Router::new()
        .route("/api/v1/health", get(health_handler))
        .route(
            "/api/v1/alerts",
            get(routes::alerts::get_alerts).delete(routes::alerts::clear_all),
        )
        .route("/api/v1/alerts/priority", get(routes::alerts::get_priority))
        .route("/api/v1/alerts/history", get(routes::alerts::get_history))
        .route("/api/v1/alerts/:id", get(routes::alerts::get_alert))
        .route(
            "/api/v1/alerts/:id/acknowledge",
            post(routes::alerts::acknowledge),
        )
        .route("/api/v1/alerts/:id/dismiss", post(routes::alerts::dismiss))
        .route("/metrics", get(metrics_handler))
        .merge(ingest)
        .layer(TraceLayer::new_for_http());

    if config.server.cors_permissive {
        router = router.layer(CorsLayer::permissive());
    }

    router.with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    let store = state.monitor.store();
    let last_error = store.last_persistence_error().map(|e| e.to_string());

    let response = HealthResponse {
        status: if last_error.is_some() { "degraded" } else { "healthy" }.to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        alerts: AlertCounts {
            active: store.active_count(),
            unacknowledged: store.unacknowledged_count(),
            history: store.history().len(),
        },
        persistence: PersistenceStatus {
            status: if last_error.is_some() { "error" } else { "ok" }.to_string(),
            last_error,
        },
    };

    Json(response)
}

/// Prometheus exposition handler
async fn metrics_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics recorder not installed".to_string(),
        ),
    }
}

/// Initialize logging. `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))
}

/// Run the server until it fails
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    let monitor = build_monitor(&config)?;
    let handle = telemetry::install_recorder()?;
    let state = Arc::new(RwLock::new(AppState::new(monitor).with_metrics(handle)));
    let app = create_router(state, &config);

    info!("Starting API server on {}", config.server.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
