//! Health Alerts Service - Main Entry Point
//!
//! Usage: `health-alerts [CONFIG]`. The config path may also be given with
//! `HEALTH_ALERTS_CONFIG`; without either, `config/health-alerts` is tried.

use anyhow::Context;
use api::{init_logging, run_server, AppConfig};
use tracing::info;

const DEFAULT_CONFIG: &str = "config/health-alerts";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("HEALTH_ALERTS_CONFIG").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());

    let config = AppConfig::load(Some(&path))
        .with_context(|| format!("loading configuration from {}", path))?;
    init_logging(&config.logging)?;

    info!("=== Health Alerts v{} ===", env!("CARGO_PKG_VERSION"));

    run_server(config).await
}
