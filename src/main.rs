//! Attendance engine HTTP server.
//!
//! Reads the configuration from `ATTENDANCE_CONFIG` (default
//! `config/attendance.yaml`) and serves the API on `server.bind_addr`.

use std::env;

use attendance_engine::api::{AppState, create_router};
use attendance_engine::config::ConfigLoader;
use attendance_engine::engine::AttendanceEngine;
use tracing::{Level, info, warn};

const DEFAULT_CONFIG_PATH: &str = "config/attendance.yaml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = env::var("ATTENDANCE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = ConfigLoader::load(&config_path)?.into_config();

    let level = config.server.log_level.parse::<Level>();
    tracing_subscriber::fmt()
        .with_max_level(*level.as_ref().unwrap_or(&Level::INFO))
        .with_target(false)
        .init();
    if level.is_err() {
        warn!(log_level = %config.server.log_level, "Unknown log level, using info");
    }

    let bind_addr = config.server.bind_addr.clone();
    let engine = AttendanceEngine::new(config)?;
    let app = create_router(AppState::new(engine));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(config = %config_path, "Listening on http://{}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
