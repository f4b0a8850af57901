//! Demo server binary.
//!
//! A thin wrapper around the `ga_reporter` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line argument parsing
//! - Logger initialization
//! - Serving a small axum app with every request reported
//!
//! All reporting functionality is implemented in the library crate.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use log::info;

use ga_reporter::config::{DEFAULT_ENDPOINT, DEFAULT_PORT, ENDPOINT_ENV, TRACKING_ID_ENV};
use ga_reporter::initialization::init_logger_with;
use ga_reporter::{with_reporting, LogFormat, LogLevel, LogSink, Reporter, ReporterConfig};

/// Serve a demo app that reports every request to Google Analytics.
#[derive(Debug, Parser)]
#[command(name = "ga_reporter", version, about)]
struct Opt {
    /// Port to listen on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,

    /// Tracking identifier (reporting is disabled when unset)
    #[arg(long, env = TRACKING_ID_ENV)]
    tracking_id: Option<String>,

    /// Collection endpoint
    #[arg(long, env = ENDPOINT_ENV, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    log_format: LogFormat,
}

async fn index() -> &'static str {
    "ga_reporter demo\n"
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "not found\n")
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; a missing file is not an error
    let _ = dotenvy::dotenv();

    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    let config = ReporterConfig {
        id: opt.tracking_id.clone(),
        endpoint: opt.endpoint.clone(),
        log: LogSink::default(),
        ..Default::default()
    };
    if config.is_enabled() {
        info!("Reporting hits to {}", config.endpoint);
    }
    let reporter = Reporter::new(config).context("Failed to initialize reporter")?;

    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .fallback(not_found);
    let app = with_reporting(app, reporter);

    let addr = format!("{}:{}", opt.bind, opt.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}/", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
