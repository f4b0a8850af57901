//! ga_reporter library: request reporting to Google Analytics
//!
//! This library reports handled HTTP requests as Measurement Protocol hits.
//! Successful responses become pageview hits carrying the server response
//! time; responses with status 400 or above become exception hits. Hits are
//! sent fire-and-forget: delivery failures are counted and dropped, never
//! returned to the caller.
//!
//! # Example
//!
//! ```no_run
//! use axum::{routing::get, Router};
//! use ga_reporter::{with_reporting, Reporter, ReporterConfig};
//! use std::net::SocketAddr;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let reporter = Reporter::new(ReporterConfig::from_env())?;
//! let app = with_reporting(Router::new().route("/", get(|| async { "ok" })), reporter);
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! `Reporter::spawn` and the middleware require a Tokio runtime.

#![warn(missing_docs)]

pub mod config;
pub mod error_handling;
pub mod hit;
pub mod initialization;
pub mod middleware;
mod report;

// Re-export public API
pub use config::{LogFormat, LogLevel, LogSink, ReporterConfig};
pub use error_handling::{DeliveryFailure, DeliveryStats, InitializationError};
pub use hit::{Hit, HitType};
pub use middleware::{report_requests, with_reporting};
pub use report::{ConnInfo, ReportInput, Reporter, RequestInfo, ResponseInfo};
