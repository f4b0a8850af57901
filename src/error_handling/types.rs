//! Error type definitions.
//!
//! This module defines the initialization errors returned by the public API and
//! the delivery errors that stay inside the reporter.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::{EnumIter as EnumIterMacro, IntoStaticStr};
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Failure to deliver one hit.
///
/// Never returned to callers of `Reporter::report`; it is categorized, counted
/// and logged, then dropped.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The configured endpoint is not a valid absolute URL.
    #[error("Invalid collection endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        /// The endpoint as configured
        endpoint: String,
        /// Why it failed to parse
        #[source]
        source: url::ParseError,
    },

    /// The request could not be sent or its response could not be read.
    #[error("Transport error: {0}")]
    Transport(#[from] ReqwestError),

    /// The collector answered with a non-2xx status.
    #[error("Collector responded with HTTP {0}")]
    CollectorStatus(u16),
}

/// Categories of delivery failures, used for statistics and log labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum DeliveryFailure {
    /// Endpoint is not a valid absolute URL
    InvalidEndpoint,
    /// Request could not be built
    Builder,
    /// Connection to the collector failed
    Connect,
    /// Transport timed out
    Timeout,
    /// Request failed while being sent
    Request,
    /// Response body could not be read
    Body,
    /// Collector answered 4xx
    ClientStatus,
    /// Collector answered 5xx
    ServerStatus,
    /// Anything else, including unexpected statuses
    Other,
}

impl DeliveryFailure {
    /// Short label used in log lines.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}
