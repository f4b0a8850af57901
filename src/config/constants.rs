//! Configuration constants.
//!
//! This module defines the protocol constants, defaults and environment variable
//! names used throughout the reporter.

/// Default collection endpoint (Measurement Protocol v1 collector)
pub const DEFAULT_ENDPOINT: &str = "https://www.google-analytics.com/collect";

/// Measurement Protocol version sent in the `v` field
pub const PROTOCOL_VERSION: &str = "1";

/// Environment variable holding the tracking identifier (e.g. `UA-XXXX-Y`)
pub const TRACKING_ID_ENV: &str = "GA_TRACKING_ID";

/// Environment variable overriding the collection endpoint
pub const ENDPOINT_ENV: &str = "GA_ENDPOINT";

/// Message sent to the log sink on every call while no tracking identifier is configured.
pub const DISABLED_MESSAGE: &str =
    "GA_TRACKING_ID environment variable not set. Google Analytics reporting disabled.";

/// Maximum exception description length in characters.
/// The collector rejects `exd` values longer than 150 bytes.
pub const MAX_EXCEPTION_DESCRIPTION_CHARS: usize = 150;

/// Status codes at or above this value are reported as exception hits
pub const EXCEPTION_STATUS_THRESHOLD: u16 = 400;
/// Status codes at or above this value mark the exception as fatal (`exf=1`)
pub const FATAL_STATUS_THRESHOLD: u16 = 500;

/// Default User-Agent for outbound hits
pub const DEFAULT_USER_AGENT: &str = concat!("ga_reporter/", env!("CARGO_PKG_VERSION"));

/// Content type of the hit payload
pub const HIT_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Cookie carrying a prior client id (`GA1.<depth>.<cid>`)
pub const CLIENT_ID_COOKIE: &str = "_ga";

/// Host used when rebuilding a request URL that carries no `Host` header
pub const FALLBACK_HOST: &str = "localhost";

/// Default port for the demo server binary
pub const DEFAULT_PORT: u16 = 8080;
