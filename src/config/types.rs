//! Configuration types.
//!
//! This module defines the reporter configuration, the injected log sink, and
//! the logging options used by the binary.

use std::fmt;
use std::sync::Arc;

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_ENDPOINT, DEFAULT_USER_AGENT, ENDPOINT_ENV, TRACKING_ID_ENV,
};

/// Logging level for the binary.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Destination for the reporter's diagnostic messages.
///
/// The sink is passed in through `ReporterConfig` rather than looked up
/// globally, so callers (and tests) decide where diagnostics go.
#[derive(Clone)]
pub struct LogSink(Arc<dyn Fn(&str) + Send + Sync>);

impl LogSink {
    /// Wraps a closure as a log sink.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// A sink that discards every message.
    pub fn noop() -> Self {
        Self::new(|_| {})
    }

    /// Sends one message to the sink.
    pub fn log(&self, msg: &str) {
        (self.0)(msg)
    }
}

impl Default for LogSink {
    /// Forwards messages to the `log` facade at warn level.
    fn default() -> Self {
        Self::new(|msg| log::warn!("{}", msg))
    }
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LogSink")
    }
}

/// Reporter configuration.
///
/// Created once at setup and shared read-only by every report call.
///
/// # Examples
///
/// ```
/// use ga_reporter::ReporterConfig;
///
/// let config = ReporterConfig {
///     id: Some("UA-XXXX-Y".to_string()),
///     ..Default::default()
/// };
/// assert!(config.is_enabled());
/// ```
#[derive(Debug, Clone)]
pub struct ReporterConfig {
    /// Tracking identifier. `None` disables reporting.
    pub id: Option<String>,

    /// Collection endpoint URL
    pub endpoint: String,

    /// Sink for diagnostic messages
    pub log: LogSink,

    /// User-Agent sent with each hit
    pub user_agent: String,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            id: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            log: LogSink::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ReporterConfig {
    /// Builds a configuration from `GA_TRACKING_ID` and `GA_ENDPOINT`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();
        Self {
            id: non_blank(TRACKING_ID_ENV),
            endpoint: non_blank(ENDPOINT_ENV).unwrap_or(defaults.endpoint),
            ..defaults
        }
    }

    /// Returns the tracking identifier if reporting is enabled.
    ///
    /// Surrounding whitespace is trimmed; a blank id counts as unset.
    pub fn tracking_id(&self) -> Option<&str> {
        self.id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// Whether hits will be sent at all.
    pub fn is_enabled(&self) -> bool {
        self.tracking_id().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_default_config_is_disabled() {
        let config = ReporterConfig::default();
        assert!(config.id.is_none());
        assert!(!config.is_enabled());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_empty_id_counts_as_disabled() {
        let config = ReporterConfig {
            id: Some(String::new()),
            ..Default::default()
        };
        assert!(!config.is_enabled());
        assert_eq!(config.tracking_id(), None);
    }

    #[test]
    fn test_whitespace_id_counts_as_disabled() {
        // Ids set directly (e.g. from clap's env fallback) bypass from_lookup
        let config = ReporterConfig {
            id: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(!config.is_enabled());
        assert_eq!(config.tracking_id(), None);
    }

    #[test]
    fn test_tracking_id_is_trimmed() {
        let config = ReporterConfig {
            id: Some(" UA-XXXX-Y\n".to_string()),
            ..Default::default()
        };
        assert_eq!(config.tracking_id(), Some("UA-XXXX-Y"));
    }

    #[test]
    fn test_from_lookup_reads_id_and_endpoint() {
        let vars: HashMap<&str, &str> = [
            (TRACKING_ID_ENV, "UA-XXXX-Y"),
            (ENDPOINT_ENV, "http://127.0.0.1:9999/collect"),
        ]
        .into_iter()
        .collect();

        let config = ReporterConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.tracking_id(), Some("UA-XXXX-Y"));
        assert_eq!(config.endpoint, "http://127.0.0.1:9999/collect");
    }

    #[test]
    fn test_from_lookup_blank_values_fall_back() {
        let config = ReporterConfig::from_lookup(|_| Some("   ".to_string()));
        assert!(config.id.is_none());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_log_sink_receives_messages() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let sink = LogSink::new(move |msg| seen_clone.lock().unwrap().push(msg.to_string()));

        sink.log("first");
        sink.clone().log("second");

        assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_noop_sink_does_not_panic() {
        LogSink::noop().log("ignored");
        assert_eq!(format!("{:?}", LogSink::noop()), "LogSink");
    }
}
