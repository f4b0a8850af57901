//! Reporter configuration and constants.
//!
//! This module provides:
//! - Protocol constants and defaults (endpoint, field limits, env var names)
//! - The immutable `ReporterConfig` and its injected `LogSink`
//! - Log level/format options for the binary

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{LogFormat, LogLevel, LogSink, ReporterConfig};
