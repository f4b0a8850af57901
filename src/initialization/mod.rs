//! Shared resource setup.
//!
//! This module provides functions to initialize:
//! - The outbound HTTP client used to send hits
//! - The `env_logger` backend for the binary
//!
//! All initialization functions return `InitializationError` on failure.

mod client;
mod logger;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
