//! Error handling and delivery statistics.
//!
//! This module provides:
//! - Error type definitions (initialization and delivery)
//! - Delivery failure categorization
//! - Delivery statistics tracking
//!
//! Delivery errors never leave the reporter: they are categorized, counted and
//! logged at debug level, then dropped.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_report_error, categorize_reqwest_error, categorize_status};
pub use stats::DeliveryStats;
pub use types::{DeliveryFailure, InitializationError, ReportError};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_delivery_stats_initialization() {
        let stats = DeliveryStats::new();
        for failure in DeliveryFailure::iter() {
            assert_eq!(stats.failure_count(failure), 0);
        }
        assert_eq!(stats.sent(), 0);
        assert_eq!(stats.disabled(), 0);
        assert_eq!(stats.total_failures(), 0);
    }

    #[test]
    fn test_delivery_stats_increment() {
        let stats = DeliveryStats::new();
        stats.record_sent();
        stats.record_disabled();
        stats.record_failure(DeliveryFailure::Connect);
        stats.record_failure(DeliveryFailure::Connect);
        stats.record_failure(DeliveryFailure::ServerStatus);

        assert_eq!(stats.sent(), 1);
        assert_eq!(stats.disabled(), 1);
        assert_eq!(stats.failure_count(DeliveryFailure::Connect), 2);
        assert_eq!(stats.failure_count(DeliveryFailure::ServerStatus), 1);
        assert_eq!(stats.total_failures(), 3);
    }

    #[test]
    fn test_delivery_failure_labels() {
        assert_eq!(DeliveryFailure::InvalidEndpoint.as_str(), "invalid_endpoint");
        assert_eq!(DeliveryFailure::ServerStatus.as_str(), "server_status");
        assert_eq!(DeliveryFailure::Connect.as_str(), "connect");
    }

    #[test]
    fn test_delivery_stats_concurrent_increments() {
        use std::sync::Arc;

        let stats = Arc::new(DeliveryStats::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let stats = Arc::clone(&stats);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        stats.record_sent();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(stats.sent(), 800);
    }
}
