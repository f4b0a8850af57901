//! Delivery error categorization.

use super::types::{DeliveryFailure, ReportError};

/// Categorizes a `reqwest::Error` into a `DeliveryFailure`.
///
/// Status codes are checked first, then the reqwest error kind.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> DeliveryFailure {
    if let Some(status) = error.status() {
        return categorize_status(status.as_u16());
    }

    if error.is_builder() {
        DeliveryFailure::Builder
    } else if error.is_timeout() {
        DeliveryFailure::Timeout
    } else if error.is_connect() {
        DeliveryFailure::Connect
    } else if error.is_request() {
        DeliveryFailure::Request
    } else if error.is_body() || error.is_decode() {
        DeliveryFailure::Body
    } else {
        DeliveryFailure::Other
    }
}

/// Categorizes a non-2xx collector status.
pub fn categorize_status(status: u16) -> DeliveryFailure {
    match status {
        400..=499 => DeliveryFailure::ClientStatus,
        500..=599 => DeliveryFailure::ServerStatus,
        _ => DeliveryFailure::Other,
    }
}

/// Categorizes any `ReportError`.
pub fn categorize_report_error(error: &ReportError) -> DeliveryFailure {
    match error {
        ReportError::InvalidEndpoint { .. } => DeliveryFailure::InvalidEndpoint,
        ReportError::Transport(e) => categorize_reqwest_error(e),
        ReportError::CollectorStatus(status) => categorize_status(*status),
    }
}
