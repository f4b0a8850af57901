//! Measurement Protocol field codes and value mapping.
//!
//! Each helper maps one piece of request/response/timing data to the string
//! value of a protocol field.

use std::time::Instant;

use reqwest::StatusCode;

use crate::config::{
    EXCEPTION_STATUS_THRESHOLD, FATAL_STATUS_THRESHOLD, MAX_EXCEPTION_DESCRIPTION_CHARS,
};
use crate::report::ResponseInfo;

use super::HitType;

/// Protocol version
pub const VERSION: &str = "v";
/// Tracking identifier
pub const TRACKING_ID: &str = "tid";
/// Hit type
pub const HIT_TYPE: &str = "t";
/// Client identifier
pub const CLIENT_ID: &str = "cid";
/// IP override
pub const IP_OVERRIDE: &str = "uip";
/// Document location URL
pub const DOCUMENT_LOCATION: &str = "dl";
/// Server response time, pageview only
pub const SERVER_RESPONSE_TIME: &str = "srt";
/// Exception description, exception only
pub const EXCEPTION_DESCRIPTION: &str = "exd";
/// Exception fatal flag, exception only
pub const EXCEPTION_FATAL: &str = "exf";
/// Queue time
pub const QUEUE_TIME: &str = "qt";

/// Picks the hit type for a response status.
pub fn hit_type_for_status(status: u16) -> HitType {
    if status >= EXCEPTION_STATUS_THRESHOLD {
        HitType::Exception
    } else {
        HitType::Pageview
    }
}

/// `"1"` for server errors, `"0"` otherwise.
pub fn exception_fatal(status: u16) -> &'static str {
    if status >= FATAL_STATUS_THRESHOLD {
        "1"
    } else {
        "0"
    }
}

/// Describes a failed response.
///
/// Prefers a textual body summary when the caller supplied one, then the
/// canonical reason phrase for the status, then an empty string. Whitespace is
/// collapsed and the result is capped at `MAX_EXCEPTION_DESCRIPTION_CHARS`.
pub fn exception_description(response: &ResponseInfo) -> String {
    let summary = response
        .body_summary
        .as_deref()
        .filter(|_| is_textual(response.content_type.as_deref()))
        .map(collapse_whitespace)
        .filter(|s| !s.is_empty());

    let description = summary.unwrap_or_else(|| {
        StatusCode::from_u16(response.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or_default()
            .to_string()
    });

    truncate_chars(description, MAX_EXCEPTION_DESCRIPTION_CHARS)
}

/// Whole milliseconds from `start` to `end`, zero if `end` is earlier.
pub fn elapsed_millis(start: Instant, end: Instant) -> u128 {
    end.saturating_duration_since(start).as_millis()
}

/// Generates a fresh client id in UUID v4 text form.
pub fn generate_client_id() -> String {
    let mut bytes: [u8; 16] = rand::random();
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}

fn is_textual(content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return true;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime.starts_with("text/") || mime.ends_with("json") || mime.ends_with("xml")
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_chars(s: String, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s,
    }
}
