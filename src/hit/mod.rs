//! Analytics hits.
//!
//! A hit is an ordered, flat list of protocol field codes and string values.
//! It is built from one report input, stamped with its queue time right before
//! sending, and form-encoded as a single line.

pub mod fields;

use std::time::Instant;

use strum_macros::{AsRefStr, Display};
use url::form_urlencoded;

use crate::config::PROTOCOL_VERSION;
use crate::report::ReportInput;

/// Kind of hit sent for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum HitType {
    /// Successful or redirected response (status < 400)
    Pageview,
    /// Error response (status >= 400)
    Exception,
}

/// One analytics event, in wire order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hit {
    fields: Vec<(&'static str, String)>,
}

impl Hit {
    /// An empty hit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field. Later fields are encoded after earlier ones.
    pub fn push(&mut self, key: &'static str, value: impl Into<String>) {
        self.fields.push((key, value.into()));
    }

    /// Value of the first field named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Field codes in wire order.
    pub fn keys(&self) -> Vec<&'static str> {
        self.fields.iter().map(|(k, _)| *k).collect()
    }

    /// Adds the `qt` field, measured from `start` to `now`.
    pub fn stamp_queue_time(&mut self, start: Instant, now: Instant) {
        self.push(
            fields::QUEUE_TIME,
            fields::elapsed_millis(start, now).to_string(),
        );
    }

    /// Form-encodes the hit as one `key=value&...` line.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.fields.iter().map(|(k, v)| (*k, v.as_str())))
            .finish()
    }
}

/// Builds the hit for one request, without the queue time.
///
/// `ready` is when the response became available; it feeds `srt` on pageview
/// hits. Exception hits carry `exd` and `exf` instead.
pub fn build_hit(tracking_id: &str, input: &ReportInput, ready: Instant) -> Hit {
    let status = input.response.status;
    let hit_type = fields::hit_type_for_status(status);
    let client_id = input
        .client_id
        .clone()
        .filter(|cid| !cid.is_empty())
        .unwrap_or_else(fields::generate_client_id);

    let mut hit = Hit::new();
    hit.push(fields::VERSION, PROTOCOL_VERSION);
    hit.push(fields::TRACKING_ID, tracking_id);
    hit.push(fields::HIT_TYPE, hit_type.to_string());
    hit.push(fields::CLIENT_ID, client_id);
    hit.push(fields::IP_OVERRIDE, input.conn.hostname.as_str());
    hit.push(fields::DOCUMENT_LOCATION, input.request.url.as_str());

    match hit_type {
        HitType::Pageview => {
            hit.push(
                fields::SERVER_RESPONSE_TIME,
                fields::elapsed_millis(input.start, ready).to_string(),
            );
        }
        HitType::Exception => {
            hit.push(
                fields::EXCEPTION_DESCRIPTION,
                fields::exception_description(&input.response),
            );
            hit.push(fields::EXCEPTION_FATAL, fields::exception_fatal(status));
        }
    }

    hit
}
