//! Report input types.
//!
//! Snapshots of the request, connection and response that a single report
//! call reads. Hit fields come from the URL, remote hostname, status and
//! content type; headers are read only for the `_ga` client-id cookie.

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::HeaderMap;

use crate::config::CLIENT_ID_COOKIE;

/// The inbound request as seen by the reporter.
///
/// Only `url` feeds a hit field directly. Headers are kept so a prior client
/// id can be recovered from the `_ga` cookie.
#[derive(Debug, Clone, Default)]
pub struct RequestInfo {
    /// Absolute request URL, reported verbatim as `dl`
    pub url: String,
    /// Request headers, read only for the `_ga` cookie
    pub headers: HeaderMap,
}

impl RequestInfo {
    /// A request with the given URL and no headers.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HeaderMap::new(),
        }
    }

    /// Replaces the request headers.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Returns a header value if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Extracts the client id from a `_ga` cookie.
    ///
    /// The cookie looks like `GA1.2.1234567890.1600000000`; the client id is the
    /// last two dot-separated segments.
    pub fn client_id_from_cookie(&self) -> Option<String> {
        self.headers
            .get_all(axum::http::header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == CLIENT_ID_COOKIE)
            .and_then(|(_, value)| parse_ga_cookie(value))
    }
}

fn parse_ga_cookie(value: &str) -> Option<String> {
    let parts: Vec<&str> = value.split('.').collect();
    if parts.len() < 4 || !parts[0].starts_with("GA") {
        return None;
    }
    let cid = parts[parts.len() - 2..].join(".");
    if cid.split('.').all(|p| !p.is_empty()) {
        Some(cid)
    } else {
        None
    }
}

/// Connection metadata for the inbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnInfo {
    /// Remote hostname or IP, reported as `uip`
    pub hostname: String,
    /// Remote port, when known
    pub port: Option<u16>,
}

impl ConnInfo {
    /// Connection info with a hostname and no port.
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            port: None,
        }
    }
}

impl From<SocketAddr> for ConnInfo {
    fn from(addr: SocketAddr) -> Self {
        Self {
            hostname: addr.ip().to_string(),
            port: Some(addr.port()),
        }
    }
}

/// The outgoing response as seen by the reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseInfo {
    /// HTTP status code
    pub status: u16,
    /// `Content-Type` header value, if any
    pub content_type: Option<String>,
    /// Short textual summary of the body, used for exception descriptions
    pub body_summary: Option<String>,
}

impl ResponseInfo {
    /// A response with the given status and nothing else.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body_summary: None,
        }
    }

    /// Sets the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets the body summary.
    pub fn with_body_summary(mut self, summary: impl Into<String>) -> Self {
        self.body_summary = Some(summary.into());
        self
    }
}

impl Default for ResponseInfo {
    fn default() -> Self {
        Self::new(200)
    }
}

/// Everything one report call needs.
#[derive(Debug, Clone)]
pub struct ReportInput {
    /// Inbound request
    pub request: RequestInfo,
    /// Connection the request arrived on
    pub conn: ConnInfo,
    /// Response sent back
    pub response: ResponseInfo,
    /// When request handling began
    pub start: Instant,
    /// Prior client id for session continuity; a fresh one is generated if `None`
    pub client_id: Option<String>,
}

impl ReportInput {
    /// Input without a prior client id.
    pub fn new(
        request: RequestInfo,
        conn: ConnInfo,
        response: ResponseInfo,
        start: Instant,
    ) -> Self {
        Self {
            request,
            conn,
            response,
            start,
            client_id: None,
        }
    }

    /// Sets the prior client id.
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }
}
