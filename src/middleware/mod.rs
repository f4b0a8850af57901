//! Axum middleware that reports every handled request.
//!
//! The start time is taken before the downstream handler runs; the report is
//! spawned after it returns and is never awaited, so it adds no latency to the
//! response.

use std::net::SocketAddr;
use std::time::Instant;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::header::{CONTENT_TYPE, HOST};
use axum::http::{HeaderMap, Uri};
use axum::middleware::{from_fn_with_state, Next};
use axum::response::Response;
use axum::Router;

use crate::config::FALLBACK_HOST;
use crate::report::{ConnInfo, ReportInput, Reporter, RequestInfo, ResponseInfo};

/// Middleware function for `axum::middleware::from_fn_with_state`.
///
/// The remote address comes from the `ConnectInfo<SocketAddr>` extension, so
/// serve the router with `into_make_service_with_connect_info::<SocketAddr>()`.
/// Without it, `uip` is reported as an empty string.
pub async fn report_requests(
    State(reporter): State<Reporter>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();

    let conn = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| ConnInfo::from(*addr))
        .unwrap_or_default();
    let request_info = RequestInfo::new(absolute_url(request.uri(), request.headers()))
        .with_headers(request.headers().clone());
    let client_id = request_info.client_id_from_cookie();

    let response = next.run(request).await;

    let mut response_info = ResponseInfo::new(response.status().as_u16());
    response_info.content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let mut input = ReportInput::new(request_info, conn, response_info, start);
    input.client_id = client_id;

    // Dropping the handle detaches the task
    let _ = reporter.spawn(input);

    response
}

/// Wraps every route of `router` with `report_requests`.
pub fn with_reporting<S>(router: Router<S>, reporter: Reporter) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(from_fn_with_state(reporter, report_requests))
}

/// Rebuilds the absolute URL of a request.
///
/// Absolute-form URIs are used as is. Otherwise the scheme comes from
/// `X-Forwarded-Proto` (default `http`) and the host from the `Host` header
/// (default `localhost`).
pub fn absolute_url(uri: &Uri, headers: &HeaderMap) -> String {
    if uri.scheme().is_some() && uri.authority().is_some() {
        return uri.to_string();
    }

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| v == "https" || v == "http")
        .unwrap_or_else(|| "http".to_string());
    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or(FALLBACK_HOST);
    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    format!("{}://{}{}", scheme, host, path)
}
