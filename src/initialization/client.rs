//! HTTP client initialization.

use reqwest::ClientBuilder;

use crate::error_handling::InitializationError;

/// Initializes the HTTP client used to send hits.
///
/// Creates a `reqwest::Client` with the given User-Agent. No request timeout is
/// set, so the transport defaults apply.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(user_agent: &str) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new().user_agent(user_agent).build()?;
    Ok(client)
}
