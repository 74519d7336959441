//! HTTP client initialization.

use std::sync::Arc;

use reqwest::ClientBuilder;

use crate::config::USER_AGENT;

/// Initializes the HTTP client used to reach the CMS.
///
/// The client keeps the transport's default timeouts and redirect policy; the
/// forwarder makes exactly one attempt per lead and relies on them.
///
/// # Errors
///
/// Returns a `reqwest::Error` if the TLS backend cannot be initialised.
pub fn init_client() -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new().user_agent(USER_AGENT).build()?;
    Ok(Arc::new(client))
}
