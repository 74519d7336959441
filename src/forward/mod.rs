//! Forwarding leads to the CMS.
//!
//! One POST per lead, no retries. Any HTTP status the CMS answers with is a
//! successful exchange from the forwarder's point of view; only transport
//! failures are errors.

use std::sync::Arc;

use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::config::{CmsAuthScheme, Config};
use crate::error_handling::{ForwardError, InitializationError};
use crate::lead::CmsResponse;

/// Status and raw body returned by the CMS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Sends serialized lead envelopes to the configured CMS endpoint.
#[derive(Clone)]
pub struct CmsForwarder {
    client: Arc<reqwest::Client>,
    endpoint: String,
    auth_header: HeaderName,
    auth_value: HeaderValue,
}

impl CmsForwarder {
    /// Builds a forwarder from the CMS settings in `config`.
    ///
    /// # Errors
    ///
    /// `InitializationError::CredentialHeaderError` if the credential or the
    /// header name cannot be used in an HTTP header.
    pub fn new(client: Arc<reqwest::Client>, config: &Config) -> Result<Self, InitializationError> {
        let (auth_header, raw_value) = match config.cms_auth_scheme {
            CmsAuthScheme::Bearer => (AUTHORIZATION, format!("Bearer {}", config.cms_api_key)),
            CmsAuthScheme::ApiKey => {
                let name = HeaderName::from_bytes(config.cms_auth_header.as_bytes()).map_err(|e| {
                    InitializationError::CredentialHeaderError(format!(
                        "invalid header name '{}': {e}",
                        config.cms_auth_header
                    ))
                })?;
                (name, config.cms_api_key.clone())
            }
        };

        let mut auth_value = HeaderValue::from_str(&raw_value).map_err(|_| {
            InitializationError::CredentialHeaderError(
                "CMS credential contains characters not allowed in a header".to_string(),
            )
        })?;
        auth_value.set_sensitive(true);

        Ok(Self {
            client,
            endpoint: config.cms_api_url.clone(),
            auth_header,
            auth_value,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POSTs `body` to the CMS and returns its status and raw body.
    ///
    /// # Errors
    ///
    /// `ForwardError::Transport` when the request cannot be sent or the
    /// response body cannot be read.
    pub async fn forward(&self, body: Vec<u8>) -> Result<ForwardResponse, ForwardError> {
        log::debug!("Forwarding {} byte lead to {}", body.len(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(self.auth_header.clone(), self.auth_value.clone())
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        log::debug!("CMS answered {} with {} bytes", status, body.len());
        Ok(ForwardResponse { status, body })
    }
}

/// Decodes a CMS response body.
///
/// Any JSON object is accepted; missing fields take their defaults.
pub fn decode_response(body: &[u8]) -> Result<CmsResponse, serde_json::Error> {
    serde_json::from_slice(body)
}
