// ABOUTME: Builder pattern implementation for QrClient configuration
// ABOUTME: Endpoint, timeout, user agent, and proxy with sensible defaults

use crate::constants::{qr, timeouts};
use crate::error::PackError;
use crate::QrClient;
use std::time::Duration;
use typed_builder::TypedBuilder;
use url::Url;

#[derive(Debug, TypedBuilder)]
#[builder(build_method(into = Result<QrClient, PackError>))]
pub struct QrClientConfig {
    #[builder(default = qr::DEFAULT_ENDPOINT.to_string(), setter(into))]
    pub endpoint: String,

    #[builder(default = timeouts::HTTP_REQUEST_TIMEOUT)]
    pub timeout: Duration,

    #[builder(default = qr::USER_AGENT.to_string(), setter(into))]
    pub user_agent: String,

    #[builder(default = None)]
    pub proxy: Option<reqwest::Proxy>,
}

impl Default for QrClientConfig {
    fn default() -> Self {
        Self {
            endpoint: qr::DEFAULT_ENDPOINT.to_string(),
            timeout: timeouts::HTTP_REQUEST_TIMEOUT,
            user_agent: qr::USER_AGENT.to_string(),
            proxy: None,
        }
    }
}

impl From<QrClientConfig> for Result<QrClient, PackError> {
    fn from(config: QrClientConfig) -> Self {
        QrClient::from_config(config)
    }
}

impl QrClient {
    pub fn builder() -> QrClientConfigBuilder<((), (), (), ())> {
        QrClientConfig::builder()
    }

    pub fn create_proxy(url: &str) -> Result<reqwest::Proxy, PackError> {
        let parsed_url = Url::parse(url)
            .map_err(|e| PackError::Configuration(format!("Invalid proxy URL: {}", e)))?;

        reqwest::Proxy::all(parsed_url.as_str())
            .map_err(|e| PackError::Configuration(format!("Invalid proxy configuration: {}", e)))
    }
}

/// Parse and check a QR service endpoint. Only http and https are accepted.
pub fn validate_endpoint(endpoint: &str) -> Result<Url, PackError> {
    let url = Url::parse(endpoint)
        .map_err(|e| PackError::Configuration(format!("Invalid QR endpoint '{}': {}", endpoint, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(PackError::Configuration(format!(
            "Unsupported QR endpoint scheme '{}'",
            scheme
        ))),
    }
}
