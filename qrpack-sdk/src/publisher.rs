// ABOUTME: Client for the external QR rendering service
// ABOUTME: One POST per payload, no retries; failures are reported to the caller

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::builder::{validate_endpoint, QrClientConfig};
use crate::constants::qr;
use crate::{PackError, Result};

/// Longest slice of an error response body kept in [`PackError::Remote`].
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QrFormat {
    #[default]
    Png,
    Svg,
    Jpg,
    Webp,
}

impl QrFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            QrFormat::Png => "png",
            QrFormat::Svg => "svg",
            QrFormat::Jpg => "jpg",
            QrFormat::Webp => "webp",
        }
    }
}

impl fmt::Display for QrFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for QrFormat {
    type Err = PackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "png" => Ok(QrFormat::Png),
            "svg" => Ok(QrFormat::Svg),
            "jpg" | "jpeg" => Ok(QrFormat::Jpg),
            "webp" => Ok(QrFormat::Webp),
            _ => Err(PackError::Configuration(format!(
                "Unsupported QR format '{}'. Must be one of: png, svg, jpg, webp",
                s
            ))),
        }
    }
}

/// Rendering options sent alongside the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrOptions {
    pub size: u32,
    pub margin: u32,
    pub format: QrFormat,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            size: qr::DEFAULT_SIZE,
            margin: qr::DEFAULT_MARGIN,
            format: QrFormat::default(),
        }
    }
}

/// Anything that turns an encoded payload into QR image bytes.
#[async_trait]
pub trait QrPublisher: Send + Sync {
    async fn publish(&self, encoded: &str, options: &QrOptions) -> Result<Vec<u8>>;
}

#[derive(Debug, Serialize)]
struct RenderRequest<'a> {
    text: &'a str,
    size: u32,
    margin: u32,
    format: QrFormat,
}

pub struct QrClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl QrClient {
    pub fn from_config(config: QrClientConfig) -> Result<Self> {
        let endpoint = validate_endpoint(&config.endpoint)?;

        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent);

        if let Some(proxy) = config.proxy {
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl QrPublisher for QrClient {
    async fn publish(&self, encoded: &str, options: &QrOptions) -> Result<Vec<u8>> {
        let request = RenderRequest {
            text: encoded,
            size: options.size,
            margin: options.margin,
            format: options.format,
        };

        log::info!(
            "Requesting {} QR code ({} chars) from {}",
            options.format,
            encoded.len(),
            self.endpoint
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| PackError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response.text().await);
            log::debug!("QR service error body: {}", body);
            return Err(PackError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PackError::Network(format!("Failed to read QR image: {}", e)))?;

        log::debug!("Received {} bytes of QR image", bytes.len());
        Ok(bytes.to_vec())
    }
}

/// Error body for a failed render, cut to `MAX_ERROR_BODY` bytes. A body that
/// cannot be read is replaced by the read error.
fn error_body(read: reqwest::Result<String>) -> String {
    let mut body = match read {
        Ok(body) => body,
        Err(e) => {
            log::debug!("Failed to read QR service error body: {}", e);
            format!("<unreadable body: {}>", e)
        }
    };

    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    body
}
