// ABOUTME: Error type for the qrpack SDK with user-facing messages and hints
// ABOUTME: Covers file IO, Base64 decoding, payload format, and QR service failures

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackError {
    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("I/O error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid Base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("{0}")]
    Format(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("QR service returned {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl PackError {
    /// Wrap an IO error for `path`, promoting `NotFound` to its own variant.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            PackError::FileNotFound { path }
        } else {
            PackError::Io { path, source }
        }
    }

    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            PackError::FileNotFound { .. } => Some("Check the image path and try again"),
            PackError::Decode(_) => {
                Some("Make sure the scanned payload was copied completely, without extra characters")
            }
            PackError::Network(_) => Some("Check your internet connection and try again"),
            PackError::Remote { status, .. } if *status == 429 => {
                Some("The QR service is rate limiting requests. Wait a moment and try again")
            }
            PackError::Remote { status, .. } if *status == 413 => {
                Some("The payload is too large for the QR service. Use fewer or smaller images")
            }
            PackError::Configuration(_) => Some("Check qrpack.toml and the command-line flags"),
            _ => None,
        }
    }

    /// Process exit code for this error kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            PackError::FileNotFound { .. } | PackError::Io { .. } => 3,
            PackError::Decode(_) => 4,
            PackError::Format(_) => 5,
            PackError::Network(_) => 6,
            PackError::Remote { .. } => 7,
            PackError::Configuration(_) => 1,
        }
    }
}

impl From<reqwest::Error> for PackError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PackError::Network(format!("request timed out: {}", err))
        } else if err.is_builder() {
            PackError::Configuration(err.to_string())
        } else if let Some(status) = err.status() {
            PackError::Remote {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            PackError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PackError {
    fn from(err: serde_json::Error) -> Self {
        PackError::Format(format!("Malformed payload JSON: {}", err))
    }
}
