// ABOUTME: qrpack SDK: packs text and images into a Base64 payload and back
// ABOUTME: Also wraps the external QR rendering service behind a publisher trait

pub mod builder;
pub mod codec;
pub mod constants;
pub mod data_uri;
pub mod error;
pub mod files;
pub mod mime;
pub mod payload;
pub mod pipeline;
pub mod publisher;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use builder::QrClientConfig;
pub use error::PackError;
pub use payload::Payload;
pub use pipeline::{DecodedPayload, EncodedOutput, PipelineConfig};
pub use publisher::{QrClient, QrFormat, QrOptions, QrPublisher};

pub type Result<T> = std::result::Result<T, PackError>;
