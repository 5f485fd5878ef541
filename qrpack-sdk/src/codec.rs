// ABOUTME: Standard-alphabet Base64 codec used for payloads and data URI bodies
// ABOUTME: Encodes with padding and decodes with or without it

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

use crate::Result;

/// Padded on encode; padding optional on decode so scanner output that drops
/// trailing `=` still round-trips.
const ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub fn encode(bytes: &[u8]) -> String {
    ENGINE.encode(bytes)
}

/// Decode a standard-alphabet Base64 string.
///
/// Characters outside the alphabet and malformed padding yield
/// [`PackError::Decode`](crate::PackError::Decode).
pub fn decode(input: &str) -> Result<Vec<u8>> {
    Ok(ENGINE.decode(input)?)
}

/// Base64 of the UTF-8 bytes of `text`.
pub fn encode_text(text: &str) -> String {
    encode(text.as_bytes())
}
