// ABOUTME: The {text, images} payload carried by a QR code and its Base64 wire form
// ABOUTME: JSON keys are written in a fixed order so re-encoding is byte identical

use serde::{Deserialize, Serialize};

use crate::{codec, PackError, Result};

/// Text plus an ordered list of image data URIs.
///
/// Field order here is the serialization order: `text` then `images`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    text: String,
    images: Vec<String>,
}

impl Payload {
    pub fn assemble(text: impl Into<String>, images: Vec<String>) -> Self {
        Self {
            text: text.into(),
            images,
        }
    }

    pub fn disassemble(self) -> (String, Vec<String>) {
        (self.text, self.images)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Base64 of the UTF-8 JSON form; the string a QR code carries.
    pub fn to_encoded(&self) -> Result<String> {
        Ok(codec::encode_text(&self.to_json()?))
    }

    /// Inverse of [`Payload::to_encoded`]. Fields are read by name.
    pub fn from_encoded(encoded: &str) -> Result<Self> {
        let bytes = codec::decode(encoded)?;
        let json = String::from_utf8(bytes)
            .map_err(|e| PackError::Format(format!("Payload is not valid UTF-8: {}", e)))?;
        Ok(serde_json::from_str(&json)?)
    }
}
