// ABOUTME: Building and parsing of base64 data URIs (data:<mime>;base64,<data>)
// ABOUTME: The unit in which images travel inside a payload

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::constants::mime::DATA_URI_PATTERN;
use crate::{codec, files, mime, PackError, Result};

static DATA_URI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(DATA_URI_PATTERN).expect("data URI pattern is valid"));

/// Build `data:{mime};base64,{base64(bytes)}`.
pub fn build(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, codec::encode(bytes))
}

/// Split a data URI into its MIME type and decoded bytes.
///
/// The MIME type is everything between `data:` and the last `;base64,`.
/// A body that is not valid Base64 surfaces as a decode error rather than a
/// format error.
pub fn parse(uri: &str) -> Result<(String, Vec<u8>)> {
    let caps = DATA_URI_RE
        .captures(uri)
        .ok_or_else(|| PackError::Format("Invalid Data URI format".to_string()))?;

    let mime_type = caps[1].to_string();
    let bytes = codec::decode(&caps[2])?;
    Ok((mime_type, bytes))
}

/// Read an image file and wrap it in a data URI with a MIME type guessed
/// from its extension.
pub fn from_image_file(path: &Path) -> Result<String> {
    let bytes = files::load_image(path)?;
    let mime_type = mime::mime_type_for_path(path);
    log::debug!(
        "Loaded {} ({} bytes, {})",
        path.display(),
        bytes.len(),
        mime_type
    );
    Ok(build(&mime_type, &bytes))
}
