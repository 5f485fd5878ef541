// ABOUTME: Mapping between file extensions and image MIME types
// ABOUTME: jpg maps to jpeg on the way in; everything else passes through unchanged

use std::path::Path;

use crate::constants::mime::IMAGE_TYPE;
use crate::{PackError, Result};

/// MIME subtype for a file extension. `jpg` becomes `jpeg`; any other
/// extension (including an empty one) is passed through as-is.
pub fn subtype_for_extension(ext: &str) -> &str {
    match ext {
        "jpg" => "jpeg",
        other => other,
    }
}

/// MIME type for `path`, derived from its extension alone.
///
/// A path without an extension (`photo`, `.hidden`) yields `image/`. The
/// result is not checked against any MIME registry.
pub fn mime_type_for_path(path: &Path) -> String {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy())
        .unwrap_or_default();
    format!("{}/{}", IMAGE_TYPE, subtype_for_extension(&ext))
}

/// File extension for a MIME type: the subtype after the first `/`.
///
/// There is no reverse `jpeg -> jpg` mapping, so a `.jpg` input comes back
/// as `.jpeg`.
pub fn extension_for_mime(mime: &str) -> Result<&str> {
    let mut parts = mime.split('/');
    parts.next();
    parts
        .next()
        .ok_or_else(|| PackError::Format(format!("MIME type '{}' has no subtype", mime)))
}
