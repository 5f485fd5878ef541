// ABOUTME: Local file access for the pipeline: reading input images and writing outputs
// ABOUTME: Output names for decoded images come from the MIME subtype

use std::path::{Path, PathBuf};

use crate::{mime, PackError, Result};

pub fn load_image(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| PackError::io(path, e))
}

/// Write `bytes` to `{basename}.{subtype}` and return the path written.
///
/// Existing files are overwritten. An empty subtype writes `basename` with
/// no extension.
pub fn write_image(bytes: &[u8], basename: &Path, mime_type: &str) -> Result<PathBuf> {
    let ext = mime::extension_for_mime(mime_type)?;

    let path = if ext.is_empty() {
        basename.to_path_buf()
    } else {
        let mut name = basename.as_os_str().to_owned();
        name.push(".");
        name.push(ext);
        PathBuf::from(name)
    };

    write_file(&path, bytes)?;
    Ok(path)
}

/// Plain write for outputs that are not derived from a data URI.
pub fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| PackError::io(path, e))
}

pub fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| PackError::io(path, e))
}
