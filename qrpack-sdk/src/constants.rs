// ABOUTME: Centralized constants for the qrpack SDK
// ABOUTME: Contains QR service defaults, timeouts, and output file naming

/// HTTP and request timeouts
pub mod timeouts {
    use std::time::Duration;

    /// Default timeout for the QR rendering request
    pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
}

/// QR rendering service
pub mod qr {
    /// Default endpoint accepting `{text, size, margin, format}` as JSON
    pub const DEFAULT_ENDPOINT: &str = "https://quickchart.io/qr";

    /// Default image edge length in pixels
    pub const DEFAULT_SIZE: u32 = 300;

    /// Default quiet zone in modules
    pub const DEFAULT_MARGIN: u32 = 4;

    pub const USER_AGENT: &str = concat!("qrpack/", env!("CARGO_PKG_VERSION"));
}

/// Output file naming
pub mod files {
    /// Encoded payload written by the encode flow
    pub const OUTPUT_BASE64_FILE: &str = "output_base64.txt";

    /// Rendered QR image written when no other name is chosen
    pub const QR_CODE_FILE: &str = "qr_code.png";

    /// Prefix for images recovered by the decode flow, followed by a 1-based index
    pub const DECODED_IMAGE_PREFIX: &str = "decoded_image_";
}

/// Data URI and MIME conventions
pub mod mime {
    /// Top-level type given to every loaded file
    pub const IMAGE_TYPE: &str = "image";

    pub const DATA_URI_PATTERN: &str = r"^data:(.+);base64,(.+)$";
}
