// ABOUTME: Test helper utilities for mocking the QR rendering service
// ABOUTME: Provides mockito-based server setup and small image fixtures

use mockito::{Server, ServerGuard};

/// PNG signature followed by a truncated IHDR chunk; enough to look like an image.
pub const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52,
];

pub const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];

pub async fn mock_qr_server() -> ServerGuard {
    Server::new_async().await
}
