// ABOUTME: End-to-end encode and decode flows over the payload format
// ABOUTME: Encode: images -> data URIs -> payload -> Base64 -> optional QR; decode reverses it

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::files::{DECODED_IMAGE_PREFIX, OUTPUT_BASE64_FILE};
use crate::{data_uri, files, PackError, Payload, QrOptions, QrPublisher, Result};

/// Inputs for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub text: String,
    pub image_paths: Vec<PathBuf>,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedOutput {
    pub encoded: String,
    pub path: PathBuf,
}

/// What the decode flow recovered: the text and the image files it wrote, in
/// payload order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedPayload {
    pub text: String,
    pub files: Vec<PathBuf>,
}

/// Build the encoded payload for `text` and the images at `image_paths`.
pub fn encode_payload<P: AsRef<Path>>(text: &str, image_paths: &[P]) -> Result<String> {
    let images = image_paths
        .iter()
        .map(|p| data_uri::from_image_file(p.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    let payload = Payload::assemble(text, images);
    payload.to_encoded()
}

/// Encode `config` and write the payload to `output_base64.txt` in its output
/// directory.
pub fn encode(config: &PipelineConfig) -> Result<EncodedOutput> {
    let encoded = encode_payload(&config.text, config.image_paths.as_slice())?;

    ensure_dir(&config.output_dir)?;
    let path = config.output_dir.join(OUTPUT_BASE64_FILE);
    files::write_file(&path, &encoded)?;
    log::info!("Wrote {} chars of payload to {}", encoded.len(), path.display());

    Ok(EncodedOutput { encoded, path })
}

/// Render `encoded` through `publisher` and write the image to `output`.
///
/// The parent directory of `output` is created before the service is called.
/// The image itself is only written once the call succeeds.
pub async fn publish_qr<P>(
    publisher: &P,
    encoded: &str,
    options: &QrOptions,
    output: &Path,
) -> Result<PathBuf>
where
    P: QrPublisher + ?Sized,
{
    if let Some(parent) = output.parent() {
        ensure_dir(parent)?;
    }

    let image = publisher.publish(encoded, options).await?;
    files::write_file(output, &image)?;
    log::info!("Wrote QR code ({} bytes) to {}", image.len(), output.display());
    Ok(output.to_path_buf())
}

/// Decode a scanned payload, writing each image as
/// `decoded_image_{n}.{subtype}` under `output_dir` (n starts at 1).
///
/// Stops at the first bad image; files already written stay on disk.
pub fn decode(encoded: &str, output_dir: &Path) -> Result<DecodedPayload> {
    let payload = Payload::from_encoded(encoded)?;
    let (text, images) = payload.disassemble();

    if !images.is_empty() {
        ensure_dir(output_dir)?;
    }

    let mut written = Vec::with_capacity(images.len());
    for (index, uri) in images.iter().enumerate() {
        let (mime_type, bytes) = data_uri::parse(uri)?;
        let basename = output_dir.join(format!("{}{}", DECODED_IMAGE_PREFIX, index + 1));
        let path = files::write_image(&bytes, &basename, &mime_type)?;
        log::info!("Saved image: {}", path.display());
        written.push(path);
    }

    Ok(DecodedPayload {
        text,
        files: written,
    })
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|e| PackError::io(dir, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{JPEG_BYTES, PNG_BYTES};
    use crate::{codec, QrFormat};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct FakePublisher {
        fail: bool,
        calls: AtomicUsize,
    }

    impl FakePublisher {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl QrPublisher for FakePublisher {
        async fn publish(&self, encoded: &str, options: &QrOptions) -> Result<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(PackError::Network("connection reset".to_string()));
            }
            Ok(format!("{}:{}", options.format, encoded.len()).into_bytes())
        }
    }

    fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_round_trip_preserves_text_bytes_and_order() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let a = write_fixture(src.path(), "A.png", PNG_BYTES);
        let b = write_fixture(src.path(), "B.jpg", JPEG_BYTES);

        let text = "Hello! This QR code contains both text and images. 🎉";
        let encoded = encode_payload(text, &[&a, &b]).unwrap();
        let decoded = decode(&encoded, out.path()).unwrap();

        assert_eq!(decoded.text, text);
        assert_eq!(
            decoded.files,
            vec![
                out.path().join("decoded_image_1.png"),
                out.path().join("decoded_image_2.jpeg"),
            ]
        );
        assert_eq!(std::fs::read(&decoded.files[0]).unwrap(), PNG_BYTES);
        assert_eq!(std::fs::read(&decoded.files[1]).unwrap(), JPEG_BYTES);
    }

    #[test]
    fn test_jpg_input_decodes_to_jpeg_extension() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let photo = write_fixture(src.path(), "photo.jpg", JPEG_BYTES);

        let encoded = encode_payload("", &[&photo]).unwrap();
        let payload = Payload::from_encoded(&encoded).unwrap();
        assert!(payload.images()[0].starts_with("data:image/jpeg;base64,"));

        let decoded = decode(&encoded, out.path()).unwrap();
        assert_eq!(decoded.files, vec![out.path().join("decoded_image_1.jpeg")]);
        assert!(!out.path().join("decoded_image_1.jpg").exists());
    }

    #[test]
    fn test_text_only_payload() {
        let out = TempDir::new().unwrap();
        let encoded = encode_payload::<PathBuf>("just text", &[]).unwrap();
        let decoded = decode(&encoded, &out.path().join("never-created")).unwrap();

        assert_eq!(decoded.text, "just text");
        assert!(decoded.files.is_empty());
        assert!(!out.path().join("never-created").exists());
    }

    #[test]
    fn test_encode_fails_fast_on_missing_image() {
        let src = TempDir::new().unwrap();
        let a = write_fixture(src.path(), "A.png", PNG_BYTES);
        let missing = src.path().join("missing.png");

        let result = encode_payload("x", &[a, missing]);
        assert!(matches!(result, Err(PackError::FileNotFound { .. })));
    }

    #[test]
    fn test_encode_writes_output_file() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let a = write_fixture(src.path(), "A.png", PNG_BYTES);

        let config = PipelineConfig {
            text: "hello".to_string(),
            image_paths: vec![a],
            output_dir: out.path().join("nested"),
        };
        let output = encode(&config).unwrap();

        assert_eq!(output.path, out.path().join("nested").join("output_base64.txt"));
        assert_eq!(std::fs::read_to_string(&output.path).unwrap(), output.encoded);
        assert!(codec::decode(&output.encoded).is_ok());
    }

    #[test]
    fn test_decode_stops_at_first_bad_image() {
        let out = TempDir::new().unwrap();
        let payload = Payload::assemble(
            "t",
            vec![
                "data:image/png;base64,aGk=".to_string(),
                "not a data uri".to_string(),
                "data:image/gif;base64,aGk=".to_string(),
            ],
        );
        let result = decode(&payload.to_encoded().unwrap(), out.path());

        match result {
            Err(PackError::Format(msg)) => assert_eq!(msg, "Invalid Data URI format"),
            other => panic!("expected format error, got {:?}", other),
        }
        assert!(out.path().join("decoded_image_1.png").exists());
        assert!(!out.path().join("decoded_image_3.gif").exists());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let out = TempDir::new().unwrap();
        assert!(matches!(
            decode("%%%", out.path()),
            Err(PackError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_publish_qr_writes_image() {
        let out = TempDir::new().unwrap();
        let target = out.path().join("qr_code.png");
        let publisher = FakePublisher::new(false);
        let options = QrOptions {
            format: QrFormat::Svg,
            ..Default::default()
        };

        let path = publish_qr(&publisher, "aGk=", &options, &target)
            .await
            .unwrap();

        assert_eq!(path, target);
        assert_eq!(std::fs::read(&target).unwrap(), b"svg:4");
        assert_eq!(publisher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_publish_qr_creates_missing_parent_dir() {
        let out = TempDir::new().unwrap();
        let target = out.path().join("fresh").join("nested").join("qr_code.png");
        let publisher = FakePublisher::new(false);

        let path = publish_qr(&publisher, "aGk=", &QrOptions::default(), &target)
            .await
            .unwrap();

        assert_eq!(path, target);
        assert_eq!(std::fs::read(&target).unwrap(), b"png:4");
    }

    #[tokio::test]
    async fn test_publish_qr_unusable_dir_skips_request() {
        let out = TempDir::new().unwrap();
        let blocker = out.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();
        let target = blocker.join("qr_code.png");
        let publisher = FakePublisher::new(false);

        let result = publish_qr(&publisher, "aGk=", &QrOptions::default(), &target).await;

        assert!(matches!(result, Err(PackError::Io { .. })));
        assert_eq!(publisher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_publish_failure_leaves_no_qr_and_keeps_payload_file() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let a = write_fixture(src.path(), "A.png", PNG_BYTES);

        let config = PipelineConfig {
            text: "hello".to_string(),
            image_paths: vec![a],
            output_dir: out.path().to_path_buf(),
        };
        let output = encode(&config).unwrap();

        let publisher = FakePublisher::new(true);
        let target = out.path().join("qr_code.png");
        let result = publish_qr(&publisher, &output.encoded, &QrOptions::default(), &target).await;

        assert!(matches!(result, Err(PackError::Network(_))));
        assert_eq!(publisher.calls.load(Ordering::SeqCst), 1);
        assert!(!target.exists());
        assert_eq!(
            std::fs::read_to_string(&output.path).unwrap(),
            output.encoded
        );
    }
}
