// ABOUTME: Implementations of the encode, qr, and decode subcommands
// ABOUTME: Resolves flags against config, drives the SDK pipeline, and prints results

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use qrpack_sdk::{files, pipeline, QrClient, QrPublisher};
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli_output::CliOutput;
use crate::config::Config;
use crate::constants::{env, timeouts};

pub struct EncodeArgs {
    pub text: Option<String>,
    pub images: Vec<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub qr: bool,
    pub qr_output: Option<PathBuf>,
    pub quiet: bool,
}

pub struct QrArgs {
    pub payload: Option<String>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub size: Option<u32>,
    pub margin: Option<u32>,
    pub format: Option<String>,
}

pub struct DecodeArgs {
    pub payload: Option<String>,
    pub input: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub json: bool,
}

pub struct CommandRunner {
    config: Config,
    output: CliOutput,
    show_progress: bool,
}

impl CommandRunner {
    pub fn new(config: Config, output: CliOutput) -> Self {
        let show_progress =
            std::io::stderr().is_terminal() && std::env::var_os(env::QUIET).is_none();
        Self {
            config,
            output,
            show_progress,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub async fn encode(&self, args: EncodeArgs) -> Result<()> {
        let pipeline_config = self
            .config
            .pipeline_config(args.text, args.images, args.output_dir);

        if pipeline_config.text.is_empty() && pipeline_config.image_paths.is_empty() {
            self.output
                .warning("Nothing to encode: no text or images given; writing an empty payload");
        }

        let encoded = pipeline::encode(&pipeline_config).context("Failed to encode payload")?;
        self.output
            .success(&format!("Saved payload: {}", encoded.path.display()));

        if !args.quiet {
            println!("{}", encoded.encoded);
        }

        if args.qr {
            let settings = self.config.qr_settings();
            let options = settings.options(None, None, None)?;
            let target =
                settings.output_path(args.qr_output, &pipeline_config.output_dir, options.format);
            let client = QrClient::from_config(settings.client_config())?;
            self.render(&client, &encoded.encoded, &options, &target)
                .await?;
        }

        Ok(())
    }

    pub async fn qr(&self, args: QrArgs) -> Result<()> {
        let payload = read_payload(args.payload, args.input.as_deref())?;

        let settings = self.config.qr_settings();
        let options = settings.options(args.size, args.margin, args.format.as_deref())?;
        let output_dir = self
            .config
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let target = settings.output_path(args.output, &output_dir, options.format);

        let client = QrClient::from_config(settings.client_config())?;
        self.render(&client, &payload, &options, &target).await
    }

    /// Render through `publisher` and write the image; separate from the
    /// client construction so tests can substitute a publisher.
    pub async fn render<P: QrPublisher + ?Sized>(
        &self,
        publisher: &P,
        payload: &str,
        options: &qrpack_sdk::QrOptions,
        target: &Path,
    ) -> Result<()> {
        let spinner = self.spinner("Rendering QR code…");
        let result = pipeline::publish_qr(publisher, payload, options, target).await;
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        let path = result.context("Failed to render QR code")?;
        self.output
            .success(&format!("Saved QR code: {}", path.display()));
        Ok(())
    }

    pub fn decode(&self, args: DecodeArgs) -> Result<()> {
        let payload = read_payload(args.payload, args.input.as_deref())?;
        let output_dir = args
            .output_dir
            .or_else(|| self.config.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));

        let decoded =
            pipeline::decode(&payload, &output_dir).context("Failed to decode payload")?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&decoded)?);
        } else {
            println!("Text content: {}", decoded.text);
            for path in &decoded.files {
                self.output
                    .success(&format!("Saved image: {}", path.display()));
            }
            self.output.success("Decoding complete");
        }

        Ok(())
    }

    fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(timeouts::PROGRESS_BAR_TICK_MS));
        Some(pb)
    }
}

/// The payload from the argument, from `input`, or from stdin, with
/// surrounding whitespace removed.
pub fn read_payload(payload: Option<String>, input: Option<&Path>) -> Result<String> {
    let raw = match (payload, input) {
        (Some(p), _) => p,
        (None, Some(path)) => files::read_to_string(path)
            .with_context(|| format!("Failed to read payload from {}", path.display()))?,
        (None, None) => {
            if io::stdin().is_terminal() {
                eprintln!("Paste the scanned payload, then press Ctrl+D:");
            }
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read payload from stdin")?;
            buffer
        }
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("Payload cannot be empty");
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_payload_prefers_argument() {
        let payload = read_payload(Some("  aGk=\n".to_string()), None).unwrap();
        assert_eq!(payload, "aGk=");
    }

    #[test]
    fn test_read_payload_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("output_base64.txt");
        std::fs::write(&path, "eyJ0ZXh0IjoiaGkiLCJpbWFnZXMiOltdfQ==\n").unwrap();

        let payload = read_payload(None, Some(&path)).unwrap();
        assert_eq!(payload, "eyJ0ZXh0IjoiaGkiLCJpbWFnZXMiOltdfQ==");
    }

    #[test]
    fn test_read_payload_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_payload(None, Some(&dir.path().join("nope.txt"))).unwrap_err();
        assert_eq!(crate::cli_output::exit_code_for(&err), 3);
    }

    #[test]
    fn test_read_payload_rejects_blank() {
        assert!(read_payload(Some("   \n".to_string()), None).is_err());
    }
}
