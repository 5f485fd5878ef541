// ABOUTME: CLI argument definitions for the qrpack command-line tool
// ABOUTME: Defines the command-line interface structure using clap derive macros

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "qrpack")]
#[command(about = "Pack text and images into a QR-ready Base64 payload", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose output for debugging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Read settings from this TOML file (overrides discovered config files).
    /// Relative image paths in a config file are resolved against its directory
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode text and images into a Base64 payload
    Encode {
        /// Text to embed
        #[arg(short, long)]
        text: Option<String>,

        /// Image to embed (repeat for several; order is preserved)
        #[arg(short, long = "image", value_name = "PATH")]
        images: Vec<PathBuf>,

        /// Directory for output_base64.txt and the QR image
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Also render the payload as a QR code via the QR service
        #[arg(long)]
        qr: bool,

        /// File name for the rendered QR code
        #[arg(long, requires = "qr", value_name = "FILE")]
        qr_output: Option<PathBuf>,

        /// Do not print the payload to stdout
        #[arg(long, short)]
        quiet: bool,
    },
    /// Render an existing payload as a QR code
    Qr {
        /// Base64 payload (reads --input or stdin when omitted)
        payload: Option<String>,

        /// Read the payload from a file
        #[arg(short, long, conflicts_with = "payload", value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output image path
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Image size in pixels
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        size: Option<u32>,

        /// Quiet zone around the code, in modules
        #[arg(long)]
        margin: Option<u32>,

        /// Image format: png, svg, jpg, or webp
        #[arg(long)]
        format: Option<String>,
    },
    /// Decode a scanned payload back into text and image files
    Decode {
        /// Base64 payload (reads --input or stdin when omitted)
        payload: Option<String>,

        /// Read the payload from a file
        #[arg(short, long, conflicts_with = "payload", value_name = "FILE")]
        input: Option<PathBuf>,

        /// Directory for decoded_image_N files
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Print a JSON summary instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: crate::completions::Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "qrpack");

        for name in ["encode", "qr", "decode", "completions"] {
            assert!(
                cli.find_subcommand(name).is_some(),
                "{} command should exist",
                name
            );
        }
        cli.debug_assert();
    }

    #[test]
    fn test_parse_encode_command() {
        let cli = Cli::try_parse_from([
            "qrpack", "encode", "--text", "hello", "-i", "a.png", "--image", "b.jpg", "--qr",
        ])
        .unwrap();

        match cli.command {
            Commands::Encode {
                text,
                images,
                output_dir,
                qr,
                qr_output,
                quiet,
            } => {
                assert_eq!(text, Some("hello".to_string()));
                assert_eq!(images, vec![PathBuf::from("a.png"), PathBuf::from("b.jpg")]);
                assert_eq!(output_dir, None);
                assert!(qr);
                assert_eq!(qr_output, None);
                assert!(!quiet);
            }
            _ => panic!("expected encode"),
        }
    }

    #[test]
    fn test_qr_output_requires_qr() {
        let result = Cli::try_parse_from(["qrpack", "encode", "--qr-output", "code.png"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_decode_command() {
        let cli = Cli::try_parse_from(["qrpack", "decode", "aGk=", "-o", "out", "--json"]).unwrap();
        match cli.command {
            Commands::Decode {
                payload,
                input,
                output_dir,
                json,
            } => {
                assert_eq!(payload, Some("aGk=".to_string()));
                assert_eq!(input, None);
                assert_eq!(output_dir, Some(PathBuf::from("out")));
                assert!(json);
            }
            _ => panic!("expected decode"),
        }
    }

    #[test]
    fn test_payload_conflicts_with_input() {
        let result = Cli::try_parse_from(["qrpack", "decode", "aGk=", "--input", "p.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_qr_size_must_be_positive() {
        assert!(Cli::try_parse_from(["qrpack", "qr", "aGk=", "--size", "0"]).is_err());
        let cli = Cli::try_parse_from(["qrpack", "qr", "aGk=", "--size", "512"]).unwrap();
        match cli.command {
            Commands::Qr { size, .. } => assert_eq!(size, Some(512)),
            _ => panic!("expected qr"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "qrpack",
            "decode",
            "--verbose",
            "--no-color",
            "--config",
            "custom.toml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(cli.no_color);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }
}
