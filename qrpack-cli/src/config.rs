// ABOUTME: Configuration file loading, validation, and hierarchical merging for qrpack
// ABOUTME: Supports TOML config files with XDG Base Directory specification compliance

use anyhow::{anyhow, Context, Result};
use qrpack_sdk::builder::validate_endpoint;
use qrpack_sdk::constants::files::QR_CODE_FILE;
use qrpack_sdk::{PipelineConfig, QrClientConfig, QrFormat, QrOptions};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::config::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, PROJECT_CONFIG_FILE};

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<PathBuf>>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub qr: Option<QrSettings>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct QrSettings {
    #[serde(default, deserialize_with = "validate_url")]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default)]
    pub margin: Option<u32>,
    #[serde(default, deserialize_with = "validate_format")]
    pub format: Option<QrFormat>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl Config {
    /// Load configuration from standard XDG-compliant locations, then from
    /// `explicit` if given
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let paths = Self::get_config_paths();
        let mut config = Self::load_from_paths(&paths)?;

        if let Some(path) = explicit {
            config = config.merge(Self::load_from_file(path)?);
        }

        Ok(config)
    }

    /// Load configuration from file paths in order of increasing precedence.
    /// Missing files are skipped; unreadable or invalid ones are errors.
    pub fn load_from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut config = Config::default();

        for path in paths {
            let path = path.as_ref();
            if !path.is_file() {
                continue;
            }
            log::debug!("Loading config from {}", path.display());
            config = config.merge(Self::load_from_file(path)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single file. Relative `images` entries are
    /// taken relative to the file's directory.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse TOML config file: {}",
                path.as_ref().display()
            )
        })?;

        config.validate()?;

        let base = path.as_ref().parent().unwrap_or_else(|| Path::new(""));
        Ok(config.resolve_images(base))
    }

    fn resolve_images(mut self, base: &Path) -> Self {
        if let Some(images) = self.images.as_mut() {
            for image in images.iter_mut().filter(|p| p.is_relative()) {
                *image = base.join(image.as_path());
            }
        }
        self
    }

    /// Standard config file paths, lowest precedence first
    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. User config directory fallback
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(
                home_dir
                    .join(".config")
                    .join(CONFIG_DIR_NAME)
                    .join(CONFIG_FILE_NAME),
            );
        }

        // 2. XDG config home
        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
            let path = PathBuf::from(config_home)
                .join(CONFIG_DIR_NAME)
                .join(CONFIG_FILE_NAME);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }

        // 3. Project-specific config
        if let Ok(current_dir) = std::env::current_dir() {
            paths.push(current_dir.join(PROJECT_CONFIG_FILE));
        }

        paths
    }

    /// Merge this config with another, giving precedence to the other config
    pub fn merge(self, other: Config) -> Config {
        Config {
            text: other.text.or(self.text),
            images: other.images.or(self.images),
            output_dir: other.output_dir.or(self.output_dir),
            qr: match (self.qr, other.qr) {
                (Some(base), Some(other)) => Some(base.merge(other)),
                (base, None) => base,
                (None, other) => other,
            },
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ref qr) = self.qr {
            qr.validate().context("Invalid [qr] configuration")?;
        }

        Ok(())
    }

    /// Pipeline inputs, with command-line values taking precedence over the file.
    pub fn pipeline_config(
        &self,
        text: Option<String>,
        images: Vec<PathBuf>,
        output_dir: Option<PathBuf>,
    ) -> PipelineConfig {
        let image_paths = if images.is_empty() {
            self.images.clone().unwrap_or_default()
        } else {
            images
        };

        PipelineConfig {
            text: text.or_else(|| self.text.clone()).unwrap_or_default(),
            image_paths,
            output_dir: output_dir
                .or_else(|| self.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    pub fn qr_settings(&self) -> QrSettings {
        self.qr.clone().unwrap_or_default()
    }
}

impl QrSettings {
    pub fn merge(self, other: QrSettings) -> QrSettings {
        QrSettings {
            endpoint: other.endpoint.or(self.endpoint),
            size: other.size.or(self.size),
            margin: other.margin.or(self.margin),
            format: other.format.or(self.format),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            output: other.output.or(self.output),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == Some(0) {
            return Err(anyhow!("size must be greater than 0"));
        }
        if self.timeout_secs == Some(0) {
            return Err(anyhow!("timeout_secs must be greater than 0"));
        }
        Ok(())
    }

    /// Rendering options, with command-line values taking precedence.
    pub fn options(
        &self,
        size: Option<u32>,
        margin: Option<u32>,
        format: Option<&str>,
    ) -> Result<QrOptions> {
        let defaults = QrOptions::default();
        let format = match format {
            Some(f) => f.parse::<QrFormat>()?,
            None => self.format.unwrap_or(defaults.format),
        };

        Ok(QrOptions {
            size: size.or(self.size).unwrap_or(defaults.size),
            margin: margin.or(self.margin).unwrap_or(defaults.margin),
            format,
        })
    }

    pub fn client_config(&self) -> QrClientConfig {
        let mut config = QrClientConfig::default();
        if let Some(ref endpoint) = self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        config
    }

    /// Where to write the QR image. Without an explicit name the file is
    /// `qr_code.<format>` in `output_dir`.
    pub fn output_path(
        &self,
        explicit: Option<PathBuf>,
        output_dir: &Path,
        format: QrFormat,
    ) -> PathBuf {
        match explicit.or_else(|| self.output.clone()) {
            Some(path) if path.is_absolute() => path,
            Some(path) => output_dir.join(path),
            None => output_dir.join(Path::new(QR_CODE_FILE).with_extension(format.extension())),
        }
    }
}

// Custom deserializer for QR format validation
fn validate_format<'de, D>(deserializer: D) -> Result<Option<QrFormat>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value: Option<String> = Option::deserialize(deserializer)?;
    value
        .map(|format| format.parse::<QrFormat>().map_err(D::Error::custom))
        .transpose()
}

// Custom deserializer for endpoint URL validation
fn validate_url<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value: Option<String> = Option::deserialize(deserializer)?;
    if let Some(ref endpoint) = value {
        validate_endpoint(endpoint).map_err(D::Error::custom)?;
    }
    Ok(value)
}
