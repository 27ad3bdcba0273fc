//! svg2ivg configuration file handling
//!
//! `ivg.toml` describes batches of icons to convert:
//!
//! ```toml
//! [encoder]
//! high_resolution_coordinates = false
//!
//! [[batch]]
//! sources = ["icons"]
//! output = "src/icons.rs"
//! prefix = "ICON_"
//! format = "rust"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the configuration file
pub const CONFIG_FILE: &str = "ivg.toml";

/// Contents of `ivg.toml`
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct IvgConfig {
    #[serde(default)]
    pub encoder: EncoderConfig,
    #[serde(default)]
    pub batch: Vec<BatchConfig>,
}

/// Settings shared by every batch
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EncoderConfig {
    /// Keep full coordinate precision
    #[serde(default)]
    pub high_resolution_coordinates: bool,
}

/// One group of sources written to one output
#[derive(Debug, Deserialize, Serialize)]
pub struct BatchConfig {
    /// SVG files or directories, relative to the config file
    pub sources: Vec<String>,
    /// Generated module, or directory for raw output
    #[serde(default = "default_output")]
    pub output: String,
    /// Prepended to every constant name
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub format: OutputFormat,
}

/// What a batch produces
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// A Rust module with one byte-slice constant per icon
    #[default]
    Rust,
    /// One `.ivg` file per icon
    Raw,
}

fn default_output() -> String {
    "src/icons.rs".to_string()
}

impl IvgConfig {
    /// Load configuration from `ivg.toml` in `path`
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_FILE);

        if !config_path.exists() {
            anyhow::bail!(
                "No {} found in {}. Run `svg2ivg init` to create one.",
                CONFIG_FILE,
                path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Configuration written by `svg2ivg init`
    pub fn starter() -> Self {
        Self {
            encoder: EncoderConfig::default(),
            batch: vec![BatchConfig {
                sources: vec!["icons".to_string()],
                output: default_output(),
                prefix: "ICON_".to_string(),
                format: OutputFormat::Rust,
            }],
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize ivg config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IvgConfig::from_toml(
            r#"
            [[batch]]
            sources = ["assets"]
            "#,
        )
        .unwrap();

        assert!(!config.encoder.high_resolution_coordinates);
        assert_eq!(config.batch.len(), 1);
        let batch = &config.batch[0];
        assert_eq!(batch.sources, vec!["assets"]);
        assert_eq!(batch.output, "src/icons.rs");
        assert_eq!(batch.prefix, "");
        assert_eq!(batch.format, OutputFormat::Rust);
    }

    #[test]
    fn test_full_config() {
        let config = IvgConfig::from_toml(
            r#"
            [encoder]
            high_resolution_coordinates = true

            [[batch]]
            sources = ["a", "b/c.svg"]
            output = "out"
            prefix = "IC_"
            format = "raw"

            [[batch]]
            sources = ["d"]
            "#,
        )
        .unwrap();

        assert!(config.encoder.high_resolution_coordinates);
        assert_eq!(config.batch.len(), 2);
        assert_eq!(config.batch[0].format, OutputFormat::Raw);
        assert_eq!(config.batch[0].prefix, "IC_");
    }

    #[test]
    fn test_unknown_format() {
        let result = IvgConfig::from_toml(
            r#"
            [[batch]]
            sources = ["a"]
            format = "png"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_starter_round_trips() {
        let toml = IvgConfig::starter().to_toml().unwrap();
        let config = IvgConfig::from_toml(&toml).unwrap();
        assert_eq!(config.batch[0].prefix, "ICON_");
        assert_eq!(config.batch[0].sources, vec!["icons"]);
    }

    #[test]
    fn test_missing_file() {
        let dir = std::env::temp_dir().join(format!("svg2ivg-config-{}", std::process::id()));
        let err = IvgConfig::load_from_dir(&dir).unwrap_err();
        assert!(err.to_string().contains("svg2ivg init"));
    }
}
