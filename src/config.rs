//! Pipeline configuration.
//!
//! Handles loading, validating, and merging `asset-variants.toml`. Stock
//! defaults are the base layer; a user config file, when present, is merged
//! on top; command-line path flags override both.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [paths]
//! source_dir = "images"                  # Source images, scanned non-recursively
//! manifest = "image-manifest.json"       # {"images": [...]} list of used files
//! output_dir = "images/optimized"        # Receives jpg/ and webp/
//!
//! [markup]
//! url_prefix = "images/optimized"        # Public URL of the output directory
//! sizes = "(max-width: 860px) 100vw, 50vw"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [paths]
//! source_dir = "public/photos"
//! output_dir = "public/photos/optimized"
//! ```
//!
//! Unknown keys are rejected to catch typos early. The variant matrix itself
//! (widths, encodings, qualities) is not configurable.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Config file name looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "asset-variants.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Pipeline configuration loaded from `asset-variants.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Where sources, manifest, and variants live.
    pub paths: PathsConfig,
    /// Defaults for picture markup.
    pub markup: MarkupConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub source_dir: PathBuf,
    pub manifest: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("images"),
            manifest: PathBuf::from("image-manifest.json"),
            output_dir: PathBuf::from("images/optimized"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkupConfig {
    /// URL under which the output directory is served, without trailing `/`.
    pub url_prefix: String,
    /// Default `sizes` hint for `<source>` and `<img>`.
    pub sizes: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            url_prefix: "images/optimized".to_string(),
            sizes: crate::markup::DEFAULT_SIZES.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Validate config values before any file is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let paths = [
            ("paths.source_dir", &self.paths.source_dir),
            ("paths.manifest", &self.paths.manifest),
            ("paths.output_dir", &self.paths.output_dir),
        ];
        for (key, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if same_location(&self.paths.output_dir, &self.paths.source_dir) {
            return Err(ConfigError::Validation(
                "paths.output_dir must differ from paths.source_dir".into(),
            ));
        }
        if self.markup.url_prefix.ends_with('/') {
            return Err(ConfigError::Validation(
                "markup.url_prefix must not end with '/'".into(),
            ));
        }
        if self.markup.sizes.trim().is_empty() {
            return Err(ConfigError::Validation(
                "markup.sizes must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Lexical path equality ignoring `.` segments and trailing slashes.
fn same_location(a: &Path, b: &Path) -> bool {
    fn significant(p: &Path) -> Vec<Component<'_>> {
        p.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect::<Vec<_>>()
    }
    significant(a) == significant(b)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(PipelineConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(config_path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<PipelineConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: PipelineConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config_path`, falling back to stock defaults when the
/// file is absent.
pub fn load_config(config_path: &Path) -> Result<PipelineConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(config_path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock config with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# asset-variants configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Paths (relative to the working directory)
# ---------------------------------------------------------------------------
[paths]
# Directory holding the source images. Only files directly inside it with a
# .jpg, .jpeg or .png extension are considered.
source_dir = "images"

# JSON document listing the images the site uses: {"images": ["a.jpg"]}
manifest = "image-manifest.json"

# Receives jpg/ and webp/. Both are emptied at the start of every run.
output_dir = "images/optimized"

# ---------------------------------------------------------------------------
# Picture markup
# ---------------------------------------------------------------------------
[markup]
# Public URL of output_dir, without a trailing slash.
url_prefix = "images/optimized"

# Default sizes hint for <source> and <img>.
sizes = "(max-width: 860px) 100vw, 50vw"
"##
}
