//! Generator configuration.
//!
//! Handles loading and validating `autonav.toml`. The file is optional and
//! sparse: stock defaults are the base layer and user values are merged on
//! top, key by key.
//!
//! ## Config File Location
//!
//! ```text
//! site/
//! ├── autonav.toml          # Generator config (optional)
//! ├── _data/
//! │   └── navigation.yml    # Default output (reserved dir, never scanned)
//! ├── index.md
//! └── guides/
//!     └── ...
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! output = "_data/navigation.yml"  # Relative to the site root
//! format = "yaml"                  # "yaml" or "json"
//! extensions = ["md"]              # Content file extensions (case-sensitive)
//! reserved_prefix = "_"            # Marks internal dirs and partials
//! index_name = "index"             # Stem that maps to its directory URL
//! read_errors = "abort"            # "abort" or "fallback"
//!
//! [processing]
//! max_processes = 4                # Max parallel readers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the site root.
pub const CONFIG_FILE: &str = "autonav.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Serialization format of the navigation file.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl OutputFormat {
    /// Lowercase name, as written in `autonav.toml`.
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Yaml => "yaml",
            OutputFormat::Json => "json",
        }
    }
}

/// What to do when a content file can't be read while extracting its title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadErrorPolicy {
    /// Fail the whole run.
    #[default]
    Abort,
    /// Use the filename-derived title and log a warning.
    Fallback,
}

/// Generator configuration loaded from `autonav.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Output path, relative to the site root.
    pub output: String,
    /// Serialization format of the output.
    pub format: OutputFormat,
    /// Extensions (without the dot) that mark a content file.
    pub extensions: Vec<String>,
    /// Leading marker for internal directories and partial files.
    pub reserved_prefix: String,
    /// File stem whose URL is its directory (`guides/index.md` → `/guides/`).
    pub index_name: String,
    /// Read failure handling during title extraction.
    pub read_errors: ReadErrorPolicy,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            output: "_data/navigation.yml".to_string(),
            format: OutputFormat::default(),
            extensions: vec!["md".to_string()],
            reserved_prefix: "_".to_string(),
            index_name: "index".to_string(),
            read_errors: ReadErrorPolicy::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl NavConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.trim().is_empty() {
            return Err(ConfigError::Validation("output must not be empty".into()));
        }
        if self.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "extensions must not be empty".into(),
            ));
        }
        if let Some(ext) = self
            .extensions
            .iter()
            .find(|e| e.is_empty() || e.starts_with('.'))
        {
            return Err(ConfigError::Validation(format!(
                "extensions must be non-empty and without a leading dot, got {ext:?}"
            )));
        }
        if self.reserved_prefix.is_empty() {
            return Err(ConfigError::Validation(
                "reserved_prefix must not be empty".into(),
            ));
        }
        if self.index_name.is_empty() {
            return Err(ConfigError::Validation(
                "index_name must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Whether `ext` (without the dot) marks a content file.
    pub fn is_content_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }

    /// Whether a file or directory name carries the reserved marker.
    pub fn is_reserved(&self, name: &str) -> bool {
        name.starts_with(self.reserved_prefix.as_str())
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel file readers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, never less than one
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(NavConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock defaults: {e}")))
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

/// Load `autonav.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file doesn't exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the base, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<NavConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: NavConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `autonav.toml` in the site root.
pub fn load_config(root: &Path) -> Result<NavConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `autonav.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# autonav configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Where the navigation file is written, relative to the site root.
# The file is fully replaced on every run.
output = "_data/navigation.yml"

# Output format: "yaml" or "json".
format = "yaml"

# Extensions (without the dot) of content files. Matching is case-sensitive.
extensions = ["md"]

# Names starting with this marker are internal. Top-level directories and
# files carrying it are skipped; nested directories carrying it are scanned
# but left out of the navigation hierarchy.
reserved_prefix = "_"

# A file with this stem links to its directory: guides/index.md -> /guides/
index_name = "index"

# What to do when a content file can't be read:
#   "abort"    - stop the run with an error
#   "fallback" - title the page after its filename and log a warning
read_errors = "abort"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel file readers. Omit for auto (= number of CPU cores).
# Values above the core count are clamped down.
# max_processes = 4
"##
}
