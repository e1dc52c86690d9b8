//! Configuration loading.
//!
//! Stock defaults are serialized to a TOML table and the user's file, when
//! given, is merged on top of it. Only the keys being changed need to appear:
//!
//! ```toml
//! [export]
//! jpeg_quality = 90
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [ingest]
//! append_order = "arrival"       # or "input"
//!
//! [export]
//! file_name = "my_images.pdf"
//! jpeg_quality = 75              # 1-100
//! compress = true                # deflate content streams
//! clear_status_after_ms = 2000   # delay before the status line clears
//!
//! [processing]
//! max_workers = 4                # omit for auto = CPU cores
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::export::ExportOptions;
use crate::imaging::Quality;
use crate::ingest::AppendOrder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

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

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    pub ingest: IngestConfig,
    pub export: ExportConfig,
    pub processing: ProcessingConfig,
}

impl CarouselConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.export.jpeg_quality) {
            return Err(ConfigError::Validation(
                "export.jpeg_quality must be 1-100".into(),
            ));
        }
        if self.export.file_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "export.file_name must not be empty".into(),
            ));
        }
        if self.processing.max_workers == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_workers must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IngestConfig {
    pub append_order: AppendOrder,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Name of the written document.
    pub file_name: String,
    /// JPEG quality used when embedding page images.
    pub jpeg_quality: u32,
    /// Deflate content streams in the output.
    pub compress: bool,
    /// How long `Finished` stays on the status line.
    pub clear_status_after_ms: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: "my_images.pdf".to_string(),
            jpeg_quality: 75,
            compress: true,
            clear_status_after_ms: 2000,
        }
    }
}

impl ExportConfig {
    pub fn quality(&self) -> Quality {
        Quality::new(self.jpeg_quality)
    }

    pub fn options(&self) -> ExportOptions {
        ExportOptions {
            file_name: self.file_name.clone(),
            clear_after: Duration::from_millis(self.clear_status_after_ms),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel ingestion workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_workers: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_workers.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(CarouselConfig::default())?)
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

/// Merge an optional overlay onto the stock defaults, then deserialize and
/// validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<CarouselConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: CarouselConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from an optional file path.
///
/// `None` yields the stock defaults. A path that does not exist is an error:
/// the user named it explicitly.
pub fn load_config(path: Option<&Path>) -> Result<CarouselConfig, ConfigError> {
    let overlay = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Some(toml::from_str::<toml::Value>(&content)?)
        }
        None => None,
    };
    resolve_config(overlay)
}

/// Returns a fully-commented stock config file.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# PDF Carousel Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Pass this file with `pdf-carousel --config <file> ...`.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Ingestion
# ---------------------------------------------------------------------------
[ingest]
# When decoded pages join the list:
#   "arrival" - as each file finishes decoding (small files may overtake)
#   "input"   - after the whole batch, in the order the files were given
append_order = "arrival"

# ---------------------------------------------------------------------------
# Export
# ---------------------------------------------------------------------------
[export]
# Name of the written PDF.
file_name = "my_images.pdf"

# JPEG quality for embedded page images (1 = smallest, 100 = best).
jpeg_quality = 75

# Deflate-compress content streams.
compress = true

# Milliseconds the "Finished" status stays up before clearing.
clear_status_after_ms = 2000

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel decode workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_workers = 4
"##
}
