//! Sheet configuration module.
//!
//! Handles loading, validating, and merging `contact-sheet.toml` files.
//! Configuration is layered: stock defaults are overridden by a config file,
//! which is in turn overridden by command-line flags.
//!
//! ## Config File Location
//!
//! Place `contact-sheet.toml` in the folder being rendered, or pass an
//! explicit file with `--config`:
//!
//! ```text
//! photos/
//! ├── contact-sheet.toml       # Picked up automatically
//! ├── beach.jpg
//! └── trip/
//!     └── ...
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [layout]
//! images_per_row = 5          # Thumbnails per row (1-20)
//! include_subfolders = false  # Walk subfolders, one titled section each
//!
//! [colors]
//! background = "#FFFFFF"      # Canvas background
//! text = "#000000"            # Text, dividers, and thumbnail padding
//!
//! [font]
//! path = "font/lanting.ttf"   # TrueType font for all text
//!
//! [processing]
//! max_processes = 4           # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse, override just the values you want:
//!
//! ```toml
//! [colors]
//! background = "#202020"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::color::{ColorError, parse_hex_color};
use crate::render::{MAX_PER_ROW, MIN_PER_ROW, RenderError, RenderOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the rendered folder.
pub const CONFIG_FILE_NAME: &str = "contact-sheet.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Config color error: {0}")]
    Color(#[from] ColorError),
}

/// Sheet configuration loaded from `contact-sheet.toml`.
///
/// All fields have defaults. Config files need only specify the values they
/// want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetConfig {
    /// Grid shape and discovery mode.
    pub layout: LayoutConfig,
    /// Background and text colors.
    pub colors: ColorConfig,
    /// Font used for captions, titles, and footer.
    pub font: FontConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl SheetConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let per_row = self.layout.images_per_row;
        if !(MIN_PER_ROW..=MAX_PER_ROW).contains(&per_row) {
            return Err(ConfigError::Validation(format!(
                "layout.images_per_row must be {MIN_PER_ROW}-{MAX_PER_ROW}, got {per_row}"
            )));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        if self.font.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation("font.path must not be empty".into()));
        }
        parse_hex_color(&self.colors.background)?;
        parse_hex_color(&self.colors.text)?;
        Ok(())
    }

    /// Render options for `root` from this config.
    pub fn to_render_options(&self, root: impl Into<PathBuf>) -> Result<RenderOptions, RenderError> {
        RenderOptions::new(
            root,
            self.layout.images_per_row,
            self.layout.include_subfolders,
            &self.colors.background,
            &self.colors.text,
        )
    }
}

/// Grid shape and discovery mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Thumbnails per row, 1 to 20.
    pub images_per_row: u32,
    /// Walk subfolders and give each one its own titled section.
    pub include_subfolders: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            images_per_row: 5,
            include_subfolders: false,
        }
    }
}

/// Sheet colors as `#RRGGBB` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Canvas background.
    pub background: String,
    /// Text, dividers, and thumbnail padding.
    pub text: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#FFFFFF".to_string(),
            text: "#000000".to_string(),
        }
    }
}

/// Font settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    /// TrueType/OpenType font file. Relative paths resolve against the
    /// working directory.
    pub path: PathBuf,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("font/lanting.ttf"),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel thumbnail workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer that file and flag overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SheetConfig::default()).expect("default config must serialize")
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

/// Read a config file as a raw TOML value.
pub fn load_raw_file(file: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(file)?;
    Ok(toml::from_str(&content)?)
}

/// Load `contact-sheet.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no config file.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.is_file() {
        return Ok(None);
    }
    load_raw_file(&config_path).map(Some)
}

/// Merge optional overlays onto a base value in order, then deserialize and
/// validate.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<SheetConfig, ConfigError> {
    let merged = overlays.into_iter().fold(base, merge_toml);
    let config: SheetConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Settings given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagOverrides {
    pub images_per_row: Option<u32>,
    pub include_subfolders: Option<bool>,
    pub background: Option<String>,
    pub text: Option<String>,
    pub font_path: Option<PathBuf>,
}

impl FlagOverrides {
    /// The flags that were set, as a sparse config layer.
    pub fn to_toml(&self) -> toml::Value {
        let mut layout = toml::Table::new();
        if let Some(n) = self.images_per_row {
            layout.insert("images_per_row".into(), toml::Value::Integer(n.into()));
        }
        if let Some(recurse) = self.include_subfolders {
            layout.insert("include_subfolders".into(), toml::Value::Boolean(recurse));
        }

        let mut colors = toml::Table::new();
        if let Some(bg) = &self.background {
            colors.insert("background".into(), toml::Value::String(bg.clone()));
        }
        if let Some(text) = &self.text {
            colors.insert("text".into(), toml::Value::String(text.clone()));
        }

        let mut font = toml::Table::new();
        if let Some(path) = &self.font_path {
            font.insert(
                "path".into(),
                toml::Value::String(path.to_string_lossy().into_owned()),
            );
        }

        let mut root = toml::Table::new();
        for (key, table) in [("layout", layout), ("colors", colors), ("font", font)] {
            if !table.is_empty() {
                root.insert(key.into(), toml::Value::Table(table));
            }
        }
        toml::Value::Table(root)
    }
}

/// Load config for a render of `dir`.
///
/// An explicit `file` must exist; otherwise `contact-sheet.toml` in `dir` is
/// used when present. `flags` go on top. Stock defaults fill everything not
/// set.
pub fn load_config(
    dir: &Path,
    file: Option<&Path>,
    flags: &FlagOverrides,
) -> Result<SheetConfig, ConfigError> {
    let file_layer = match file {
        Some(file) => Some(load_raw_file(file)?),
        None => load_raw_config(dir)?,
    };
    resolve_config(
        stock_defaults_value(),
        file_layer.into_iter().chain([flags.to_toml()]),
    )
}

/// Returns a fully-commented stock `contact-sheet.toml` with all keys.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Contact Sheet Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the folder being rendered as contact-sheet.toml,
# or pass it explicitly with --config. Command-line flags override it.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
[layout]
# Thumbnails per row, 1 to 20.
images_per_row = 5

# Walk subfolders too. Each folder with images gets its own titled section.
include_subfolders = false

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
# Canvas background, as #RRGGBB.
background = "#FFFFFF"

# Text, divider lines, and thumbnail padding, as #RRGGBB.
text = "#000000"

# ---------------------------------------------------------------------------
# Font
# ---------------------------------------------------------------------------
[font]
# TrueType font used for every line of text on the sheet.
# Relative paths resolve against the working directory.
path = "font/lanting.ttf"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel thumbnail workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
