//! Editor configuration.
//!
//! Every section carries `#[serde(default)]`, so a user file only needs the
//! keys it changes.

use crate::error::{SettingsError, SettingsResult};
use gridkit_core::constants;
use gridkit_core::{PageSize, Rgb};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Grid defaults for a new layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Column count of a new layout
    pub columns: u32,
    /// Row count of a new layout
    pub rows: u32,
    /// Gap in millimetres (physical-page mode)
    pub gap_mm: f64,
    /// Gap in pixels (screen-only mode)
    pub gap_px: f64,
    /// Start new layouts in physical-page mode
    pub physical_page: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            columns: constants::DEFAULT_COLUMNS,
            rows: constants::DEFAULT_ROWS,
            gap_mm: constants::DEFAULT_GAP_MM,
            gap_px: constants::DEFAULT_GAP_PX,
            physical_page: true,
        }
    }
}

impl GridSettings {
    /// Default gap for the given mode.
    pub fn gap_for(&self, physical_page: bool) -> f64 {
        if physical_page {
            self.gap_mm
        } else {
            self.gap_px
        }
    }
}

/// Stepper bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitSettings {
    pub max_columns: u32,
    pub max_rows: u32,
    pub max_gap_mm: f64,
    pub max_gap_px: f64,
    pub gap_step_mm: f64,
    pub gap_step_px: f64,
}

impl Default for LimitSettings {
    fn default() -> Self {
        Self {
            max_columns: constants::MAX_GRID_TRACKS,
            max_rows: constants::MAX_GRID_TRACKS,
            max_gap_mm: 10.0,
            max_gap_px: 50.0,
            gap_step_mm: 0.1,
            gap_step_px: 1.0,
        }
    }
}

impl LimitSettings {
    /// Largest gap allowed in the given mode.
    pub fn max_gap_for(&self, physical_page: bool) -> f64 {
        if physical_page {
            self.max_gap_mm
        } else {
            self.max_gap_px
        }
    }

    /// Stepper increment in the given mode.
    pub fn gap_step_for(&self, physical_page: bool) -> f64 {
        if physical_page {
            self.gap_step_mm
        } else {
            self.gap_step_px
        }
    }
}

/// Image upload policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Largest accepted image, in bytes
    pub max_image_bytes: u64,
    /// Accepted MIME types
    pub allowed_types: Vec<String>,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            max_image_bytes: constants::MAX_IMAGE_BYTES,
            allowed_types: ["image/jpeg", "image/png", "image/gif", "image/webp"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Document export defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub page_size: PageSize,
    /// Margin on every side, in millimetres
    pub margin_mm: f64,
    pub border_color: Rgb,
    pub text_color: Rgb,
    /// Where exported documents are written; the working directory if unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_directory: Option<PathBuf>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            margin_mm: constants::PAGE_MARGIN_MM,
            border_color: Rgb::from_hex_or_white(constants::BORDER_COLOR),
            text_color: Rgb::from_hex_or_white(constants::TEXT_COLOR),
            output_directory: None,
        }
    }
}

/// Pointer tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Pointer travel, in pixels, under which a press/release is a click
    pub click_tolerance_px: f64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            click_tolerance_px: constants::CLICK_TOLERANCE_PX,
        }
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EditorConfig {
    pub grid: GridSettings,
    pub limits: LimitSettings,
    pub assets: AssetSettings,
    pub export: ExportSettings,
    pub interaction: InteractionSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
        Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl EditorConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config location, e.g. `~/.config/gridkit/config.toml`.
    pub fn default_path() -> SettingsResult<PathBuf> {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no config or home directory".to_string())
            })?;
        path.push("gridkit");
        path.push("config.toml");
        Ok(path)
    }

    /// Load config from file (JSON or TOML, by extension)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;
        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        config.validate()?;
        tracing::info!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Loads `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML, by extension)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        tracing::info!("Saved editor config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let limits = &self.limits;
        if limits.max_columns == 0 || limits.max_rows == 0 {
            return Err(SettingsError::invalid(
                "limits",
                "column and row limits must be at least 1",
            ));
        }
        if limits.max_columns > constants::GRID_TRACK_LIMIT
            || limits.max_rows > constants::GRID_TRACK_LIMIT
        {
            return Err(SettingsError::invalid(
                "limits",
                format!(
                    "column and row limits must not exceed {}",
                    constants::GRID_TRACK_LIMIT
                ),
            ));
        }
        for (key, value) in [
            ("limits.max_gap_mm", limits.max_gap_mm),
            ("limits.max_gap_px", limits.max_gap_px),
            ("limits.gap_step_mm", limits.gap_step_mm),
            ("limits.gap_step_px", limits.gap_step_px),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::invalid(key, "must be greater than 0"));
            }
        }

        let grid = &self.grid;
        if grid.columns == 0 || grid.columns > limits.max_columns {
            return Err(SettingsError::invalid(
                "grid.columns",
                format!("must be between 1 and {}", limits.max_columns),
            ));
        }
        if grid.rows == 0 || grid.rows > limits.max_rows {
            return Err(SettingsError::invalid(
                "grid.rows",
                format!("must be between 1 and {}", limits.max_rows),
            ));
        }
        for (key, value, max) in [
            ("grid.gap_mm", grid.gap_mm, limits.max_gap_mm),
            ("grid.gap_px", grid.gap_px, limits.max_gap_px),
        ] {
            if !(value.is_finite() && (0.0..=max).contains(&value)) {
                return Err(SettingsError::invalid(
                    key,
                    format!("must be between 0 and {}", max),
                ));
            }
        }

        if self.assets.max_image_bytes == 0 {
            return Err(SettingsError::invalid(
                "assets.max_image_bytes",
                "must be greater than 0",
            ));
        }
        if self.assets.allowed_types.is_empty() {
            return Err(SettingsError::invalid(
                "assets.allowed_types",
                "at least one image type is required",
            ));
        }
        if let Some(bad) = self
            .assets
            .allowed_types
            .iter()
            .find(|mime| !mime.starts_with("image/"))
        {
            return Err(SettingsError::invalid(
                "assets.allowed_types",
                format!("'{}' is not an image type", bad),
            ));
        }

        let export = &self.export;
        if !(export.margin_mm.is_finite() && export.margin_mm >= 0.0) {
            return Err(SettingsError::invalid(
                "export.margin_mm",
                "must be a non-negative number",
            ));
        }
        let (width, height) = export.page_size.dimensions_mm();
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(SettingsError::invalid(
                "export.page_size",
                "page dimensions must be positive",
            ));
        }
        if 2.0 * export.margin_mm >= width.min(height) {
            return Err(SettingsError::invalid(
                "export.margin_mm",
                format!(
                    "margin leaves no printable area on a {}x{}mm page",
                    width, height
                ),
            ));
        }

        let tolerance = self.interaction.click_tolerance_px;
        if !(tolerance.is_finite() && tolerance >= 0.0) {
            return Err(SettingsError::invalid(
                "interaction.click_tolerance_px",
                "must be a non-negative number",
            ));
        }

        Ok(())
    }

    /// Overlay the sections of `other` that differ from the defaults.
    pub fn merge(&mut self, other: &EditorConfig) {
        if other.grid != GridSettings::default() {
            self.grid = other.grid.clone();
        }
        if other.limits != LimitSettings::default() {
            self.limits = other.limits.clone();
        }
        if other.assets != AssetSettings::default() {
            self.assets = other.assets.clone();
        }
        if other.export != ExportSettings::default() {
            self.export = other.export.clone();
        }
        if other.interaction != InteractionSettings::default() {
            self.interaction = other.interaction.clone();
        }
    }
}
