//! Unit conversion utilities
//!
//! Handles conversion between physical page units (mm, pt) and screen pixels.
//! The grid gap is stored in millimetres in physical-page mode and in pixels in
//! screen-only mode; `GapUnit` records which one is in effect.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// CSS reference resolution used for screen rendering.
pub const SCREEN_DPI: f64 = 96.0;

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Typographic points per inch.
pub const PT_PER_INCH: f64 = 72.0;

/// Unit the grid gap is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GapUnit {
    /// Millimetres (physical-page mode)
    #[default]
    Millimeters,
    /// Pixels (screen-only mode)
    Pixels,
}

impl GapUnit {
    /// Picks the unit for the given physical-page mode flag.
    pub fn for_mode(physical_page: bool) -> Self {
        if physical_page {
            Self::Millimeters
        } else {
            Self::Pixels
        }
    }

    /// CSS suffix for this unit.
    pub fn css_suffix(&self) -> &'static str {
        match self {
            Self::Millimeters => "mm",
            Self::Pixels => "px",
        }
    }
}

impl fmt::Display for GapUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millimeters => write!(f, "Millimeters"),
            Self::Pixels => write!(f, "Pixels"),
        }
    }
}

impl FromStr for GapUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "millimeters" | "millimetres" => Ok(Self::Millimeters),
            "px" | "pixels" => Ok(Self::Pixels),
            _ => Err(format!("Unknown gap unit: {}", s)),
        }
    }
}

/// Converts millimetres to screen pixels at 96 dpi.
pub fn mm_to_px(mm: f64) -> f64 {
    mm * SCREEN_DPI / MM_PER_INCH
}

/// Converts screen pixels at 96 dpi to millimetres.
pub fn px_to_mm(px: f64) -> f64 {
    px * MM_PER_INCH / SCREEN_DPI
}

/// Converts typographic points to millimetres.
pub fn pt_to_mm(pt: f64) -> f64 {
    pt * MM_PER_INCH / PT_PER_INCH
}

/// Converts millimetres to typographic points.
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * PT_PER_INCH / MM_PER_INCH
}

/// Converts a gap value to on-screen pixels.
pub fn gap_to_px(gap: f64, unit: GapUnit) -> f64 {
    match unit {
        GapUnit::Millimeters => mm_to_px(gap),
        GapUnit::Pixels => gap,
    }
}

/// Converts a gap value to millimetres.
pub fn gap_to_mm(gap: f64, unit: GapUnit) -> f64 {
    match unit {
        GapUnit::Millimeters => gap,
        GapUnit::Pixels => px_to_mm(gap),
    }
}

/// Format a gap value for display (three decimals, no unit).
pub fn format_gap(value: f64) -> String {
    if value.is_finite() {
        format!("{:.3}", value)
    } else {
        "0.000".to_string()
    }
}

/// Parse a gap value typed by the user.
///
/// Accepts an optional trailing unit suffix (`mm` / `px`) that must match `unit`.
pub fn parse_gap(input: &str, unit: GapUnit) -> Result<f64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0.0);
    }

    let number = match input.strip_suffix(unit.css_suffix()) {
        Some(rest) => rest.trim(),
        None => {
            if input.ends_with("mm") || input.ends_with("px") {
                return Err(format!("Gap must be given in {}", unit.css_suffix()));
            }
            input
        }
    };

    let value = number.parse::<f64>().map_err(|e| e.to_string())?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("Gap must be a non-negative number, got {}", value));
    }
    Ok(value)
}
