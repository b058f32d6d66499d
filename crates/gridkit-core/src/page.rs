//! Physical page sizes for document export.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Page size of an exported document.
///
/// Serialises as its identifier (`"a4"`), or as
/// `{ "custom": { "width_mm": .., "height_mm": .. } }` for custom pages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    /// Newspaper tabloid, 255 x 355 mm
    #[default]
    Tabloid,
    /// ISO A4, 210 x 297 mm
    A4,
    /// US Letter, 216 x 279 mm
    Letter,
    /// Arbitrary width and height in millimetres
    Custom { width_mm: f64, height_mm: f64 },
}

impl PageSize {
    /// All fixed sizes, in menu order.
    pub const PRESETS: [PageSize; 3] = [PageSize::Tabloid, PageSize::A4, PageSize::Letter];

    /// Identifier used in file names and configuration.
    pub fn id(&self) -> &'static str {
        match self {
            PageSize::Tabloid => "tabloid",
            PageSize::A4 => "a4",
            PageSize::Letter => "letter",
            PageSize::Custom { .. } => "custom",
        }
    }

    /// Page width and height in millimetres (portrait).
    pub fn dimensions_mm(&self) -> (f64, f64) {
        match *self {
            PageSize::Tabloid => (255.0, 355.0),
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (216.0, 279.0),
            PageSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Human readable label.
    pub fn label(&self) -> String {
        let (w, h) = self.dimensions_mm();
        match self {
            PageSize::Tabloid => format!("Tabloid ({}x{}mm)", w, h),
            PageSize::A4 => format!("A4 ({}x{}mm)", w, h),
            PageSize::Letter => format!("Letter ({}x{}mm)", w, h),
            PageSize::Custom { .. } => format!("Custom ({}x{}mm)", w, h),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PageSize {
    type Err = String;

    /// Parses `tabloid`, `a4`, `letter` or `custom:<w>x<h>` (millimetres).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "tabloid" | "newspaper" => Ok(PageSize::Tabloid),
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            other => {
                let dims = other
                    .strip_prefix("custom:")
                    .ok_or_else(|| format!("Unknown page size: {}", s))?;
                let (w, h) = dims
                    .split_once('x')
                    .ok_or_else(|| format!("Custom size must look like custom:<w>x<h>, got {}", s))?;
                let width_mm = w.trim().parse::<f64>().map_err(|e| e.to_string())?;
                let height_mm = h.trim().parse::<f64>().map_err(|e| e.to_string())?;
                if !(width_mm > 0.0 && height_mm > 0.0) || !width_mm.is_finite() || !height_mm.is_finite() {
                    return Err(format!("Custom page must have positive dimensions, got {}", s));
                }
                Ok(PageSize::Custom {
                    width_mm,
                    height_mm,
                })
            }
        }
    }
}
