//! Shared defaults used across the editor crates.

/// Default number of grid columns.
pub const DEFAULT_COLUMNS: u32 = 5;

/// Default number of grid rows.
pub const DEFAULT_ROWS: u32 = 12;

/// Default gap in millimetres (physical-page mode).
pub const DEFAULT_GAP_MM: f64 = 4.0;

/// Default gap in pixels (screen-only mode).
pub const DEFAULT_GAP_PX: f64 = 8.0;

/// Upper bound for the column/row steppers.
pub const MAX_GRID_TRACKS: u32 = 24;

/// Hard cap on columns and rows for any grid, including loaded templates.
pub const GRID_TRACK_LIMIT: u32 = 1000;

/// Default maximum size of an uploaded image (2 MiB).
pub const MAX_IMAGE_BYTES: u64 = 2 * 1024 * 1024;

/// Page margin on every side of an exported document, in millimetres.
pub const PAGE_MARGIN_MM: f64 = 15.0;

/// Element border colour in the stylesheet and exported document.
pub const BORDER_COLOR: &str = "#8b7e6a";

/// Body text colour in the stylesheet and exported document.
pub const TEXT_COLOR: &str = "#2b2b2b";

/// Pointer travel, in pixels, under which a press/release counts as a click.
pub const CLICK_TOLERANCE_PX: f64 = 3.0;
