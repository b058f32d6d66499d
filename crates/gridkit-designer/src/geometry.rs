//! Grid geometry and pixel/cell coordinate mapping.
//!
//! Handles conversion between pixel coordinates on the rendered grid surface
//! and discrete 1-based grid cells. All functions here are pure.

use gridkit_core::constants::GRID_TRACK_LIMIT;
use gridkit_core::LayoutError;
use serde::{Deserialize, Serialize};

/// Grid dimensions: column count, row count and gap.
///
/// The gap is in millimetres in physical-page mode and pixels otherwise; the
/// unit is tracked by the editor, not here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub columns: u32,
    pub rows: u32,
    pub gap: f64,
}

impl GridConfig {
    /// Creates a validated grid configuration.
    pub fn new(columns: u32, rows: u32, gap: f64) -> Result<Self, LayoutError> {
        let config = Self { columns, rows, gap };
        config.validate()?;
        Ok(config)
    }

    /// Checks `1 <= columns, rows <= GRID_TRACK_LIMIT` and a finite,
    /// non-negative gap.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(LayoutError::InvalidGrid {
                reason: format!(
                    "grid needs at least one column and row, got {}x{}",
                    self.columns, self.rows
                ),
            });
        }
        if self.columns > GRID_TRACK_LIMIT || self.rows > GRID_TRACK_LIMIT {
            return Err(LayoutError::InvalidGrid {
                reason: format!(
                    "grid is limited to {} columns and rows, got {}x{}",
                    GRID_TRACK_LIMIT, self.columns, self.rows
                ),
            });
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(LayoutError::InvalidGrid {
                reason: format!("gap must be finite and non-negative, got {}", self.gap),
            });
        }
        Ok(())
    }

    /// Returns true if `rect` lies entirely inside the grid.
    pub fn contains(&self, rect: &GridRect) -> bool {
        rect.column >= 1
            && rect.row >= 1
            && rect.column_span >= 1
            && rect.row_span >= 1
            && rect.last_column() <= u64::from(self.columns)
            && rect.last_row() <= u64::from(self.rows)
    }

    /// Error describing why `rect` does not fit.
    pub(crate) fn out_of_bounds(&self, rect: &GridRect) -> LayoutError {
        LayoutError::OutOfBounds {
            column: rect.column,
            row: rect.row,
            column_span: rect.column_span,
            row_span: rect.row_span,
            columns: self.columns,
            rows: self.rows,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: gridkit_core::constants::DEFAULT_COLUMNS,
            rows: gridkit_core::constants::DEFAULT_ROWS,
            gap: gridkit_core::constants::DEFAULT_GAP_MM,
        }
    }
}

/// A single grid cell, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    pub column: u32,
    pub row: u32,
}

impl CellCoord {
    pub fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }
}

/// Cell-rectangle `[column, column+column_span) x [row, row+row_span)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridRect {
    pub column: u32,
    pub row: u32,
    pub column_span: u32,
    pub row_span: u32,
}

impl GridRect {
    pub fn new(column: u32, row: u32, column_span: u32, row_span: u32) -> Self {
        Self {
            column,
            row,
            column_span,
            row_span,
        }
    }

    /// A 1x1 rectangle at `cell`.
    pub fn cell(cell: CellCoord) -> Self {
        Self::new(cell.column, cell.row, 1, 1)
    }

    /// Smallest rectangle covering both cells, regardless of their order.
    pub fn from_corners(a: CellCoord, b: CellCoord) -> Self {
        let min_col = a.column.min(b.column);
        let max_col = a.column.max(b.column);
        let min_row = a.row.min(b.row);
        let max_row = a.row.max(b.row);
        Self::new(min_col, min_row, max_col - min_col + 1, max_row - min_row + 1)
    }

    pub fn origin(&self) -> CellCoord {
        CellCoord::new(self.column, self.row)
    }

    /// Last column covered (inclusive). Widened so huge spans cannot wrap.
    pub fn last_column(&self) -> u64 {
        (u64::from(self.column) + u64::from(self.column_span)).saturating_sub(1)
    }

    /// Last row covered (inclusive).
    pub fn last_row(&self) -> u64 {
        (u64::from(self.row) + u64::from(self.row_span)).saturating_sub(1)
    }

    pub fn area(&self) -> u64 {
        u64::from(self.column_span) * u64::from(self.row_span)
    }

    /// Same spans, new origin.
    pub fn with_origin(&self, column: u32, row: u32) -> Self {
        Self::new(column, row, self.column_span, self.row_span)
    }

    /// Same origin, new spans.
    pub fn with_spans(&self, column_span: u32, row_span: u32) -> Self {
        Self::new(self.column, self.row, column_span, row_span)
    }

    pub fn contains_cell(&self, cell: CellCoord) -> bool {
        cell.column >= self.column
            && u64::from(cell.column) <= self.last_column()
            && cell.row >= self.row
            && u64::from(cell.row) <= self.last_row()
    }

    /// Standard AABB overlap test on half-open cell intervals.
    pub fn intersects(&self, other: &GridRect) -> bool {
        let columns_overlap = u64::from(self.column) <= other.last_column()
            && u64::from(other.column) <= self.last_column();
        let rows_overlap =
            u64::from(self.row) <= other.last_row() && u64::from(other.row) <= self.last_row();
        columns_overlap && rows_overlap
    }

    /// Clamp an origin so this rectangle's spans stay inside the grid.
    ///
    /// Spans are assumed to already fit (`span <= tracks`).
    pub fn clamp_origin(&self, column: u32, row: u32, config: &GridConfig) -> Self {
        let max_column = config.columns.saturating_sub(self.column_span) + 1;
        let max_row = config.rows.saturating_sub(self.row_span) + 1;
        self.with_origin(column.clamp(1, max_column), row.clamp(1, max_row))
    }

    /// Keep the origin, cut spans to the room left in the grid.
    ///
    /// ```text
    /// column     = min(column, columns)
    /// columnSpan = min(columnSpan, columns - column + 1)
    /// ```
    pub fn clamp_in_place(&self, config: &GridConfig) -> Self {
        let column = self.column.clamp(1, config.columns);
        let row = self.row.clamp(1, config.rows);
        let column_span = self.column_span.clamp(1, config.columns - column + 1);
        let row_span = self.row_span.clamp(1, config.rows - row + 1);
        Self::new(column, row, column_span, row_span)
    }

    /// Keep the size where possible and slide the origin back inside the grid.
    ///
    /// ```text
    /// columnSpan = min(columnSpan, columns)
    /// column     = max(1, columns - columnSpan + 1)   when the element overflows
    /// ```
    pub fn shift_inside(&self, config: &GridConfig) -> Self {
        let column_span = self.column_span.clamp(1, config.columns);
        let row_span = self.row_span.clamp(1, config.rows);
        let mut shifted = Self::new(self.column.max(1), self.row.max(1), column_span, row_span);
        if shifted.last_column() > u64::from(config.columns) {
            shifted.column = config.columns - column_span + 1;
        }
        if shifted.last_row() > u64::from(config.rows) {
            shifted.row = config.rows - row_span + 1;
        }
        shifted
    }
}

/// A point in pixels relative to the grid's top-left corner.
///
/// Points may lie outside the grid; gestures keep tracking the pointer
/// wherever it goes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &PixelPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned rectangle in pixels (or any linear unit).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// Offset and size of a span of tracks laid out with gaps, CSS-grid style.
///
/// ```text
/// track  = (extent - (count - 1) * gap) / count
/// offset = (start - 1) * (track + gap)
/// size   = span * track + (span - 1) * gap
/// ```
pub fn track_span(extent: f64, count: u32, gap: f64, start: u32, span: u32) -> (f64, f64) {
    if count == 0 {
        return (0.0, 0.0);
    }
    let count_f = f64::from(count);
    let track = ((extent - (count_f - 1.0) * gap) / count_f).max(0.0);
    let offset = f64::from(start.saturating_sub(1)) * (track + gap);
    let size = f64::from(span) * track + f64::from(span.saturating_sub(1)) * gap;
    (offset, size)
}

/// Maps between the rendered grid surface and grid cells.
///
/// ```text
/// cellWidth  = W / columns
/// cellHeight = H / rows
/// col = clamp(floor(x / cellWidth) + 1, 1, columns)
/// row = clamp(floor(y / cellHeight) + 1, 1, rows)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryMapper {
    columns: u32,
    rows: u32,
    width: f64,
    height: f64,
    gap_px: f64,
}

impl GeometryMapper {
    /// Creates a mapper for a grid rendered at `width x height` pixels.
    pub fn new(config: &GridConfig, width: f64, height: f64, gap_px: f64) -> Self {
        Self {
            columns: config.columns.max(1),
            rows: config.rows.max(1),
            width,
            height,
            gap_px: if gap_px.is_finite() { gap_px.max(0.0) } else { 0.0 },
        }
    }

    pub fn cell_width(&self) -> f64 {
        self.width / f64::from(self.columns)
    }

    pub fn cell_height(&self) -> f64 {
        self.height / f64::from(self.rows)
    }

    pub fn surface_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Cell under a pixel point, clamped into the grid.
    pub fn cell_at(&self, point: PixelPoint) -> CellCoord {
        CellCoord::new(
            axis_cell(point.x, self.cell_width(), self.columns),
            axis_cell(point.y, self.cell_height(), self.rows),
        )
    }

    /// Exact inverse of [`cell_at`](Self::cell_at): the pixel box of the
    /// tracks a rectangle covers, ignoring gaps.
    pub fn rect_to_pixels(&self, rect: &GridRect) -> PixelRect {
        let cw = self.cell_width();
        let ch = self.cell_height();
        PixelRect::new(
            f64::from(rect.column - 1) * cw,
            f64::from(rect.row - 1) * ch,
            f64::from(rect.column_span) * cw,
            f64::from(rect.row_span) * ch,
        )
    }

    /// Where a rectangle is drawn once gaps are taken into account.
    pub fn rendered_rect(&self, rect: &GridRect) -> PixelRect {
        let (x, width) = track_span(
            self.width,
            self.columns,
            self.gap_px,
            rect.column,
            rect.column_span,
        );
        let (y, height) = track_span(self.height, self.rows, self.gap_px, rect.row, rect.row_span);
        PixelRect::new(x, y, width, height)
    }

    /// Span change for a resize drag of `(dx, dy)` pixels.
    ///
    /// ```text
    /// colDelta = round(dx / cellWidth)
    /// rowDelta = round(dy / cellHeight)
    /// ```
    /// Rounds to nearest, ties away from zero.
    pub fn span_delta(&self, dx: f64, dy: f64) -> (i64, i64) {
        (
            axis_delta(dx, self.cell_width()),
            axis_delta(dy, self.cell_height()),
        )
    }
}

fn axis_cell(position: f64, cell_size: f64, count: u32) -> u32 {
    if !(cell_size > 0.0) || !position.is_finite() {
        return 1;
    }
    let index = (position / cell_size).floor() + 1.0;
    index.clamp(1.0, f64::from(count)) as u32
}

fn axis_delta(delta: f64, cell_size: f64) -> i64 {
    if !(cell_size > 0.0) || !delta.is_finite() {
        return 0;
    }
    (delta / cell_size).round() as i64
}

/// Orientation of an editorial guide line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideAxis {
    Vertical,
    Horizontal,
}

/// A non-interactive guide line marking a track boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLine {
    pub axis: GuideAxis,
    pub index: u32,
    /// Position as a fraction of the grid extent (0.0 ..= 1.0).
    pub fraction: f64,
    /// Pixel correction applied after the fraction; `-gap/2` on interior lines.
    pub offset_px: f64,
}

impl GuideLine {
    /// Absolute pixel position along the guide's axis.
    pub fn position(&self, extent: f64) -> f64 {
        self.fraction * extent + self.offset_px
    }
}

/// Guide lines for every column and row boundary, edges included.
pub fn guide_lines(config: &GridConfig, gap_px: f64) -> Vec<GuideLine> {
    let mut lines = Vec::with_capacity((config.columns + config.rows + 2) as usize);
    let mut push_axis = |axis: GuideAxis, count: u32| {
        for index in 0..=count {
            let interior = index != 0 && index != count;
            lines.push(GuideLine {
                axis,
                index,
                fraction: f64::from(index) / f64::from(count.max(1)),
                offset_px: if interior { -gap_px / 2.0 } else { 0.0 },
            });
        }
    };
    push_axis(GuideAxis::Vertical, config.columns);
    push_axis(GuideAxis::Horizontal, config.rows);
    lines
}
