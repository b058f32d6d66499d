//! Page layout of the grid for document export.
//!
//! Maps the grid onto a physical page with fixed margins and produces one
//! drawable rectangle per element, in millimetres from the page's top-left
//! corner. Text is wrapped and clipped here so every backend draws the same
//! lines.

use crate::geometry::track_span;
use crate::grid_model::GridModel;
use crate::model::{EditorialModule, ElementContent, ImageAsset};
use chrono::NaiveDate;
use gridkit_core::units::{gap_to_mm, pt_to_mm};
use gridkit_core::{ExportError, GapUnit, PageSize, Rgb};
use gridkit_settings::ExportSettings;

/// Inner padding of a text block, mm.
pub const TEXT_PADDING_MM: f64 = 3.0;

/// Border stroke width, mm.
pub const BORDER_WIDTH_MM: f64 = 0.5;

const MIN_FONT_PT: f64 = 6.0;
const MAX_FONT_PT: f64 = 14.0;
const BASE_FONT_PT: f64 = 12.0;
const LINE_HEIGHT_FACTOR: f64 = 0.4;
const BASELINE_FACTOR: f64 = 0.35;
// Average Helvetica advance width, in ems.
const GLYPH_WIDTH_EM: f64 = 0.5;

/// Page size, margin and colours for an export.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSetup {
    pub size: PageSize,
    pub margin_mm: f64,
    pub border_color: Rgb,
    pub text_color: Rgb,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::from_settings(&ExportSettings::default())
    }
}

impl PageSetup {
    pub fn from_settings(settings: &ExportSettings) -> Self {
        Self {
            size: settings.page_size,
            margin_mm: settings.margin_mm,
            border_color: settings.border_color,
            text_color: settings.text_color,
        }
    }

    /// Tabloid for physical-page layouts, A4 for screen layouts.
    pub fn for_mode(physical_page: bool) -> Self {
        Self {
            size: if physical_page {
                PageSize::Tabloid
            } else {
                PageSize::A4
            },
            ..Self::default()
        }
    }

    pub fn with_size(mut self, size: PageSize) -> Self {
        self.size = size;
        self
    }
}

/// Rectangle in millimetres, origin at the top-left of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MmRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Regular,
    Bold,
    Italic,
}

/// Wrapped, clipped text ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub font_size_pt: f64,
    pub line_height_mm: f64,
    pub x: f64,
    /// Baseline of the first line.
    pub baseline_y: f64,
    pub lines: Vec<String>,
    pub style: TextStyle,
    pub color: Rgb,
    /// White panel drawn behind the text when it sits on an image.
    pub backdrop: Option<MmRect>,
}

/// One element, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRect {
    pub element_id: u64,
    pub rect: MmRect,
    pub fill: Rgb,
    pub border: Rgb,
    pub image: Option<ImageAsset>,
    pub text: Option<TextBlock>,
}

/// Complete page description.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub page: PageSize,
    pub width_mm: f64,
    pub height_mm: f64,
    pub rects: Vec<DrawRect>,
}

/// `grid-<page id>-<YYYY-MM-DD>.pdf`
pub fn export_filename(page: &PageSize, date: NaiveDate) -> String {
    format!("grid-{}-{}.pdf", page.id(), date.format("%Y-%m-%d"))
}

/// Lays out every element on the page.
///
/// In screen-only mode the pixel gap is converted to millimetres first.
pub fn layout_document(
    model: &GridModel,
    physical_page: bool,
    setup: &PageSetup,
) -> Result<DocumentLayout, ExportError> {
    if model.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let (width, height) = setup.size.dimensions_mm();
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(ExportError::InvalidPage {
            reason: format!("page must have positive dimensions, got {}x{}mm", width, height),
        });
    }
    let margin = setup.margin_mm;
    let usable_width = width - 2.0 * margin;
    let usable_height = height - 2.0 * margin;
    if !(margin >= 0.0 && usable_width > 0.0 && usable_height > 0.0) {
        return Err(ExportError::InvalidPage {
            reason: format!(
                "a {}mm margin leaves no room on a {}x{}mm page",
                margin, width, height
            ),
        });
    }

    let config = model.config();
    let gap = gap_to_mm(config.gap, GapUnit::for_mode(physical_page));
    let cell_width = (usable_width - f64::from(config.columns - 1) * gap) / f64::from(config.columns);
    let cell_height = (usable_height - f64::from(config.rows - 1) * gap) / f64::from(config.rows);
    if cell_width <= 0.0 || cell_height <= 0.0 {
        return Err(ExportError::InvalidPage {
            reason: format!("a {}mm gap leaves no room for the grid cells", gap),
        });
    }

    let rects = model
        .elements()
        .iter()
        .map(|element| {
            let r = element.rect();
            let (x, w) = track_span(usable_width, config.columns, gap, r.column, r.column_span);
            let (y, h) = track_span(usable_height, config.rows, gap, r.row, r.row_span);
            let rect = MmRect {
                x: margin + x,
                y: margin + y,
                width: w,
                height: h,
            };
            let content = element.content();
            let image = content.image().cloned();
            DrawRect {
                element_id: element.id(),
                rect,
                fill: content.color(),
                border: setup.border_color,
                text: text_block(content, &rect, image.is_some(), setup.text_color),
                image,
            }
        })
        .collect();

    Ok(DocumentLayout {
        page: setup.size,
        width_mm: width,
        height_mm: height,
        rects,
    })
}

fn text_block(content: &ElementContent, rect: &MmRect, on_image: bool, color: Rgb) -> Option<TextBlock> {
    let (text, style) = match content {
        ElementContent::PlainText { text, .. } | ElementContent::Image { text, .. } => {
            (text, TextStyle::Regular)
        }
        ElementContent::Module(module) => match module {
            EditorialModule::Headline { text } | EditorialModule::Subheadline { text } => {
                (text, TextStyle::Bold)
            }
            EditorialModule::Body { text } => (text, TextStyle::Regular),
            EditorialModule::Caption { text } => (text, TextStyle::Italic),
            EditorialModule::Image { .. } => return None,
        },
    };
    if text.trim().is_empty() {
        return None;
    }

    let font_size = (rect.width / 10.0)
        .min(rect.height / 3.0)
        .min(BASE_FONT_PT)
        .clamp(MIN_FONT_PT, MAX_FONT_PT);
    let padding = TEXT_PADDING_MM;
    let x = rect.x + padding;
    let max_width = rect.width - 2.0 * padding;
    let line_height = font_size * LINE_HEIGHT_FACTOR;
    let max_lines = ((rect.height - 2.0 * padding) / line_height).floor();
    if max_width <= 0.0 || max_lines < 1.0 {
        return None;
    }

    let char_width = pt_to_mm(font_size) * GLYPH_WIDTH_EM;
    let max_chars = ((max_width / char_width).floor() as usize).max(1);
    let mut lines = wrap_text(text, max_chars);
    lines.truncate(max_lines as usize);
    if lines.is_empty() {
        return None;
    }

    let backdrop = on_image.then(|| MmRect {
        x: x - 2.0,
        y: rect.y + padding - 2.0,
        width: max_width + 4.0,
        height: lines.len() as f64 * line_height + padding + 2.0,
    });

    Some(TextBlock {
        font_size_pt: font_size,
        line_height_mm: line_height,
        x,
        baseline_y: rect.y + padding + font_size * BASELINE_FACTOR,
        lines,
        style,
        color,
        backdrop,
    })
}

/// Greedy word wrap at `max_chars` characters per line.
///
/// Explicit newlines are kept; words longer than a line are split.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_len = 0usize;
        for word in paragraph.split_whitespace() {
            let mut chars: Vec<char> = word.chars().collect();
            if line_len > 0 && line_len + 1 + chars.len() <= max_chars {
                line.push(' ');
                line.extend(chars.iter());
                line_len += 1 + chars.len();
                continue;
            }
            if line_len > 0 {
                lines.push(std::mem::take(&mut line));
            }
            while chars.len() > max_chars {
                let rest = chars.split_off(max_chars);
                lines.push(chars.iter().collect());
                chars = rest;
            }
            line.extend(chars.iter());
            line_len = chars.len();
        }
        lines.push(line);
    }
    lines
}
