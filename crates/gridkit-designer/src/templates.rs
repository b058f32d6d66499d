//! # Built-in Layout Presets
//!
//! Starter layouts offered when creating a new grid. Each preset is built
//! through the normal `GridModel` operations, so it obeys the same bounds and
//! occupancy rules as a hand-made layout.

use crate::geometry::{GridConfig, GridRect};
use crate::grid_model::GridModel;
use crate::model::{ContentUpdate, ModuleKind};
use gridkit_core::TemplateError;

/// Preset metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetInfo {
    /// Stable identifier, used on the command line and in menus
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

struct Block {
    rect: (u32, u32, u32, u32),
    kind: ModuleKind,
    text: &'static str,
}

struct Preset {
    info: PresetInfo,
    columns: u32,
    rows: u32,
    gap_mm: f64,
    blocks: &'static [Block],
}

const fn block(rect: (u32, u32, u32, u32), kind: ModuleKind, text: &'static str) -> Block {
    Block { rect, kind, text }
}

static PRESETS: [Preset; 3] = [
    Preset {
        info: PresetInfo {
            id: "front-page",
            name: "Front page",
            description: "Banner headline, lead photo with caption and two body columns",
        },
        columns: 5,
        rows: 12,
        gap_mm: 4.0,
        blocks: &[
            block((1, 1, 5, 2), ModuleKind::Headline, "Headline"),
            block((1, 3, 5, 1), ModuleKind::Subheadline, "Standfirst"),
            block((1, 4, 3, 5), ModuleKind::Image, ""),
            block((1, 9, 3, 1), ModuleKind::Caption, "Caption"),
            block((4, 4, 2, 6), ModuleKind::Body, "Lead story"),
            block((1, 10, 5, 3), ModuleKind::Body, "Second story"),
        ],
    },
    Preset {
        info: PresetInfo {
            id: "three-column",
            name: "Three columns",
            description: "Full-width headline over three equal text columns",
        },
        columns: 3,
        rows: 12,
        gap_mm: 5.0,
        blocks: &[
            block((1, 1, 3, 2), ModuleKind::Headline, "Headline"),
            block((1, 3, 1, 10), ModuleKind::Body, "Column one"),
            block((2, 3, 1, 10), ModuleKind::Body, "Column two"),
            block((3, 3, 1, 10), ModuleKind::Body, "Column three"),
        ],
    },
    Preset {
        info: PresetInfo {
            id: "photo-feature",
            name: "Photo feature",
            description: "Large photo with caption, headline and a short body",
        },
        columns: 4,
        rows: 8,
        gap_mm: 3.0,
        blocks: &[
            block((1, 1, 4, 5), ModuleKind::Image, ""),
            block((1, 6, 4, 1), ModuleKind::Caption, "Caption"),
            block((1, 7, 2, 2), ModuleKind::Headline, "Headline"),
            block((3, 7, 2, 2), ModuleKind::Body, "Story"),
        ],
    },
];

/// All presets, in menu order.
pub fn presets() -> impl Iterator<Item = &'static PresetInfo> {
    PRESETS.iter().map(|p| &p.info)
}

/// Builds the preset `id` as a physical-page layout.
pub fn build_preset(id: &str) -> Result<GridModel, TemplateError> {
    let preset = PRESETS
        .iter()
        .find(|p| p.info.id.eq_ignore_ascii_case(id.trim()))
        .ok_or_else(|| TemplateError::UnknownTemplate(id.to_string()))?;

    let config = GridConfig::new(preset.columns, preset.rows, preset.gap_mm).map_err(|e| {
        TemplateError::InvalidLayout {
            reason: e.to_string(),
        }
    })?;
    let mut model = GridModel::new(config);
    for block in preset.blocks {
        let (column, row, column_span, row_span) = block.rect;
        let id = model
            .add_element_spanning(GridRect::new(column, row, column_span, row_span))
            .map_err(|e| TemplateError::InvalidLayout {
                reason: format!("preset {}: {}", preset.info.id, e),
            })?
            .id();
        model.update_content(
            id,
            &ContentUpdate {
                text: Some(block.text.to_string()),
                module: Some(block.kind),
                ..Default::default()
            },
        );
    }
    tracing::debug!(
        "Built preset {} with {} element(s)",
        preset.info.id,
        model.len()
    );
    Ok(model)
}
