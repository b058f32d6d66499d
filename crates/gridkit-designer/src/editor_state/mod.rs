//! Editor session state for UI integration.
//!
//! Owns one `GridModel` together with everything a front end needs around
//! it: the gesture controller, the selection, the edit/preview mode and the
//! configured limits. Split into submodules:
//! - `grid`: column/row steppers, gap and page mode
//! - `content`: deletion, content edits, image attachment
//! - `export`: markup, stylesheet and document output
//! - `file_io`: template save/load, presets

mod content;
mod export;
mod file_io;
mod grid;

use crate::assets::AssetPolicy;
use crate::geometry::{GeometryMapper, GridConfig, GuideLine};
use crate::grid_model::GridModel;
use crate::interaction::{GestureOutcome, GhostPreview, InteractionController, PointerEvent};
use crate::selection_manager::SelectionManager;
use gridkit_core::units::gap_to_px;
use gridkit_core::GapUnit;
use gridkit_settings::{EditorConfig, ExportSettings, GridSettings, LimitSettings};
use std::path::PathBuf;

const DEFAULT_SURFACE_WIDTH: f64 = 800.0;
const DEFAULT_SURFACE_HEIGHT: f64 = 1000.0;

/// Whether pointer input edits the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Edit,
    /// Read-only; pointer input is ignored.
    Preview,
}

/// Editor state for one design session
#[derive(Debug, Clone)]
pub struct EditorState {
    pub model: GridModel,
    pub controller: InteractionController,
    pub selection: SelectionManager,
    pub mode: EditorMode,
    /// Physical-page ("newspaper") mode: gap in mm and content rendered.
    pub physical_page: bool,
    /// Rendered grid surface, in pixels.
    pub surface_width: f64,
    pub surface_height: f64,
    pub show_guides: bool,
    pub asset_policy: AssetPolicy,
    pub grid_defaults: GridSettings,
    pub limits: LimitSettings,
    pub export_settings: ExportSettings,
    pub current_file_path: Option<PathBuf>,
    pub is_modified: bool,
    pub design_name: String,
}

impl EditorState {
    /// Creates an editor with default configuration.
    pub fn new() -> Self {
        Self::from_config(&EditorConfig::default())
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        let physical_page = config.grid.physical_page;
        let grid = GridConfig::new(
            config.grid.columns,
            config.grid.rows,
            config.grid.gap_for(physical_page),
        )
        .unwrap_or_else(|e| {
            tracing::warn!("Configured grid is invalid ({}), using defaults", e);
            GridConfig::default()
        });
        Self {
            model: GridModel::new(grid),
            controller: InteractionController::new(config.interaction.click_tolerance_px),
            selection: SelectionManager::new(),
            mode: EditorMode::Edit,
            physical_page,
            surface_width: DEFAULT_SURFACE_WIDTH,
            surface_height: DEFAULT_SURFACE_HEIGHT,
            show_guides: true,
            asset_policy: AssetPolicy::from_settings(&config.assets),
            grid_defaults: config.grid.clone(),
            limits: config.limits.clone(),
            export_settings: config.export.clone(),
            current_file_path: None,
            is_modified: false,
            design_name: "Untitled".to_string(),
        }
    }

    pub fn gap_unit(&self) -> GapUnit {
        GapUnit::for_mode(self.physical_page)
    }

    /// Gap as drawn on screen; millimetres are shown at 96 dpi.
    pub fn gap_px(&self) -> f64 {
        gap_to_px(self.model.config().gap, self.gap_unit())
    }

    pub fn set_surface_size(&mut self, width: f64, height: f64) {
        self.surface_width = width.max(0.0);
        self.surface_height = height.max(0.0);
    }

    pub fn mapper(&self) -> GeometryMapper {
        GeometryMapper::new(
            self.model.config(),
            self.surface_width,
            self.surface_height,
            self.gap_px(),
        )
    }

    /// Switches between edit and preview. Entering preview drops any live
    /// gesture.
    pub fn set_mode(&mut self, mode: EditorMode) {
        if mode == EditorMode::Preview {
            self.controller.cancel();
        }
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) {
        let next = match self.mode {
            EditorMode::Edit => EditorMode::Preview,
            EditorMode::Preview => EditorMode::Edit,
        };
        self.set_mode(next);
    }

    /// Feeds one pointer event through the gesture controller.
    ///
    /// Ignored in preview mode.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> GestureOutcome {
        if self.mode == EditorMode::Preview {
            return GestureOutcome::None;
        }
        let mapper = self.mapper();
        let outcome = self.controller.handle(&mut self.model, &mapper, event);
        match &outcome {
            GestureOutcome::Selected { id } => self.selection.set_selected_id(Some(*id)),
            GestureOutcome::Placed { .. }
            | GestureOutcome::Moved { .. }
            | GestureOutcome::Resized { .. } => self.is_modified = true,
            GestureOutcome::Rejected(err) => tracing::debug!("Gesture rejected: {}", err),
            GestureOutcome::None => {}
        }
        outcome
    }

    /// Ghost rectangle for the gesture in flight.
    pub fn preview(&self) -> Option<GhostPreview> {
        if self.mode == EditorMode::Preview {
            return None;
        }
        self.controller.preview(&self.model, &self.mapper())
    }

    /// Guide lines for the current grid, empty when guides are hidden.
    pub fn guide_lines(&self) -> Vec<GuideLine> {
        if !self.show_guides {
            return Vec::new();
        }
        crate::geometry::guide_lines(self.model.config(), self.gap_px())
    }

    pub fn mark_modified(&mut self) {
        self.is_modified = true;
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}
