//! # GridKit Designer
//!
//! Grid layout engine for editorial pages. Rectangular blocks are placed,
//! moved and resized on a column/row grid; no two blocks ever share a cell
//! and every block stays inside the grid.
//!
//! ## Core Components
//!
//! - **Geometry**: pixel/cell mapping, gap-aware track sizes, guide lines
//! - **Occupancy**: overlap queries over the placed elements
//! - **Grid model**: the single mutation path, with the repair pass that
//!   follows a grid dimension change
//! - **Interaction**: press/move/release state machine for placing, dragging,
//!   resizing and rubber-band selection
//! - **Code generation**: HTML, CSS and paginated PDF projections
//! - **Persistence**: JSON templates and built-in presets
//!
//! ## Architecture
//!
//! ```text
//! EditorState (one design session)
//!   ├── InteractionController (gesture in flight)
//!   ├── SelectionManager
//!   └── GridModel
//!         ├── GridConfig (columns, rows, gap)
//!         └── Element[] (id, rect, content)
//!
//! codegen (pure projections of a GridModel)
//!   ├── markup / stylesheet
//!   └── document layout -> PDF
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use gridkit_designer::{generate_css, GridConfig, GridModel, GridRect};
//!
//! let mut model = GridModel::new(GridConfig::new(5, 12, 4.0).unwrap());
//! model.add_element_spanning(GridRect::new(1, 1, 5, 2)).unwrap();
//! assert!(model.add_element_at(3, 2).is_err());
//!
//! let css = generate_css(&model, true);
//! assert!(css.contains("grid-column: 1 / span 5;"));
//! ```

pub mod assets;
pub mod codegen;
pub mod editor_state;
pub mod geometry;
pub mod grid_model;
pub mod interaction;
pub mod model;
pub mod occupancy;
pub mod selection_manager;
pub mod serialization;
pub mod templates;

pub use assets::AssetPolicy;
pub use codegen::{
    export_filename, generate_css, generate_html, layout_document, render_pdf, render_pdf_async,
    DocumentLayout, PageSetup,
};
pub use editor_state::{EditorMode, EditorState};
pub use geometry::{
    guide_lines, CellCoord, GeometryMapper, GridConfig, GridRect, GuideAxis, GuideLine,
    PixelPoint, PixelRect,
};
pub use grid_model::{GridModel, RepairReport};
pub use interaction::{
    Gesture, GestureOutcome, GhostPreview, InteractionController, PointerEvent, PressTarget,
    PreviewKind,
};
pub use model::{
    ContentUpdate, EditorialModule, Element, ElementContent, ImageAsset, ImageFormat, ModuleKind,
};
pub use occupancy::OccupancyIndex;
pub use selection_manager::SelectionManager;
pub use serialization::{load_template, save_template, ElementRecord, LoadedTemplate, TemplateData};
pub use templates::{build_preset, presets, PresetInfo};
