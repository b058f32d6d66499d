//! Pointer gesture state machine.
//!
//! The controller turns abstract press/move/release events into `GridModel`
//! operations. It holds only the state of the gesture in flight; nothing here
//! outlives a release. Every commit goes through the model, which validates
//! it, so intermediate previews may be invalid but committed geometry never is.

use crate::geometry::{CellCoord, GeometryMapper, GridRect, PixelPoint, PixelRect};
use crate::grid_model::GridModel;
use gridkit_core::constants::CLICK_TOLERANCE_PX;
use gridkit_core::LayoutError;

/// What the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PressTarget {
    /// The grid surface: an element body or an empty cell, found by hit test.
    #[default]
    Surface,
    /// The resize handle of an element.
    ResizeHandle(u64),
}

/// Pointer input in grid-relative pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down {
        position: PixelPoint,
        target: PressTarget,
    },
    Move {
        position: PixelPoint,
    },
    Up {
        position: PixelPoint,
    },
}

/// Gesture in flight.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Pressed on an empty cell, not yet dragged past the click tolerance.
    Placing { origin: PixelPoint, cell: CellCoord },
    /// Moving an element. `grab` is the cell under the pointer at press time,
    /// so the element keeps its offset from the pointer.
    Dragging {
        id: u64,
        anchor: GridRect,
        grab: CellCoord,
        candidate: GridRect,
    },
    /// Resizing from the handle. Spans derive from the total pointer travel
    /// since `origin`, never from incremental deltas.
    Resizing {
        id: u64,
        anchor: GridRect,
        origin: PixelPoint,
        column_span: u32,
        row_span: u32,
    },
    /// Rubber-band selection over empty cells.
    RangeSelecting { start: CellCoord, end: CellCoord },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }
}

/// Result of feeding one event to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    /// Nothing changed in the model.
    None,
    /// An element was pressed and should become the selection.
    Selected { id: u64 },
    Placed { id: u64 },
    Moved { id: u64, rect: GridRect },
    Resized { id: u64, rect: GridRect },
    /// The commit was refused; the model is unchanged.
    Rejected(LayoutError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    Place,
    Move,
    Resize,
}

/// Ghost rectangle shown while a gesture is live.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostPreview {
    pub kind: PreviewKind,
    pub rect: GridRect,
    pub pixels: PixelRect,
    /// True when the rectangle overlaps another element.
    pub occupied: bool,
    pub element_id: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct InteractionController {
    gesture: Gesture,
    click_tolerance: f64,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(CLICK_TOLERANCE_PX)
    }
}

impl InteractionController {
    pub fn new(click_tolerance: f64) -> Self {
        Self {
            gesture: Gesture::Idle,
            click_tolerance: click_tolerance.max(0.0),
        }
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn click_tolerance(&self) -> f64 {
        self.click_tolerance
    }

    /// Abandons the gesture in flight without touching the model.
    pub fn cancel(&mut self) {
        if !self.gesture.is_idle() {
            tracing::debug!("Gesture cancelled: {:?}", self.gesture);
        }
        self.gesture = Gesture::Idle;
    }

    /// Feeds one pointer event.
    pub fn handle(
        &mut self,
        model: &mut GridModel,
        mapper: &GeometryMapper,
        event: PointerEvent,
    ) -> GestureOutcome {
        match event {
            PointerEvent::Down { position, target } => self.press(model, mapper, position, target),
            PointerEvent::Move { position } => {
                self.track(model, mapper, position);
                GestureOutcome::None
            }
            PointerEvent::Up { position } => {
                self.track(model, mapper, position);
                self.release(model)
            }
        }
    }

    fn press(
        &mut self,
        model: &GridModel,
        mapper: &GeometryMapper,
        position: PixelPoint,
        target: PressTarget,
    ) -> GestureOutcome {
        if !self.gesture.is_idle() {
            tracing::debug!("Press during {:?}, restarting gesture", self.gesture);
            self.gesture = Gesture::Idle;
        }

        match target {
            PressTarget::ResizeHandle(id) => match model.element(id) {
                Some(element) => {
                    let anchor = element.rect();
                    self.gesture = Gesture::Resizing {
                        id,
                        anchor,
                        origin: position,
                        column_span: anchor.column_span,
                        row_span: anchor.row_span,
                    };
                    GestureOutcome::Selected { id }
                }
                None => GestureOutcome::None,
            },
            PressTarget::Surface => {
                let cell = mapper.cell_at(position);
                match model.element_at(cell) {
                    Some(element) => {
                        let anchor = element.rect();
                        let id = element.id();
                        self.gesture = Gesture::Dragging {
                            id,
                            anchor,
                            grab: cell,
                            candidate: anchor,
                        };
                        GestureOutcome::Selected { id }
                    }
                    None => {
                        self.gesture = Gesture::Placing {
                            origin: position,
                            cell,
                        };
                        GestureOutcome::None
                    }
                }
            }
        }
    }

    fn track(&mut self, model: &GridModel, mapper: &GeometryMapper, position: PixelPoint) {
        self.gesture = match self.gesture {
            Gesture::Idle => Gesture::Idle,
            Gesture::Placing { origin, cell } => {
                if origin.distance_to(&position) > self.click_tolerance {
                    Gesture::RangeSelecting {
                        start: cell,
                        end: mapper.cell_at(position),
                    }
                } else {
                    Gesture::Placing { origin, cell }
                }
            }
            Gesture::RangeSelecting { start, .. } => Gesture::RangeSelecting {
                start,
                end: mapper.cell_at(position),
            },
            Gesture::Dragging {
                id, anchor, grab, ..
            } => {
                let cell = mapper.cell_at(position);
                let column = offset(anchor.column, i64::from(cell.column) - i64::from(grab.column));
                let row = offset(anchor.row, i64::from(cell.row) - i64::from(grab.row));
                match model.clamp_move_target(id, column, row) {
                    Ok(candidate) => Gesture::Dragging {
                        id,
                        anchor,
                        grab,
                        candidate,
                    },
                    Err(err) => {
                        tracing::debug!("Drag abandoned: {}", err);
                        Gesture::Idle
                    }
                }
            }
            Gesture::Resizing {
                id, anchor, origin, ..
            } => {
                let (dc, dr) = mapper.span_delta(position.x - origin.x, position.y - origin.y);
                Gesture::Resizing {
                    id,
                    anchor,
                    origin,
                    column_span: offset(anchor.column_span, dc),
                    row_span: offset(anchor.row_span, dr),
                }
            }
        };
    }

    fn release(&mut self, model: &mut GridModel) -> GestureOutcome {
        let gesture = std::mem::take(&mut self.gesture);
        let result = match gesture {
            Gesture::Idle => return GestureOutcome::None,
            Gesture::Placing { cell, .. } => model
                .add_element_at(cell.column, cell.row)
                .map(|e| GestureOutcome::Placed { id: e.id() }),
            Gesture::RangeSelecting { start, end } => model
                .add_element_spanning(GridRect::from_corners(start, end))
                .map(|e| GestureOutcome::Placed { id: e.id() }),
            Gesture::Dragging {
                id,
                anchor,
                candidate,
                ..
            } => {
                if candidate == anchor {
                    return GestureOutcome::None;
                }
                model
                    .move_element(id, candidate.column, candidate.row)
                    .map(|rect| GestureOutcome::Moved { id, rect })
            }
            Gesture::Resizing {
                id,
                anchor,
                column_span,
                row_span,
                ..
            } => {
                if column_span == anchor.column_span && row_span == anchor.row_span {
                    return GestureOutcome::None;
                }
                model
                    .resize_element(id, column_span, row_span)
                    .map(|rect| GestureOutcome::Resized { id, rect })
            }
        };
        result.unwrap_or_else(GestureOutcome::Rejected)
    }

    /// Ghost for the gesture in flight, if it has one.
    pub fn preview(&self, model: &GridModel, mapper: &GeometryMapper) -> Option<GhostPreview> {
        let (kind, rect, element_id) = match self.gesture {
            Gesture::Idle | Gesture::Placing { .. } => return None,
            Gesture::RangeSelecting { start, end } => {
                (PreviewKind::Place, GridRect::from_corners(start, end), None)
            }
            Gesture::Dragging { id, candidate, .. } => (PreviewKind::Move, candidate, Some(id)),
            Gesture::Resizing {
                id,
                anchor,
                column_span,
                row_span,
                ..
            } => {
                let config = model.config();
                let rect = anchor.with_spans(
                    column_span.min(config.columns - anchor.column + 1),
                    row_span.min(config.rows - anchor.row + 1),
                );
                (PreviewKind::Resize, rect, Some(id))
            }
        };
        Some(GhostPreview {
            kind,
            rect,
            pixels: mapper.rendered_rect(&rect),
            occupied: model.is_occupied(&rect, element_id),
            element_id,
        })
    }
}

fn offset(base: u32, delta: i64) -> u32 {
    (i64::from(base) + delta).clamp(1, i64::from(u32::MAX)) as u32
}
