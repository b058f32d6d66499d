//! Element data model.

mod content;
mod image;

pub use content::{ContentUpdate, EditorialModule, ElementContent, ModuleKind};
pub use image::{ImageAsset, ImageFormat};

use crate::geometry::GridRect;

/// A placed block on the grid.
///
/// Fields are private: geometry only changes through [`crate::GridModel`],
/// which checks bounds and occupancy first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    id: u64,
    rect: GridRect,
    content: ElementContent,
}

impl Element {
    pub(crate) fn new(id: u64, rect: GridRect, content: ElementContent) -> Self {
        Self { id, rect, content }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn rect(&self) -> GridRect {
        self.rect
    }

    pub fn column(&self) -> u32 {
        self.rect.column
    }

    pub fn row(&self) -> u32 {
        self.rect.row
    }

    pub fn column_span(&self) -> u32 {
        self.rect.column_span
    }

    pub fn row_span(&self) -> u32 {
        self.rect.row_span
    }

    pub fn content(&self) -> &ElementContent {
        &self.content
    }

    pub(crate) fn set_rect(&mut self, rect: GridRect) {
        self.rect = rect;
    }

    pub(crate) fn set_content(&mut self, content: ElementContent) {
        self.content = content;
    }
}
