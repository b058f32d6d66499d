//! Occupancy queries over the live element list.
//!
//! Every query is a linear scan. Element counts stay in the tens, so there is
//! no index to keep in sync with the model.

use crate::geometry::{CellCoord, GridRect};
use crate::model::Element;

/// Read-only occupancy view over a slice of elements.
#[derive(Debug, Clone, Copy)]
pub struct OccupancyIndex<'a> {
    elements: &'a [Element],
}

impl<'a> OccupancyIndex<'a> {
    pub fn new(elements: &'a [Element]) -> Self {
        Self { elements }
    }

    /// True if any element other than `exclude` intersects `rect`.
    ///
    /// # Arguments
    ///
    /// * `rect` - The candidate cell-rectangle
    /// * `exclude` - An element to ignore, usually the one being moved or resized
    pub fn is_occupied(&self, rect: &GridRect, exclude: Option<u64>) -> bool {
        self.conflicts(*rect, exclude).next().is_some()
    }

    /// Elements other than `exclude` that intersect `rect`.
    pub fn conflicts(
        &self,
        rect: GridRect,
        exclude: Option<u64>,
    ) -> impl Iterator<Item = &'a Element> {
        self.elements
            .iter()
            .filter(move |e| Some(e.id()) != exclude && e.rect().intersects(&rect))
    }

    /// The element covering `cell`, if any.
    pub fn occupant_at(&self, cell: CellCoord) -> Option<&'a Element> {
        self.elements.iter().find(|e| e.rect().contains_cell(cell))
    }

    /// True if no two elements intersect.
    pub fn is_disjoint(&self) -> bool {
        self.elements.iter().enumerate().all(|(i, a)| {
            self.elements[i + 1..]
                .iter()
                .all(|b| !a.rect().intersects(&b.rect()))
        })
    }
}
