//! The authoritative grid and element collection.
//!
//! `GridModel` is the only mutation path for element geometry. Every
//! operation validates first and mutates second, so a rejected call leaves the
//! model exactly as it was.

use crate::geometry::{CellCoord, GridConfig, GridRect};
use crate::model::{ContentUpdate, Element, ElementContent};
use crate::occupancy::OccupancyIndex;
use gridkit_core::LayoutError;

/// Outcome of the repair pass that follows a grid dimension change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// Elements removed because their origin fell outside the grid.
    pub dropped: Vec<u64>,
    /// Elements whose position or span changed.
    pub adjusted: Vec<u64>,
}

impl RepairReport {
    pub fn is_noop(&self) -> bool {
        self.dropped.is_empty() && self.adjusted.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridModel {
    config: GridConfig,
    elements: Vec<Element>,
    next_id: u64,
}

impl Default for GridModel {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl GridModel {
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            elements: Vec::new(),
            next_id: 1,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Elements in insertion order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Id the next created element will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn element(&self, id: u64) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.element(id).is_some()
    }

    pub fn occupancy(&self) -> OccupancyIndex<'_> {
        OccupancyIndex::new(&self.elements)
    }

    pub fn element_at(&self, cell: CellCoord) -> Option<&Element> {
        self.occupancy().occupant_at(cell)
    }

    pub fn is_occupied(&self, rect: &GridRect, exclude: Option<u64>) -> bool {
        self.occupancy().is_occupied(rect, exclude)
    }

    /// Checks the no-overlap and in-bounds invariants.
    pub fn is_consistent(&self) -> bool {
        self.elements.iter().all(|e| self.config.contains(&e.rect()))
            && self.occupancy().is_disjoint()
    }

    /// Creates a 1x1 element at `(column, row)`.
    pub fn add_element_at(&mut self, column: u32, row: u32) -> Result<&Element, LayoutError> {
        self.add_element_spanning(GridRect::new(column, row, 1, 1))
    }

    /// Creates one element covering `rect`.
    pub fn add_element_spanning(&mut self, rect: GridRect) -> Result<&Element, LayoutError> {
        self.check_free(&rect, None)?;
        let id = self.next_id;
        self.next_id += 1;
        self.elements
            .push(Element::new(id, rect, ElementContent::default()));
        tracing::debug!("Placed element {} at {:?}", id, rect);
        let index = self.elements.len() - 1;
        Ok(&self.elements[index])
    }

    /// Rectangle a move of `id` to `(column, row)` would produce, clamped to
    /// the grid but not checked for occupancy.
    pub fn clamp_move_target(
        &self,
        id: u64,
        column: u32,
        row: u32,
    ) -> Result<GridRect, LayoutError> {
        let element = self.require(id)?;
        Ok(element.rect().clamp_origin(column, row, &self.config))
    }

    /// Moves `id` so its origin is `(column, row)`, clamped to keep its span
    /// in bounds. Rejected if the target overlaps another element.
    pub fn move_element(&mut self, id: u64, column: u32, row: u32) -> Result<GridRect, LayoutError> {
        let target = self.clamp_move_target(id, column, row)?;
        if let Err(err) = self.check_free(&target, Some(id)) {
            tracing::debug!("Move of element {} rejected: {}", id, err);
            return Err(err);
        }
        self.set_rect(id, target)?;
        Ok(target)
    }

    /// Largest span not exceeding the request that keeps `id` in bounds and
    /// off other elements.
    ///
    /// Spans are first clamped to `[1, columns - column + 1]` and
    /// `[1, rows - row + 1]`. Among the smaller spans, free rectangles are
    /// closed under shrinking, so for each column span only the tallest free
    /// row span matters. The candidate with the largest area wins, wider first
    /// on ties.
    pub fn resolve_resize(
        &self,
        id: u64,
        column_span: u32,
        row_span: u32,
    ) -> Result<GridRect, LayoutError> {
        let rect = self.require(id)?.rect();
        let max_columns = self.config.columns - rect.column + 1;
        let max_rows = self.config.rows - rect.row + 1;
        let want_columns = column_span.clamp(1, max_columns);
        let want_rows = row_span.clamp(1, max_rows);

        let occupancy = self.occupancy();
        let mut best: Option<GridRect> = None;
        for cs in (1..=want_columns).rev() {
            let tallest = (1..=want_rows)
                .rev()
                .map(|rs| rect.with_spans(cs, rs))
                .find(|candidate| !occupancy.is_occupied(candidate, Some(id)));
            if let Some(candidate) = tallest {
                if best.is_none_or(|b| candidate.area() > b.area()) {
                    best = Some(candidate);
                }
            }
        }
        best.ok_or(LayoutError::Unresolvable { id })
    }

    /// Resizes `id`, clamping to the largest legal span.
    pub fn resize_element(
        &mut self,
        id: u64,
        column_span: u32,
        row_span: u32,
    ) -> Result<GridRect, LayoutError> {
        let target = match self.resolve_resize(id, column_span, row_span) {
            Ok(target) => target,
            Err(err) => {
                tracing::debug!("Resize of element {} rejected: {}", id, err);
                return Err(err);
            }
        };
        if target.column_span != column_span || target.row_span != row_span {
            tracing::debug!(
                "Resize of element {} clamped from {}x{} to {}x{}",
                id,
                column_span,
                row_span,
                target.column_span,
                target.row_span
            );
        }
        self.set_rect(id, target)?;
        Ok(target)
    }

    pub fn delete_element(&mut self, id: u64) -> Result<Element, LayoutError> {
        let index = self
            .elements
            .iter()
            .position(|e| e.id() == id)
            .ok_or(LayoutError::UnknownElement { id })?;
        tracing::debug!("Deleted element {}", id);
        Ok(self.elements.remove(index))
    }

    /// Removes every element. The id counter keeps counting.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Merges a content update into `id`. Returns false if the element does
    /// not exist; geometry is never touched.
    pub fn update_content(&mut self, id: u64, update: &ContentUpdate) -> bool {
        match self.elements.iter_mut().find(|e| e.id() == id) {
            Some(element) => {
                let merged = element.content().merged(update);
                element.set_content(merged);
                true
            }
            None => {
                tracing::debug!("Content update for missing element {} ignored", id);
                false
            }
        }
    }

    /// Changes grid dimensions and repairs every element.
    pub fn set_grid_config(
        &mut self,
        columns: u32,
        rows: u32,
        gap: f64,
    ) -> Result<RepairReport, LayoutError> {
        let config = GridConfig::new(columns, rows, gap)?;
        self.config = config;
        Ok(self.repair())
    }

    /// Brings every element back inside the grid.
    ///
    /// 1. Elements whose origin lies outside the grid are dropped.
    /// 2. The rest are clamped in place (origin kept, spans cut to the room left).
    /// 3. In insertion order, a clamped element is slid back inside at its
    ///    original size instead, when that spot is free.
    ///
    /// Clamped rectangles are subsets of the originals, so step 2 cannot create
    /// overlap and step 3 only accepts free spots. A consistent model is left
    /// untouched.
    pub fn repair(&mut self) -> RepairReport {
        let config = self.config;
        let mut report = RepairReport::default();

        self.elements.retain(|e| {
            let keep = e.column() <= config.columns && e.row() <= config.rows;
            if !keep {
                tracing::warn!(
                    "Element {} at column {}, row {} no longer fits a {}x{} grid, removing",
                    e.id(),
                    e.column(),
                    e.row(),
                    config.columns,
                    config.rows
                );
                report.dropped.push(e.id());
            }
            keep
        });

        let originals: Vec<GridRect> = self.elements.iter().map(|e| e.rect()).collect();
        for element in &mut self.elements {
            let clamped = element.rect().clamp_in_place(&config);
            element.set_rect(clamped);
        }

        for (index, original) in originals.iter().enumerate() {
            let current = self.elements[index].rect();
            if current == *original {
                continue;
            }
            let id = self.elements[index].id();
            let shifted = original.shift_inside(&config);
            if shifted != current
                && config.contains(&shifted)
                && !self.occupancy().is_occupied(&shifted, Some(id))
            {
                self.elements[index].set_rect(shifted);
            }
            report.adjusted.push(id);
            tracing::debug!(
                "Element {} repaired from {:?} to {:?}",
                id,
                original,
                self.elements[index].rect()
            );
        }

        report
    }

    /// Installs a pre-validated layout, e.g. from a template.
    pub(crate) fn replace(&mut self, config: GridConfig, elements: Vec<Element>, next_id: u64) {
        self.config = config;
        self.elements = elements;
        self.next_id = next_id;
    }

    fn require(&self, id: u64) -> Result<&Element, LayoutError> {
        self.element(id).ok_or(LayoutError::UnknownElement { id })
    }

    fn check_free(&self, rect: &GridRect, exclude: Option<u64>) -> Result<(), LayoutError> {
        if !self.config.contains(rect) {
            return Err(self.config.out_of_bounds(rect));
        }
        if self.is_occupied(rect, exclude) {
            return Err(LayoutError::Occupied {
                column: rect.column,
                row: rect.row,
                column_span: rect.column_span,
                row_span: rect.row_span,
            });
        }
        Ok(())
    }

    fn set_rect(&mut self, id: u64, rect: GridRect) -> Result<(), LayoutError> {
        let element = self
            .elements
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or(LayoutError::UnknownElement { id })?;
        element.set_rect(rect);
        Ok(())
    }
}
