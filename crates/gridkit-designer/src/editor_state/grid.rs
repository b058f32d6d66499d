//! Grid dimension controls for editor state.

use super::EditorState;
use crate::grid_model::RepairReport;
use gridkit_core::LayoutError;

impl EditorState {
    /// Applies new dimensions, repairs the elements and drops a selection
    /// that did not survive.
    pub fn resize_grid(
        &mut self,
        columns: u32,
        rows: u32,
        gap: f64,
    ) -> Result<RepairReport, LayoutError> {
        let report = self.model.set_grid_config(columns, rows, gap)?;
        self.selection.sync(&self.model);
        // A gesture anchored to a repaired element would commit stale geometry.
        if !report.is_noop() {
            self.controller.cancel();
        }
        self.is_modified = true;
        Ok(report)
    }

    fn step_tracks(&mut self, columns: i64, rows: i64) -> Result<RepairReport, LayoutError> {
        let config = *self.model.config();
        let target_columns = step_within(config.columns, columns, self.limits.max_columns);
        let target_rows = step_within(config.rows, rows, self.limits.max_rows);
        if target_columns == config.columns && target_rows == config.rows {
            return Ok(RepairReport::default());
        }
        self.resize_grid(target_columns, target_rows, config.gap)
    }

    pub fn increment_columns(&mut self) -> Result<RepairReport, LayoutError> {
        self.step_tracks(1, 0)
    }

    pub fn decrement_columns(&mut self) -> Result<RepairReport, LayoutError> {
        self.step_tracks(-1, 0)
    }

    pub fn increment_rows(&mut self) -> Result<RepairReport, LayoutError> {
        self.step_tracks(0, 1)
    }

    pub fn decrement_rows(&mut self) -> Result<RepairReport, LayoutError> {
        self.step_tracks(0, -1)
    }

    /// Sets the gap in the current mode's unit, clamped to `[0, max]`.
    pub fn set_gap(&mut self, gap: f64) -> Result<RepairReport, LayoutError> {
        if !gap.is_finite() {
            return Err(LayoutError::InvalidGrid {
                reason: format!("gap must be finite, got {}", gap),
            });
        }
        let max = self.limits.max_gap_for(self.physical_page);
        let gap = gap.clamp(0.0, max);
        let config = *self.model.config();
        self.resize_grid(config.columns, config.rows, gap)
    }

    /// Moves the gap one configured step up or down.
    pub fn step_gap(&mut self, up: bool) -> Result<RepairReport, LayoutError> {
        let step = self.limits.gap_step_for(self.physical_page);
        let current = self.model.config().gap;
        let next = if up { current + step } else { current - step };
        // Keeps repeated 0.1mm steps from drifting off the decimal grid.
        let rounded = (next / step).round() * step;
        self.set_gap(rounded)
    }

    /// Switches between physical-page and screen-only mode.
    ///
    /// The gap is reset to the configured default for the new unit.
    pub fn set_physical_page(&mut self, physical_page: bool) -> Result<RepairReport, LayoutError> {
        if physical_page == self.physical_page {
            return Ok(RepairReport::default());
        }
        self.controller.cancel();
        self.physical_page = physical_page;
        let gap = self.grid_defaults.gap_for(physical_page);
        tracing::debug!(
            "Physical page {}, gap now {}{}",
            if physical_page { "on" } else { "off" },
            gap,
            self.gap_unit().css_suffix()
        );
        let config = *self.model.config();
        self.resize_grid(config.columns, config.rows, gap)
    }
}

fn step_within(current: u32, delta: i64, max: u32) -> u32 {
    let next = i64::from(current) + delta;
    next.clamp(1, i64::from(max.max(1))) as u32
}
