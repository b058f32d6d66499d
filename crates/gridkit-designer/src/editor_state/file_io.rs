//! Template save/load and presets for editor state.

use super::EditorState;
use crate::grid_model::RepairReport;
use crate::serialization::{load_template, save_template, LoadedTemplate, TemplateData};
use crate::templates::build_preset;
use gridkit_core::TemplateError;
use std::path::Path;

impl EditorState {
    /// Snapshot of the current model for persistence.
    pub fn current_template(&self) -> TemplateData {
        TemplateData::from_model(&self.model, self.physical_page)
    }

    /// Replaces the model with a validated template. All-or-nothing: on error
    /// the current design is untouched.
    pub fn load_template(&mut self, data: &TemplateData) -> Result<RepairReport, TemplateError> {
        let loaded = data.to_model()?;
        Ok(self.install(loaded))
    }

    fn install(&mut self, loaded: LoadedTemplate) -> RepairReport {
        self.controller.cancel();
        self.selection.clear();
        self.model = loaded.model;
        self.physical_page = loaded.physical_page;
        loaded.repair
    }

    /// Starts over from a built-in preset, in physical-page mode.
    pub fn load_preset(&mut self, id: &str) -> Result<(), TemplateError> {
        let model = build_preset(id)?;
        self.install(LoadedTemplate {
            model,
            physical_page: true,
            repair: RepairReport::default(),
        });
        self.current_file_path = None;
        self.design_name = id.to_string();
        self.is_modified = true;
        Ok(())
    }

    /// Save design to file.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        save_template(&self.current_template(), &path)?;
        self.current_file_path = Some(path.as_ref().to_path_buf());
        self.is_modified = false;
        Ok(())
    }

    /// Load design from file.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<RepairReport> {
        let path = path.as_ref();
        let loaded = load_template(path)?;
        let report = self.install(loaded);
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            self.design_name = stem.to_string();
        }
        self.current_file_path = Some(path.to_path_buf());
        self.is_modified = !report.is_noop();
        Ok(report)
    }

    /// Create new design (clear all).
    pub fn new_design(&mut self) {
        let config = *self.model.config();
        self.controller.cancel();
        self.selection.clear();
        self.model = crate::grid_model::GridModel::new(config);
        self.current_file_path = None;
        self.is_modified = false;
        self.design_name = "Untitled".to_string();
    }

    /// Get display name for the design.
    pub fn display_name(&self) -> String {
        let name = self
            .current_file_path
            .as_ref()
            .and_then(|path| path.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or(&self.design_name);

        if self.is_modified {
            format!("{}*", name)
        } else {
            name.to_string()
        }
    }
}
