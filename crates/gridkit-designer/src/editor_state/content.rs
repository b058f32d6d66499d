//! Element deletion and content editing for editor state.

use super::EditorState;
use crate::model::{ContentUpdate, Element, ImageAsset};
use gridkit_core::{AssetError, LayoutError};

impl EditorState {
    /// Deletes an element, clearing the selection if it pointed at it.
    pub fn delete_element(&mut self, id: u64) -> Result<Element, LayoutError> {
        let removed = self.model.delete_element(id)?;
        self.selection.sync(&self.model);
        if !self.controller.gesture().is_idle() {
            self.controller.cancel();
        }
        self.is_modified = true;
        Ok(removed)
    }

    /// Deletes the selected element, if any.
    pub fn delete_selected(&mut self) -> Option<Element> {
        let id = self.selection.selected_id()?;
        self.delete_element(id).ok()
    }

    /// Removes every element and the selection.
    pub fn clear_elements(&mut self) {
        self.controller.cancel();
        self.model.clear();
        self.selection.clear();
        self.is_modified = true;
    }

    /// Merges `update` into the element's content. Returns false when the
    /// element does not exist.
    pub fn update_content(&mut self, id: u64, update: &ContentUpdate) -> bool {
        if update.is_empty() {
            return self.model.contains(id);
        }
        let updated = self.model.update_content(id, update);
        if updated {
            self.is_modified = true;
        }
        updated
    }

    /// Validates raw upload bytes and attaches them to `id`.
    ///
    /// On rejection the element keeps its current content.
    pub fn attach_image_bytes(
        &mut self,
        id: u64,
        bytes: Vec<u8>,
        hint: Option<&str>,
    ) -> Result<bool, AssetError> {
        let asset = self.asset_policy.validate_bytes(bytes, hint).inspect_err(|e| {
            tracing::warn!("Image for element {} rejected: {}", id, e);
        })?;
        Ok(self.update_content(id, &ContentUpdate::image(asset)))
    }

    /// Applies the result of an asynchronous image load.
    ///
    /// The element may have been deleted while the file was read; then this
    /// is a no-op returning `Ok(false)`.
    pub fn apply_loaded_image(
        &mut self,
        id: u64,
        loaded: Result<ImageAsset, AssetError>,
    ) -> Result<bool, AssetError> {
        let asset = loaded?;
        if !self.model.contains(id) {
            tracing::debug!("Element {} was deleted before its image loaded", id);
            return Ok(false);
        }
        Ok(self.update_content(id, &ContentUpdate::image(asset)))
    }

    pub fn remove_image(&mut self, id: u64) -> bool {
        self.update_content(id, &ContentUpdate::remove_image())
    }
}
