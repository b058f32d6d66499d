use crate::grid_model::GridModel;

/// Tracks the selected element.
///
/// # Selection Model
///
/// - At most one element is selected, stored as `selected_id`
/// - Pressing an element selects it
/// - Deleting the selected element, or loading a template, clears the selection
///
/// The manager never owns elements; a stale id is dropped the next time
/// [`SelectionManager::sync`] runs against the model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionManager {
    /// The ID of the selected element, if any
    selected_id: Option<u64>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridkit_designer::selection_manager::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert_eq!(manager.selected_id(), None);
    /// ```
    pub fn new() -> Self {
        Self { selected_id: None }
    }

    /// Returns the ID of the selected element.
    pub fn selected_id(&self) -> Option<u64> {
        self.selected_id
    }

    /// Sets the selected element ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The ID of the element to select, or `None` to clear
    pub fn set_selected_id(&mut self, id: Option<u64>) {
        self.selected_id = id;
    }

    pub fn is_selected(&self, id: u64) -> bool {
        self.selected_id == Some(id)
    }

    pub fn clear(&mut self) {
        self.selected_id = None;
    }

    /// Drops the selection if the element no longer exists.
    ///
    /// # Returns
    ///
    /// `true` if the selection was cleared.
    pub fn sync(&mut self, model: &GridModel) -> bool {
        match self.selected_id {
            Some(id) if !model.contains(id) => {
                self.selected_id = None;
                true
            }
            _ => false,
        }
    }
}
