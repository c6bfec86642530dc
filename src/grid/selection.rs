//! Row selection keyed by row id, with a tri-state select-all header.

use std::collections::HashSet;
use std::hash::Hash;

/// State of the select-all checkbox over the visible rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCheckState {
    /// No visible row is selected, or nothing is visible.
    Unchecked,
    /// Every visible row is selected.
    Checked,
    /// Some, but not all, visible rows are selected.
    Indeterminate,
}

impl HeaderCheckState {
    /// Checkbox glyph for text rendering.
    pub fn glyph(self) -> &'static str {
        match self {
            HeaderCheckState::Unchecked => "[ ]",
            HeaderCheckState::Checked => "[x]",
            HeaderCheckState::Indeterminate => "[-]",
        }
    }
}

/// Owns the selected row ids of one table instance.
///
/// Ids that are no longer visible (filtered away, on another page, removed by
/// the backend) stay selected until they are toggled off or [`clear`] is
/// called. Every operation costs O(1) or O(k) in the ids it is given.
///
/// [`clear`]: SelectionController::clear
#[derive(Debug, Clone)]
pub struct SelectionController<Id> {
    selected: HashSet<Id>,
}

impl<Id> Default for SelectionController<Id> {
    fn default() -> Self {
        Self {
            selected: HashSet::new(),
        }
    }
}

impl<Id: Eq + Hash + Clone> SelectionController<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one id in or out of the selection. Returns whether it is now
    /// selected. The id does not have to belong to the current rows.
    pub fn toggle_row(&mut self, id: Id) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    /// Select or deselect all visible ids.
    ///
    /// When every visible id is already selected they are all removed;
    /// otherwise (unchecked or indeterminate) the missing ones are added.
    /// Returns the header state afterwards.
    pub fn toggle_all_visible(&mut self, visible: &[Id]) -> HeaderCheckState {
        if self.header_state(visible) == HeaderCheckState::Checked {
            for id in visible {
                self.selected.remove(id);
            }
        } else {
            self.selected.extend(visible.iter().cloned());
        }
        self.header_state(visible)
    }

    /// Derive the select-all state over the visible ids.
    pub fn header_state(&self, visible: &[Id]) -> HeaderCheckState {
        if visible.is_empty() {
            return HeaderCheckState::Unchecked;
        }
        let count = visible.iter().filter(|id| self.selected.contains(*id)).count();
        if count == 0 {
            HeaderCheckState::Unchecked
        } else if count == visible.len() {
            HeaderCheckState::Checked
        } else {
            HeaderCheckState::Indeterminate
        }
    }

    /// Drop every selected id. Call when the dataset is replaced.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, id: &Id) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// All selected ids, visible or not.
    pub fn selected(&self) -> &HashSet<Id> {
        &self.selected
    }

    /// The visible ids that are selected, in visible order.
    pub fn selected_in(&self, visible: &[Id]) -> Vec<Id> {
        visible.iter().filter(|id| self.selected.contains(*id)).cloned().collect()
    }
}
