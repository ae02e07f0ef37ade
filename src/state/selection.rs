use std::collections::HashSet;

use crate::state::row_identity::RowId;

/// Visual state of the "select all" header checkbox.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckState {
    Unchecked,
    Indeterminate,
    Checked,
}

/// Tracks selected rows by identity, independent of page and sort order.
///
/// Rows hidden by a filter keep their selection so clearing the filter
/// brings their checked state back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    selected: HashSet<RowId>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets every row in `page` to `value`. Rows outside the page are untouched.
    pub fn toggle_all<'a>(&mut self, page: impl IntoIterator<Item = &'a RowId>, value: bool) {
        for id in page {
            self.toggle_row(id, value);
        }
    }

    /// Returns true if the selection changed.
    pub fn toggle_row(&mut self, id: &RowId, value: bool) -> bool {
        if value {
            self.selected.insert(id.clone())
        } else {
            self.selected.remove(id)
        }
    }

    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn selected_ids(&self) -> impl Iterator<Item = &RowId> {
        self.selected.iter()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn check_state<'a>(&self, page: impl IntoIterator<Item = &'a RowId>) -> CheckState {
        let mut total = 0;
        let mut selected = 0;
        for id in page {
            total += 1;
            if self.is_selected(id) {
                selected += 1;
            }
        }

        if total == 0 || selected == 0 {
            CheckState::Unchecked
        } else if selected == total {
            CheckState::Checked
        } else {
            CheckState::Indeterminate
        }
    }
}
