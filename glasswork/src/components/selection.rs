//! Selection state management for the table component.
//!
//! Selection is tracked by row index into the table's current sorted view.
//! Indices are kept ordered so the selected rows come back in view order.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Selection mode for the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// At most one row is selected (radio-button style).
    Single,
    /// Any number of rows can be selected (checkbox style).
    #[default]
    Multiple,
}

/// Index-based selection state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    mode: SelectionMode,
    selected: BTreeSet<usize>,
}

impl Selection {
    /// Create an empty selection in the given mode.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: BTreeSet::new(),
        }
    }

    /// Get the selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Change the selection mode. Clears the selection.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
        self.selected.clear();
    }

    /// Selected indices in ascending order.
    pub fn indices(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }

    /// Check if an index is selected.
    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Get the number of selected rows.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Check if every one of `total` rows is selected. Always false when `total` is 0.
    pub fn is_all_selected(&self, total: usize) -> bool {
        total > 0 && self.selected.len() == total
    }

    /// Clear all selection. Returns true if anything was selected.
    pub fn clear(&mut self) -> bool {
        let changed = !self.selected.is_empty();
        self.selected.clear();
        changed
    }

    /// Toggle an index.
    ///
    /// Single mode replaces the selection with `{index}`, even when the index
    /// is already selected. Multiple mode flips membership.
    pub fn toggle(&mut self, index: usize) {
        match self.mode {
            SelectionMode::Single => {
                self.selected.clear();
                self.selected.insert(index);
            }
            SelectionMode::Multiple => {
                if !self.selected.remove(&index) {
                    self.selected.insert(index);
                }
            }
        }
    }

    /// Select-all checkbox behavior over `total` rows.
    ///
    /// Clears when the selection size equals `total`, otherwise selects
    /// `0..total`. Returns false (and does nothing) in single mode.
    pub fn toggle_all(&mut self, total: usize) -> bool {
        if self.mode == SelectionMode::Single {
            return false;
        }
        if self.selected.len() == total {
            self.selected.clear();
        } else {
            self.selected = (0..total).collect();
        }
        true
    }
}
