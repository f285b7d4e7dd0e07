//! Table configuration.

use serde::{Deserialize, Serialize};

use crate::components::selection::SelectionMode;

/// Per-table configuration flags.
///
/// # Example
///
/// ```
/// use glasswork::{SelectionMode, TableConfig};
///
/// let config = TableConfig::new()
///     .selectable()
///     .selection_mode(SelectionMode::Single);
/// assert!(config.selectable);
/// assert!(!config.loading);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Show selection controls.
    pub selectable: bool,

    /// Single (radio) or multiple (checkbox) selection.
    pub selection_mode: SelectionMode,

    /// Data is still loading. The body shows a placeholder instead of rows,
    /// but sort and selection still accept mutations.
    pub loading: bool,
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable selection controls.
    pub fn selectable(mut self) -> Self {
        self.selectable = true;
        self
    }

    /// Set the selection mode.
    pub fn selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Set the loading flag.
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }
}
