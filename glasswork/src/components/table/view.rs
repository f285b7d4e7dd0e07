//! Derived view of a table for a rendering layer.
//!
//! Everything here is recomputed from the current state on each call.

use super::item::{RowKey, TableRow};
use super::sort::SortDirection;
use super::state::Table;
use crate::components::selection::SelectionMode;

/// Body text shown while loading.
pub const LOADING_TEXT: &str = "Loading…";
/// Body text shown when there are no rows.
pub const EMPTY_TEXT: &str = "No data";
/// Selection header label in single mode.
pub const SELECT_LABEL: &str = "Select";

/// Sort indicator for a sortable column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    /// Sortable but not the active sort.
    Unsorted,
    Ascending,
    Descending,
}

impl SortIndicator {
    /// Glyph for the indicator.
    pub fn glyph(self) -> &'static str {
        match self {
            SortIndicator::Unsorted => "↕",
            SortIndicator::Ascending => "▲",
            SortIndicator::Descending => "▼",
        }
    }
}

impl From<Option<SortDirection>> for SortIndicator {
    fn from(direction: Option<SortDirection>) -> Self {
        match direction {
            None => SortIndicator::Unsorted,
            Some(SortDirection::Ascending) => SortIndicator::Ascending,
            Some(SortDirection::Descending) => SortIndicator::Descending,
        }
    }
}

/// One column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub title: String,
    pub sortable: bool,
    /// `None` for non-sortable columns.
    pub indicator: Option<SortIndicator>,
}

/// The header cell above the selection controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectHeader {
    /// Multiple mode: a select-all checkbox.
    Checkbox { checked: bool },
    /// Single mode: a plain label.
    Label(&'static str),
}

/// Selection control for one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowControl {
    Checkbox,
    Radio,
}

/// One displayed row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    /// Index into the sorted view. Pass this to [`Table::toggle_row`].
    pub index: usize,
    pub key: RowKey,
    pub selected: bool,
    /// `None` when the table is not selectable.
    pub control: Option<RowControl>,
    /// Display text per column, in column order.
    pub cells: Vec<String>,
}

/// What the table body shows.
#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    Loading,
    Empty,
    Rows(Vec<RowView>),
}

impl TableBody {
    /// Placeholder text for the loading and empty states.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            TableBody::Loading => Some(LOADING_TEXT),
            TableBody::Empty => Some(EMPTY_TEXT),
            TableBody::Rows(_) => None,
        }
    }
}

impl<T: TableRow> Table<T> {
    /// Column headers in display order.
    pub fn header(&self) -> Vec<HeaderCell> {
        let Ok(g) = self.inner.read() else {
            return Vec::new();
        };
        g.columns
            .iter()
            .map(|column| {
                let indicator = column.sortable.then(|| {
                    let direction = g
                        .sort
                        .as_ref()
                        .filter(|s| s.field == column.field)
                        .map(|s| s.direction);
                    SortIndicator::from(direction)
                });
                HeaderCell {
                    key: column.key.clone(),
                    title: column.title.clone(),
                    sortable: column.sortable,
                    indicator,
                }
            })
            .collect()
    }

    /// The selection header cell, or `None` when the table is not selectable.
    pub fn select_header(&self) -> Option<SelectHeader> {
        let g = self.inner.read().ok()?;
        if !g.selectable {
            return None;
        }
        Some(match g.selection.mode() {
            SelectionMode::Multiple => SelectHeader::Checkbox {
                checked: g.all_selected(),
            },
            SelectionMode::Single => SelectHeader::Label(SELECT_LABEL),
        })
    }

    /// Number of cells in a header row, used to span the placeholder row.
    pub fn column_span(&self) -> usize {
        self.inner
            .read()
            .map(|g| g.columns.len() + usize::from(g.selectable))
            .unwrap_or(0)
    }

    /// The body: loading placeholder, empty placeholder, or the sorted rows.
    pub fn body(&self) -> TableBody {
        let Ok(g) = self.inner.read() else {
            return TableBody::Empty;
        };
        if g.loading {
            return TableBody::Loading;
        }
        if g.view.is_empty() {
            return TableBody::Empty;
        }

        let control = g.selectable.then_some(match g.selection.mode() {
            SelectionMode::Multiple => RowControl::Checkbox,
            SelectionMode::Single => RowControl::Radio,
        });

        let rows = (0..g.view.len())
            .filter_map(|index| {
                let row = g.view_row(index)?;
                Some(RowView {
                    index,
                    key: g.row_key(index)?,
                    selected: g.selection.is_selected(index),
                    control,
                    cells: g.columns.iter().map(|c| row.display(&c.field)).collect(),
                })
            })
            .collect();
        TableBody::Rows(rows)
    }
}
