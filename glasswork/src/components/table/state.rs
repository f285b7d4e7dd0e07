//! Table component state.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::components::selection::{Selection, SelectionMode};

use super::config::TableConfig;
use super::error::TableError;
use super::item::{Column, RowKey, TableRow, validate_columns};
use super::sort::{SortDirection, SortKey, next_sort, sorted_indices};

/// Unique identifier for a Table instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__table_{}", self.0)
    }
}

/// Computes a stable key for a row given its position in the sorted view.
pub type RowKeyFn<T> = Arc<dyn Fn(&T, usize) -> RowKey + Send + Sync>;

/// Receives the selected rows, in sorted-view order, after every selection change.
pub type RowSelectFn<T> = Arc<dyn Fn(&[T]) + Send + Sync>;

/// Internal state for the Table component.
pub(super) struct TableInner<T: TableRow> {
    /// Column descriptors in display order.
    pub columns: Vec<Column>,
    /// Rows in caller order. Never mutated, only re-indexed.
    pub rows: Vec<T>,
    /// Sorted view: `view[i]` is the position in `rows` of the i-th displayed row.
    pub view: Vec<usize>,
    /// Active sort, if any.
    pub sort: Option<SortKey>,
    /// Selected indices into `view`.
    pub selection: Selection,
    pub selectable: bool,
    pub loading: bool,
    pub row_key: Option<RowKeyFn<T>>,
    pub on_row_select: Option<RowSelectFn<T>>,
}

impl<T: TableRow> TableInner<T> {
    fn new(columns: Vec<Column>, rows: Vec<T>) -> Self {
        let view = sorted_indices(&rows, None);
        Self {
            columns,
            rows,
            view,
            sort: None,
            selection: Selection::default(),
            selectable: false,
            loading: false,
            row_key: None,
            on_row_select: None,
        }
    }

    fn resort(&mut self) {
        self.view = sorted_indices(&self.rows, self.sort.as_ref());
    }

    /// Row at a sorted-view index.
    pub fn view_row(&self, index: usize) -> Option<&T> {
        self.view.get(index).map(|&i| &self.rows[i])
    }

    pub fn row_key(&self, index: usize) -> Option<RowKey> {
        let row = self.view_row(index)?;
        Some(match &self.row_key {
            Some(key_fn) => key_fn(row, index),
            None => RowKey::Index(index),
        })
    }

    fn selected_rows(&self) -> Vec<T> {
        self.selection
            .indices()
            .into_iter()
            .filter_map(|i| self.view_row(i).cloned())
            .collect()
    }

    fn is_sortable_field(&self, field: &str) -> bool {
        self.columns.iter().any(|c| c.sortable && c.field == field)
    }

    pub fn all_selected(&self) -> bool {
        self.selection.is_all_selected(self.view.len())
    }

    /// Pair the observer with the rows it should receive, if one is registered.
    fn pending_notification(&self) -> Option<(RowSelectFn<T>, Vec<T>)> {
        self.on_row_select
            .clone()
            .map(|callback| (callback, self.selected_rows()))
    }
}

/// A table with sortable columns and row selection.
///
/// `Table<T>` owns the rows handed to it and derives a sorted view from the
/// active sort. Selection is tracked by index into that sorted view and is
/// reported to the `on_row_select` observer after every change.
///
/// Handles are cheap to clone and share state. Observers run after the
/// internal lock is released, so they may read the table.
///
/// # Example
///
/// ```
/// use glasswork::{Column, Record, SelectionMode, Table, TableConfig};
///
/// let rows = vec![
///     Record::new().with("id", 1).with("age", 28),
///     Record::new().with("id", 2).with("age", 22),
/// ];
/// let table = Table::new(vec![Column::new("age", "Age").sortable()], rows)
///     .with_config(TableConfig::new().selectable().selection_mode(SelectionMode::Multiple));
///
/// table.toggle_sort("age");
/// table.toggle_row(0);
/// let selected = table.selected_rows();
/// assert_eq!(selected[0].get("id").and_then(|v| v.as_number()), Some(2.0));
/// ```
pub struct Table<T: TableRow> {
    id: TableId,
    pub(super) inner: Arc<RwLock<TableInner<T>>>,
    dirty: Arc<AtomicBool>,
}

impl<T: TableRow> Table<T> {
    /// Create a table from column descriptors and rows.
    ///
    /// Invalid descriptors (empty or duplicate keys) are logged and kept.
    /// Use [`Table::try_new`] to reject them instead.
    pub fn new(columns: Vec<Column>, rows: Vec<T>) -> Self {
        if let Err(e) = validate_columns(&columns) {
            log::warn!("Table created with invalid columns: {}", e);
        }
        Self::from_inner(TableInner::new(columns, rows))
    }

    /// Create a table, rejecting invalid column descriptors.
    pub fn try_new(columns: Vec<Column>, rows: Vec<T>) -> Result<Self, TableError> {
        validate_columns(&columns)?;
        Ok(Self::from_inner(TableInner::new(columns, rows)))
    }

    fn from_inner(inner: TableInner<T>) -> Self {
        let table = Self {
            id: TableId::new(),
            inner: Arc::new(RwLock::new(inner)),
            dirty: Arc::new(AtomicBool::new(false)),
        };
        log::trace!("{}: created with {} rows", table.id, table.len());
        table
    }

    /// Apply configuration flags.
    pub fn with_config(self, config: TableConfig) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.selectable = config.selectable;
            guard.loading = config.loading;
            guard.selection.set_mode(config.selection_mode);
        }
        self
    }

    /// Set the selection mode.
    pub fn with_selection_mode(self, mode: SelectionMode) -> Self {
        self.set_selection_mode(mode);
        self
    }

    /// Set the row key function.
    pub fn with_row_key<F>(self, key_fn: F) -> Self
    where
        F: Fn(&T, usize) -> RowKey + Send + Sync + 'static,
    {
        if let Ok(mut guard) = self.inner.write() {
            guard.row_key = Some(Arc::new(key_fn));
        }
        self
    }

    /// Set the selection observer.
    pub fn on_row_select<F>(self, callback: F) -> Self
    where
        F: Fn(&[T]) + Send + Sync + 'static,
    {
        if let Ok(mut guard) = self.inner.write() {
            guard.on_row_select = Some(Arc::new(callback));
        }
        self
    }

    /// Get the unique ID.
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Get the ID as a string.
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    /// Get column descriptors.
    pub fn columns(&self) -> Vec<Column> {
        self.inner
            .read()
            .map(|g| g.columns.clone())
            .unwrap_or_default()
    }

    /// Replace the column descriptors.
    ///
    /// Resets the sort if its field is no longer projected by a sortable column.
    pub fn set_columns(&self, columns: Vec<Column>) {
        if let Err(e) = validate_columns(&columns) {
            log::warn!("{}: invalid columns: {}", self.id, e);
        }
        if let Ok(mut guard) = self.inner.write() {
            guard.columns = columns;
            let stale = guard
                .sort
                .as_ref()
                .is_some_and(|s| !guard.is_sortable_field(&s.field));
            if stale {
                log::debug!("{}: sort field no longer sortable, clearing sort", self.id);
                guard.sort = None;
                guard.resort();
            }
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.inner.read().map(|g| g.columns.len()).unwrap_or(0)
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.view.len()).unwrap_or(0)
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the rows in the order they were supplied.
    pub fn rows(&self) -> Vec<T> {
        self.inner.read().map(|g| g.rows.clone()).unwrap_or_default()
    }

    /// Get the rows in sorted-view order.
    pub fn sorted_rows(&self) -> Vec<T> {
        self.inner
            .read()
            .map(|g| g.view.iter().map(|&i| g.rows[i].clone()).collect())
            .unwrap_or_default()
    }

    /// Get the sorted view as positions into the supplied rows.
    pub fn view_indices(&self) -> Vec<usize> {
        self.inner.read().map(|g| g.view.clone()).unwrap_or_default()
    }

    /// Get the row at a sorted-view index.
    pub fn row_at(&self, index: usize) -> Option<T> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.view_row(index).cloned())
    }

    /// Get the key for the row at a sorted-view index.
    ///
    /// Uses the row key function when set, otherwise the index itself.
    pub fn row_key_at(&self, index: usize) -> Option<RowKey> {
        self.inner.read().ok().and_then(|g| g.row_key(index))
    }

    /// Replace all rows.
    ///
    /// Recomputes the sorted view and clears the selection, since indices
    /// into the old view no longer identify the same rows.
    pub fn set_rows(&self, rows: Vec<T>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.rows = rows;
            guard.resort();
            guard.selection.clear();
            log::debug!("{}: rows replaced ({} rows)", self.id, guard.rows.len());
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Get the active sort.
    pub fn sort(&self) -> Option<SortKey> {
        self.inner.read().ok().and_then(|g| g.sort.clone())
    }

    /// Get the sort direction if `field` is the active sort field.
    pub fn sort_direction_for(&self, field: &str) -> Option<SortDirection> {
        self.inner.read().ok().and_then(|g| {
            g.sort
                .as_ref()
                .filter(|s| s.field == field)
                .map(|s| s.direction)
        })
    }

    /// Advance the sort for `field`: ascending, descending, then unsorted.
    ///
    /// Does nothing unless a sortable column projects `field`.
    /// Returns true if the sort changed.
    pub fn toggle_sort(&self, field: &str) -> bool {
        if let Ok(mut guard) = self.inner.write()
            && guard.is_sortable_field(field)
        {
            guard.sort = next_sort(guard.sort.as_ref(), field);
            guard.resort();
            log::debug!("{}: sort is now {:?}", self.id, guard.sort);
            self.dirty.store(true, Ordering::SeqCst);
            return true;
        }
        log::trace!("{}: ignoring sort on non-sortable field '{}'", self.id, field);
        false
    }

    /// Header click on the column with `key`.
    pub fn toggle_sort_column(&self, key: &str) -> bool {
        let field = self.inner.read().ok().and_then(|g| {
            g.columns
                .iter()
                .find(|c| c.key == key && c.sortable)
                .map(|c| c.field.clone())
        });
        match field {
            Some(field) => self.toggle_sort(&field),
            None => false,
        }
    }

    /// Set the sort directly.
    ///
    /// `Some` is ignored unless a sortable column projects the field.
    pub fn set_sort(&self, sort: Option<SortKey>) -> bool {
        if let Ok(mut guard) = self.inner.write() {
            if sort.as_ref().is_some_and(|s| !guard.is_sortable_field(&s.field)) {
                return false;
            }
            guard.sort = sort;
            guard.resort();
            self.dirty.store(true, Ordering::SeqCst);
            return true;
        }
        false
    }

    /// Clear the sort, restoring the original row order.
    pub fn clear_sort(&self) {
        self.set_sort(None);
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    /// Get the current configuration flags.
    pub fn config(&self) -> TableConfig {
        self.inner
            .read()
            .map(|g| TableConfig {
                selectable: g.selectable,
                selection_mode: g.selection.mode(),
                loading: g.loading,
            })
            .unwrap_or_default()
    }

    /// Get the selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.inner
            .read()
            .map(|g| g.selection.mode())
            .unwrap_or_default()
    }

    /// Set the selection mode. Clears the selection.
    pub fn set_selection_mode(&self, mode: SelectionMode) {
        if let Ok(mut guard) = self.inner.write() {
            guard.selection.set_mode(mode);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Check if selection controls are shown.
    pub fn selectable(&self) -> bool {
        self.inner.read().map(|g| g.selectable).unwrap_or(false)
    }

    /// Show or hide selection controls.
    pub fn set_selectable(&self, selectable: bool) {
        if let Ok(mut guard) = self.inner.write()
            && guard.selectable != selectable
        {
            guard.selectable = selectable;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Check the loading flag.
    pub fn loading(&self) -> bool {
        self.inner.read().map(|g| g.loading).unwrap_or(false)
    }

    /// Set the loading flag.
    pub fn set_loading(&self, loading: bool) {
        if let Ok(mut guard) = self.inner.write()
            && guard.loading != loading
        {
            guard.loading = loading;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Selected sorted-view indices, ascending.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.inner
            .read()
            .map(|g| g.selection.indices())
            .unwrap_or_default()
    }

    /// Selected rows in sorted-view order.
    pub fn selected_rows(&self) -> Vec<T> {
        self.inner
            .read()
            .map(|g| g.selected_rows())
            .unwrap_or_default()
    }

    /// Check if the row at a sorted-view index is selected.
    pub fn is_selected(&self, index: usize) -> bool {
        self.inner
            .read()
            .map(|g| g.selection.is_selected(index))
            .unwrap_or(false)
    }

    /// Check if every row is selected. False for an empty table.
    pub fn all_selected(&self) -> bool {
        self.inner.read().map(|g| g.all_selected()).unwrap_or(false)
    }

    /// Toggle the row at a sorted-view index and notify the observer.
    ///
    /// Single mode always leaves exactly this row selected; clicking the
    /// selected row again keeps it selected. Multiple mode flips membership.
    /// Out-of-range indices are ignored. Returns true if the selection was
    /// updated.
    pub fn toggle_row(&self, index: usize) -> bool {
        let notification = {
            let Ok(mut guard) = self.inner.write() else {
                return false;
            };
            if index >= guard.view.len() {
                log::trace!("{}: ignoring toggle of row {} (out of range)", self.id, index);
                return false;
            }
            guard.selection.toggle(index);
            log::debug!(
                "{}: toggled row {}, selection {:?}",
                self.id,
                index,
                guard.selection.indices()
            );
            self.dirty.store(true, Ordering::SeqCst);
            guard.pending_notification()
        };
        Self::notify(notification);
        true
    }

    /// Select-all checkbox: clears when everything is selected, otherwise
    /// selects every row. Does nothing in single mode.
    ///
    /// Returns true if the selection was updated.
    pub fn toggle_all(&self) -> bool {
        let notification = {
            let Ok(mut guard) = self.inner.write() else {
                return false;
            };
            let total = guard.view.len();
            if !guard.selection.toggle_all(total) {
                log::trace!("{}: toggle_all ignored in single mode", self.id);
                return false;
            }
            log::debug!("{}: toggle_all, {} of {} selected", self.id, guard.selection.len(), total);
            self.dirty.store(true, Ordering::SeqCst);
            guard.pending_notification()
        };
        Self::notify(notification);
        true
    }

    /// Clear the selection without notifying the observer.
    pub fn clear_selection(&self) {
        if let Ok(mut guard) = self.inner.write()
            && guard.selection.clear()
        {
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    fn notify(notification: Option<(RowSelectFn<T>, Vec<T>)>) {
        if let Some((callback, rows)) = notification {
            callback(&rows);
        }
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the table has changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<T: TableRow> Clone for Table<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T: TableRow> fmt::Debug for Table<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Table");
        s.field("id", &self.id);
        if let Ok(g) = self.inner.read() {
            s.field("columns", &g.columns)
                .field("rows", &g.rows.len())
                .field("sort", &g.sort)
                .field("selection", &g.selection)
                .field("selectable", &g.selectable)
                .field("loading", &g.loading);
        }
        s.finish_non_exhaustive()
    }
}
