//! Table component - rows with sortable columns and row selection.
//!
//! The Table component provides:
//! - Column descriptors projecting record fields
//! - A three-state sort cycle per sortable column (ascending, descending, off)
//! - Row selection (single or multiple) tracked against the sorted view
//! - A selection observer that receives the selected rows
//! - Header and body views for a rendering layer
//!
//! # Example
//!
//! ```
//! use glasswork::prelude::*;
//!
//! let rows = vec![
//!     Record::new().with("id", 1).with("age", 28),
//!     Record::new().with("id", 2).with("age", 22),
//!     Record::new().with("id", 3).with("age", 24),
//! ];
//! let table = Table::new(vec![Column::new("age", "Age").sortable()], rows);
//!
//! table.toggle_sort("age");
//! let ids: Vec<_> = table
//!     .sorted_rows()
//!     .iter()
//!     .filter_map(|r| r.get("id").and_then(|v| v.as_number()))
//!     .collect();
//! assert_eq!(ids, vec![2.0, 3.0, 1.0]);
//! ```

mod config;
mod error;
mod item;
pub mod sort;
mod state;
mod view;

pub use config::TableConfig;
pub use error::TableError;
pub use item::{Column, RowKey, TableRow, validate_columns};
pub use sort::{SortDirection, SortKey};
pub use state::{RowKeyFn, RowSelectFn, Table, TableId};
pub use view::{
    EMPTY_TEXT, HeaderCell, LOADING_TEXT, RowControl, RowView, SELECT_LABEL, SelectHeader,
    SortIndicator, TableBody,
};
