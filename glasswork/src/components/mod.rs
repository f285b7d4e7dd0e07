//! UI components with self-managed state.
//!
//! Each component lives in its own module with:
//! - `state.rs` - the component state type
//! - `config.rs` - builder-style configuration
//! - `view.rs` - derived state for a rendering layer
//! - `mod.rs` - public exports

pub mod field;
pub mod selection;
pub mod table;

pub use field::{Field, FieldConfig, FieldId, FieldMessage, InputType, Size, ValueSource, Variant};
pub use selection::{Selection, SelectionMode};
pub use table::{
    Column, HeaderCell, RowControl, RowKey, RowView, SelectHeader, SortDirection, SortIndicator,
    SortKey, Table, TableBody, TableConfig, TableError, TableId, TableRow,
};
