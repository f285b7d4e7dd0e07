//! Headless state for a text input field and a sortable, selectable data table.
//!
//! The crate owns state, derived views and observer notifications. Rendering
//! is left to the host: read the derived views after a mutation (or when
//! `is_dirty()` reports a change) and draw them however you like.

pub mod components;
pub mod value;

pub use components::*;
pub use value::{Record, Value};

pub mod prelude {
    pub use crate::components::{Field, FieldConfig, FieldMessage, InputType, Size, Variant};
    pub use crate::components::{Column, RowKey, SortDirection, SortKey, Table, TableConfig};
    pub use crate::components::{SelectHeader, SortIndicator, TableBody, TableRow};
    pub use crate::components::{Selection, SelectionMode};
    pub use crate::value::{Record, Value};
}
