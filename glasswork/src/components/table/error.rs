//! Table configuration errors.

use thiserror::Error;

/// Errors reported when building a table from column descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Two columns share the same key.
    #[error("Duplicate column key '{0}'")]
    DuplicateColumnKey(String),

    /// A column has an empty key.
    #[error("Column '{title}' has an empty key")]
    EmptyColumnKey {
        /// Header title of the offending column.
        title: String,
    },
}
