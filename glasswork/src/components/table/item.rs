//! TableRow trait and Column types.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

use super::error::TableError;

/// Column descriptor.
///
/// Columns define the structure of the table: a unique key, the header
/// title, which record field the column projects, and whether clicking the
/// header sorts by that field.
///
/// # Examples
///
/// ```
/// use glasswork::Column;
///
/// let columns = vec![
///     Column::new("name", "Name").sortable(),
///     Column::new("mail", "Email").field("email"),
/// ];
/// assert_eq!(columns[1].field, "email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Unique identifier for this column.
    pub key: String,
    /// Header text.
    pub title: String,
    /// The record field this column displays and sorts by.
    pub field: String,
    /// Whether this column is sortable.
    #[serde(default)]
    pub sortable: bool,
}

impl Column {
    /// Create a column whose projected field has the same name as its key.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            field: key.clone(),
            key,
            title: title.into(),
            sortable: false,
        }
    }

    /// Project a different record field.
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }
}

/// Check that column keys are non-empty and unique.
pub fn validate_columns(columns: &[Column]) -> Result<(), TableError> {
    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        if column.key.is_empty() {
            return Err(TableError::EmptyColumnKey {
                title: column.title.clone(),
            });
        }
        if !seen.insert(column.key.as_str()) {
            return Err(TableError::DuplicateColumnKey(column.key.clone()));
        }
    }
    Ok(())
}

/// Trait for items that can be displayed as rows in a [`Table`](super::Table).
///
/// A row is a read-only projection from field name to scalar [`Value`].
/// Returning `None` means the field is absent; absent values sort first.
///
/// # Example
///
/// ```
/// use glasswork::{TableRow, Value};
///
/// #[derive(Clone)]
/// struct User {
///     name: String,
///     age: Option<u32>,
/// }
///
/// impl TableRow for User {
///     fn field(&self, name: &str) -> Option<Value> {
///         match name {
///             "name" => Some(self.name.as_str().into()),
///             "age" => self.age.map(Value::from),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait TableRow: Clone + Send + Sync + 'static {
    /// Get the value of a field.
    fn field(&self, name: &str) -> Option<Value>;

    /// Display text for a field. Absent fields display as an empty string.
    fn display(&self, name: &str) -> String {
        self.field(name).map(|v| v.to_string()).unwrap_or_default()
    }
}

/// Stable identity for a rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    /// Position in the sorted view (used when no key function is set).
    Index(usize),
    Number(i64),
    Text(String),
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Index(i) => write!(f, "{}", i),
            RowKey::Number(n) => write!(f, "{}", n),
            RowKey::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RowKey {
    fn from(n: i64) -> Self {
        RowKey::Number(n)
    }
}

impl From<&str> for RowKey {
    fn from(s: &str) -> Self {
        RowKey::Text(s.to_string())
    }
}

impl From<String> for RowKey {
    fn from(s: String) -> Self {
        RowKey::Text(s)
    }
}
