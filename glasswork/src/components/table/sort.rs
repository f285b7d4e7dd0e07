//! Sort state and the sorted-view computation.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::value::Value;

use super::item::TableRow;

/// Sort direction for an active sort.
///
/// "Not sorted" is represented by the absence of a [`SortKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The active sort: which field, in which direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Advance the sort state for a header click on `field`.
///
/// Same field: ascending → descending → unsorted. A different field (or no
/// active sort) starts at ascending.
pub fn next_sort(current: Option<&SortKey>, field: &str) -> Option<SortKey> {
    match current {
        Some(key) if key.field == field => match key.direction {
            SortDirection::Ascending => Some(SortKey::descending(field)),
            SortDirection::Descending => None,
        },
        _ => Some(SortKey::ascending(field)),
    }
}

/// Compare two optional values for sorting.
///
/// Absent values come first regardless of direction; descending reverses the
/// comparison of present values only.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => {
            let ord = a.compare(b);
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        }
    }
}

/// Compute the sorted view as indices into `rows`.
///
/// Without a sort this is the identity order. The sort is stable, so rows
/// with equal values keep their original relative order.
pub fn sorted_indices<T: TableRow>(rows: &[T], sort: Option<&SortKey>) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..rows.len()).collect();
    let Some(sort) = sort else {
        return indices;
    };

    // Extract each key once instead of per comparison.
    let keys: Vec<Option<Value>> = rows.iter().map(|row| row.field(&sort.field)).collect();
    indices.sort_by(|&a, &b| compare_values(keys[a].as_ref(), keys[b].as_ref(), sort.direction));
    indices
}
