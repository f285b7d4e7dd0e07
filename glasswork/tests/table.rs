use std::sync::{Arc, Mutex};

use glasswork::prelude::*;
use glasswork::{RowControl, TableError};
use simplelog::{Config, LevelFilter, TestLogger};

fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

fn user(id: i32, name: &str, age: i32) -> Record {
    Record::new().with("id", id).with("name", name).with("age", age)
}

fn users() -> Vec<Record> {
    vec![user(1, "Ananya", 28), user(2, "Rahul", 22), user(3, "Zoya", 24)]
}

fn columns() -> Vec<Column> {
    vec![
        Column::new("name", "Name").sortable(),
        Column::new("email", "Email"),
        Column::new("age", "Age").sortable(),
    ]
}

fn ids(rows: &[Record]) -> Vec<i64> {
    rows.iter()
        .filter_map(|r| r.get("id").and_then(|v| v.as_number()))
        .map(|n| n as i64)
        .collect()
}

/// Table that records every observer call.
fn observed(config: TableConfig) -> (Table<Record>, Arc<Mutex<Vec<Vec<i64>>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    let table = Table::new(columns(), users())
        .with_config(config)
        .on_row_select(move |rows: &[Record]| {
            sink.lock().unwrap().push(ids(rows));
        });
    (table, calls)
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn test_sort_cycle_by_age() {
    init_logging();
    let table = Table::new(columns(), users());

    assert!(table.toggle_sort("age"));
    assert_eq!(ids(&table.sorted_rows()), vec![2, 3, 1]);
    assert_eq!(table.sort(), Some(SortKey::ascending("age")));

    assert!(table.toggle_sort("age"));
    assert_eq!(ids(&table.sorted_rows()), vec![1, 3, 2]);
    assert_eq!(table.sort_direction_for("age"), Some(SortDirection::Descending));

    assert!(table.toggle_sort("age"));
    assert_eq!(ids(&table.sorted_rows()), vec![1, 2, 3]);
    assert_eq!(table.sort(), None);
}

#[test]
fn test_sort_by_text() {
    let rows = vec![user(1, "Zoya", 22), user(2, "Ananya", 24), user(3, "Rahul", 28)];
    let table = Table::new(columns(), rows);
    table.toggle_sort("name");
    assert_eq!(ids(&table.sorted_rows()), vec![2, 3, 1]);
}

#[test]
fn test_switching_field_restarts_ascending() {
    let table = Table::new(columns(), users());
    table.toggle_sort("age");
    table.toggle_sort("age");
    table.toggle_sort("name");
    assert_eq!(table.sort(), Some(SortKey::ascending("name")));
    assert_eq!(table.sort_direction_for("age"), None);
}

#[test]
fn test_sort_non_sortable_is_noop() {
    let table = Table::new(columns(), users());
    assert!(!table.toggle_sort("email"));
    assert!(!table.toggle_sort("missing"));
    assert_eq!(table.sort(), None);
    assert!(!table.is_dirty());
}

#[test]
fn test_absent_values_sort_first() {
    let rows = vec![
        user(1, "Ananya", 28),
        Record::new().with("id", 2).with("name", "Rahul"),
        user(3, "Zoya", 24),
    ];
    let table = Table::new(columns(), rows);
    table.toggle_sort("age");
    assert_eq!(ids(&table.sorted_rows()), vec![2, 3, 1]);
}

fn ages_with_nan(count: i32) -> Vec<Record> {
    (0..count)
        .map(|i| {
            let row = Record::new().with("id", i);
            match i % 7 {
                0 | 4 => row.with("age", f64::NAN),
                3 => row,
                _ => row.with("age", f64::from((i * 37) % 50)),
            }
        })
        .collect()
}

/// Sorted ages, `None` for rows without one.
fn sorted_ages(table: &Table<Record>) -> Vec<Option<f64>> {
    table
        .sorted_rows()
        .iter()
        .map(|r| r.get("age").and_then(|v| v.as_number()))
        .collect()
}

#[test]
fn test_sort_with_nan_values() {
    init_logging();
    for count in [20, 21, 64, 421] {
        let table = Table::new(columns(), ages_with_nan(count));
        let absent = (0..count).filter(|i| i % 7 == 3).count();

        assert!(table.toggle_sort("age"));
        let ages = sorted_ages(&table);
        assert!(ages[..absent].iter().all(Option::is_none));
        let present: Vec<f64> = ages[absent..].iter().map(|a| a.unwrap()).collect();
        let numbers = present.iter().take_while(|a| !a.is_nan()).count();
        assert!(present[..numbers].windows(2).all(|w| w[0] <= w[1]));
        assert!(present[numbers..].iter().all(|a| a.is_nan()));

        assert!(table.toggle_sort("age"));
        let ages = sorted_ages(&table);
        assert!(ages[..absent].iter().all(Option::is_none));
        let present: Vec<f64> = ages[absent..].iter().map(|a| a.unwrap()).collect();
        let nans = present.iter().take_while(|a| a.is_nan()).count();
        assert!(nans > 0);
        assert!(present[nans..].windows(2).all(|w| w[0] >= w[1]));

        // Still usable after sorting.
        assert!(table.toggle_row(0));
        assert_eq!(table.selected_indices(), vec![0]);
        assert_eq!(table.len(), count as usize);
        assert!(table.toggle_sort("age"));
        assert_eq!(table.view_indices(), (0..count as usize).collect::<Vec<_>>());
    }
}

#[test]
fn test_resorting_with_nan_is_identity() {
    let table = Table::new(columns(), ages_with_nan(40));
    table.toggle_sort("age");
    let once = table.sorted_rows();

    let again = Table::new(columns(), once);
    again.toggle_sort("age");
    assert_eq!(again.view_indices(), (0..40).collect::<Vec<_>>());
}

#[test]
fn test_resorting_sorted_rows_is_identity() {
    let table = Table::new(columns(), users());
    table.toggle_sort("age");
    let once = table.sorted_rows();

    let again = Table::new(columns(), once.clone());
    again.toggle_sort("age");
    assert_eq!(again.sorted_rows(), once);
    assert_eq!(again.view_indices(), vec![0, 1, 2]);
}

#[test]
fn test_sort_column_by_key() {
    let columns = vec![Column::new("years", "Age").field("age").sortable()];
    let table = Table::new(columns, users());
    assert!(table.toggle_sort_column("years"));
    assert_eq!(table.sort(), Some(SortKey::ascending("age")));
    assert!(!table.toggle_sort_column("age"));
}

#[test]
fn test_set_sort_rejects_non_sortable() {
    let table = Table::new(columns(), users());
    assert!(!table.set_sort(Some(SortKey::ascending("email"))));
    assert!(table.set_sort(Some(SortKey::descending("age"))));
    assert_eq!(ids(&table.sorted_rows()), vec![1, 3, 2]);
    table.clear_sort();
    assert_eq!(ids(&table.sorted_rows()), vec![1, 2, 3]);
}

#[test]
fn test_set_columns_drops_stale_sort() {
    let table = Table::new(columns(), users());
    table.toggle_sort("age");
    table.set_columns(vec![Column::new("name", "Name").sortable()]);
    assert_eq!(table.sort(), None);
    assert_eq!(ids(&table.sorted_rows()), vec![1, 2, 3]);
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_single_mode_replaces_selection() {
    init_logging();
    let (table, calls) = observed(TableConfig::new().selection_mode(SelectionMode::Single));

    table.toggle_row(0);
    table.toggle_row(1);
    assert_eq!(table.selected_indices(), vec![1]);
    assert_eq!(*calls.lock().unwrap(), vec![vec![1], vec![2]]);
}

#[test]
fn test_single_mode_reclick_keeps_row() {
    let (table, calls) = observed(TableConfig::new().selection_mode(SelectionMode::Single));
    table.toggle_row(2);
    table.toggle_row(2);
    assert_eq!(table.selected_indices(), vec![2]);
    assert_eq!(calls.lock().unwrap().len(), 2);
}

#[test]
fn test_multiple_mode_toggle_all_scenario() {
    let (table, calls) = observed(TableConfig::new().selectable());

    table.toggle_row(0);
    table.toggle_row(2);
    assert_eq!(table.selected_indices(), vec![0, 2]);
    assert!(!table.all_selected());

    assert!(table.toggle_all());
    assert_eq!(table.selected_indices(), vec![0, 1, 2]);
    assert!(table.all_selected());

    assert!(table.toggle_all());
    assert!(table.selected_indices().is_empty());

    let calls = calls.lock().unwrap();
    assert_eq!(calls[2], vec![1, 2, 3]);
    assert_eq!(calls[3], Vec::<i64>::new());
}

#[test]
fn test_toggle_all_twice_restores_selection() {
    let table = Table::new(columns(), users());
    table.toggle_all();
    table.toggle_all();
    assert!(table.selected_indices().is_empty());

    table.toggle_row(0);
    table.toggle_row(1);
    table.toggle_row(2);
    table.toggle_all();
    table.toggle_all();
    assert_eq!(table.selected_indices(), vec![0, 1, 2]);
}

#[test]
fn test_toggle_all_noop_in_single_mode() {
    let (table, calls) = observed(TableConfig::new().selection_mode(SelectionMode::Single));
    assert!(!table.toggle_all());
    assert!(table.selected_indices().is_empty());
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn test_toggle_all_on_empty_table() {
    let table: Table<Record> = Table::new(columns(), Vec::new());
    assert!(table.toggle_all());
    assert!(!table.all_selected());
}

#[test]
fn test_selection_reports_sorted_rows() {
    let (table, calls) = observed(TableConfig::new());
    table.toggle_sort("age");
    table.toggle_row(0);
    assert_eq!(*calls.lock().unwrap(), vec![vec![2]]);
    assert_eq!(ids(&table.selected_rows()), vec![2]);
}

#[test]
fn test_selection_follows_current_sort() {
    let (table, calls) = observed(TableConfig::new());
    table.toggle_row(0);
    table.toggle_sort("age");
    table.toggle_row(2);
    // Index 0 is now Rahul, index 2 is Ananya.
    assert_eq!(calls.lock().unwrap().last(), Some(&vec![2, 1]));
}

#[test]
fn test_toggle_row_out_of_range() {
    let (table, calls) = observed(TableConfig::new());
    assert!(!table.toggle_row(3));
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn test_set_rows_clears_selection() {
    let table = Table::new(columns(), users());
    table.toggle_row(1);
    table.set_rows(vec![user(9, "Mira", 30)]);
    assert!(table.selected_indices().is_empty());
    assert_eq!(table.len(), 1);
}

#[test]
fn test_set_rows_keeps_sort() {
    let table = Table::new(columns(), vec![user(1, "Ananya", 28)]);
    table.toggle_sort("age");
    table.set_rows(users());
    assert_eq!(ids(&table.sorted_rows()), vec![2, 3, 1]);
}

#[test]
fn test_observer_can_read_table() {
    let seen = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&seen);
    let table = Table::new(columns(), users());
    let handle = table.clone();
    let table = table.on_row_select(move |_rows: &[Record]| {
        *sink.lock().unwrap() = handle.selected_indices().len();
    });
    table.toggle_all();
    assert_eq!(*seen.lock().unwrap(), 3);
}

// ============================================================================
// Views
// ============================================================================

#[test]
fn test_header_indicators() {
    let table = Table::new(columns(), users());
    table.toggle_sort("age");
    let header = table.header();
    assert_eq!(header.len(), 3);
    assert_eq!(header[0].indicator, Some(SortIndicator::Unsorted));
    assert_eq!(header[1].indicator, None);
    assert_eq!(header[2].indicator, Some(SortIndicator::Ascending));
    assert_eq!(header[2].indicator.map(|i| i.glyph()), Some("▲"));
}

#[test]
fn test_select_header() {
    let table = Table::new(columns(), users());
    assert_eq!(table.select_header(), None);

    table.set_selectable(true);
    assert_eq!(table.select_header(), Some(SelectHeader::Checkbox { checked: false }));
    table.toggle_all();
    assert_eq!(table.select_header(), Some(SelectHeader::Checkbox { checked: true }));

    table.set_selection_mode(SelectionMode::Single);
    assert_eq!(table.select_header(), Some(SelectHeader::Label("Select")));
}

#[test]
fn test_body_states() {
    let table = Table::new(columns(), Vec::<Record>::new());
    assert_eq!(table.body(), TableBody::Empty);
    assert_eq!(table.body().placeholder(), Some("No data"));

    table.set_loading(true);
    assert_eq!(table.body(), TableBody::Loading);
    assert_eq!(table.body().placeholder(), Some("Loading…"));

    table.set_rows(users());
    assert_eq!(table.body(), TableBody::Loading);
    table.set_loading(false);
    assert!(matches!(table.body(), TableBody::Rows(rows) if rows.len() == 3));
}

#[test]
fn test_loading_still_accepts_mutations() {
    let table = Table::new(columns(), users()).with_config(TableConfig::new().loading(true));
    assert!(table.toggle_sort("age"));
    assert!(table.toggle_row(0));
    assert_eq!(ids(&table.selected_rows()), vec![2]);
}

#[test]
fn test_body_rows() {
    let table = Table::new(columns(), users())
        .with_config(TableConfig::new().selectable())
        .with_row_key(|row: &Record, _| {
            RowKey::Number(row.get("id").and_then(|v| v.as_number()).unwrap_or(0.0) as i64)
        });
    table.toggle_sort("age");
    table.toggle_row(1);

    let TableBody::Rows(rows) = table.body() else {
        panic!("expected rows");
    };
    assert_eq!(rows[0].key, RowKey::Number(2));
    assert_eq!(rows[0].cells, vec!["Rahul", "", "22"]);
    assert!(!rows[0].selected);
    assert!(rows[1].selected);
    assert_eq!(rows[1].control, Some(RowControl::Checkbox));
}

#[test]
fn test_default_row_key_is_index() {
    let table = Table::new(columns(), users());
    assert_eq!(table.row_key_at(2), Some(RowKey::Index(2)));
    assert_eq!(table.row_key_at(3), None);
}

#[test]
fn test_column_span() {
    let table = Table::new(columns(), users());
    assert_eq!(table.column_span(), 3);
    table.set_selectable(true);
    assert_eq!(table.column_span(), 4);
}

// ============================================================================
// Construction and configuration
// ============================================================================

#[test]
fn test_try_new_rejects_duplicate_keys() {
    let columns = vec![Column::new("age", "Age"), Column::new("age", "Years")];
    let err = Table::<Record>::try_new(columns, Vec::new()).unwrap_err();
    assert_eq!(err, TableError::DuplicateColumnKey("age".into()));
    assert_eq!(err.to_string(), "Duplicate column key 'age'");
}

#[test]
fn test_try_new_rejects_empty_key() {
    let columns = vec![Column::new("", "Age")];
    let err = Table::<Record>::try_new(columns, Vec::new()).unwrap_err();
    assert!(matches!(err, TableError::EmptyColumnKey { .. }));
}

#[test]
fn test_dirty_tracking() {
    let table = Table::new(columns(), users());
    assert!(!table.is_dirty());
    table.toggle_row(0);
    assert!(table.is_dirty());
    table.clear_dirty();
    assert!(!table.is_dirty());
    table.toggle_sort("age");
    assert!(table.is_dirty());
}

#[test]
fn test_config_from_json() {
    let config: TableConfig =
        serde_json::from_str(r#"{ "selectable": true, "selection_mode": "single" }"#).unwrap();
    assert_eq!(
        config,
        TableConfig::new()
            .selectable()
            .selection_mode(SelectionMode::Single)
    );

    let column: Column =
        serde_json::from_str(r#"{ "key": "age", "title": "Age", "field": "age" }"#).unwrap();
    assert!(!column.sortable);
}

#[test]
fn test_records_from_json() {
    let rows: Vec<Record> =
        serde_json::from_str(r#"[{ "id": 1, "name": "Ananya" }, { "id": 2, "age": 22 }]"#)
            .unwrap();
    assert_eq!(rows[0].get("name"), Some(&Value::from("Ananya")));
    assert_eq!(rows[1].get("age"), Some(&Value::from(22)));
}
