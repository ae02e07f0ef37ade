use serde_json::{json, Value};
use std::collections::BTreeMap;

use tripgrid::state::column::ColumnDescriptor;
use tripgrid::state::config::{FilterCase, GridConfig};
use tripgrid::state::data_model::Row;
use tripgrid::state::grid_state::{BodyState, GridState};
use tripgrid::state::pagination::Pagination;
use tripgrid::state::row_identity::RowId;
use tripgrid::state::sorting::{SortDirection, SortSpec};

fn row(value: Value) -> Row {
    serde_json::from_value(value).unwrap()
}

fn columns() -> Vec<ColumnDescriptor<Row>> {
    vec![
        ColumnDescriptor::field("name", "Name").always_visible(),
        ColumnDescriptor::field("group", "Group"),
        ColumnDescriptor::field("price", "Price"),
        ColumnDescriptor::field("notes", "Notes").unsortable(),
    ]
}

fn sample_state() -> GridState<Row> {
    GridState::new(
        vec![
            row(json!({"id": "a", "name": "Alice", "group": "x", "price": 30})),
            row(json!({"id": "b", "name": "Bob", "group": "y", "price": 25})),
            row(json!({"id": "c", "name": "Carol", "group": "x", "price": 40})),
            row(json!({"id": "d", "name": "Dave", "group": "y", "price": 25})),
        ],
        columns(),
        "id",
        &GridConfig::default(),
    )
}

fn visible_names(state: &GridState<Row>) -> Vec<String> {
    state
        .visible_rows()
        .into_iter()
        .map(|r| r["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

/// 25 rows whose canonical order is not their name order.
fn twenty_five() -> GridState<Row> {
    let rows = (0..25)
        .map(|i| {
            let rank = (i * 7) % 25 + 1;
            row(json!({"id": format!("r{i}"), "name": format!("Row {rank:02}")}))
        })
        .collect();
    GridState::new(rows, columns(), "id", &GridConfig::default())
}

#[test]
fn test_sort_is_stable_for_equal_keys() {
    let mut state = sample_state();
    state.set_sorting(vec![SortSpec::asc("group")]);
    assert_eq!(visible_names(&state), vec!["Alice", "Carol", "Bob", "Dave"]);

    state.set_sorting(vec![SortSpec::desc("group")]);
    assert_eq!(visible_names(&state), vec!["Bob", "Dave", "Alice", "Carol"]);
}

#[test]
fn test_sort_on_numeric_ties_keeps_canonical_order() {
    let mut state = sample_state();
    state.set_sorting(vec![SortSpec::asc("price")]);
    assert_eq!(visible_names(&state), vec!["Bob", "Dave", "Alice", "Carol"]);
}

#[test]
fn test_sorting_does_not_touch_canonical_rows() {
    let mut state = sample_state();
    let before = state.rows().to_vec();
    state.set_sorting(vec![SortSpec::desc("name")]);
    assert_eq!(visible_names(&state), vec!["Dave", "Carol", "Bob", "Alice"]);
    assert_eq!(state.rows(), before.as_slice());
}

#[test]
fn test_toggle_sort_cycles_asc_desc_none() {
    let mut state = sample_state();
    assert!(state.toggle_sort("name"));
    assert_eq!(
        state.sort_for("name").map(|spec| spec.direction),
        Some(SortDirection::Asc)
    );
    assert!(state.toggle_sort("name"));
    assert_eq!(
        state.sort_for("name").map(|spec| spec.direction),
        Some(SortDirection::Desc)
    );
    assert!(state.toggle_sort("name"));
    assert!(state.sorting().is_empty());

    assert!(state.toggle_sort("price"));
    assert!(state.toggle_sort("group"));
    assert_eq!(state.sorting(), &[SortSpec::asc("group")]);
}

#[test]
fn test_toggle_sort_ignores_unsortable_and_unknown_columns() {
    let mut state = sample_state();
    assert!(!state.toggle_sort("notes"));
    assert!(!state.toggle_sort("nope"));
    assert!(state.sorting().is_empty());
}

#[test]
fn test_sort_by_computed_column() {
    let mut cols = columns();
    cols.push(ColumnDescriptor::computed("len", "Length", |r: &Row| {
        json!(r["name"].as_str().map(str::len).unwrap_or(0))
    }));
    let mut state = GridState::new(sample_state().rows().to_vec(), cols, "id", &GridConfig::default());
    state.set_sorting(vec![SortSpec::asc("len")]);
    assert_eq!(visible_names(&state), vec!["Bob", "Dave", "Alice", "Carol"]);
}

#[test]
fn test_name_filter_is_case_insensitive_substring() {
    let mut state = sample_state();
    state.set_column_filter("name", Some("A".to_string()));
    assert_eq!(visible_names(&state), vec!["Alice", "Carol", "Dave"]);

    state.set_column_filter("name", None);
    assert_eq!(state.visible_rows().len(), 4);
}

#[test]
fn test_filter_case_sensitive_config() {
    let config = GridConfig {
        filter_case: FilterCase::Sensitive,
        ..GridConfig::default()
    };
    let mut state = GridState::new(sample_state().rows().to_vec(), columns(), "id", &config);
    state.set_column_filter("name", Some("a".to_string()));
    assert_eq!(visible_names(&state), vec!["Carol", "Dave"]);
}

#[test]
fn test_empty_filter_value_removes_entry() {
    let mut state = sample_state();
    state.set_column_filter("group", Some("x".to_string()));
    state.set_column_filter("name", Some(String::new()));
    assert_eq!(
        state.column_filters(),
        &BTreeMap::from([("group".to_string(), "x".to_string())])
    );
}

#[test]
fn test_body_state_distinguishes_no_data_from_no_matches() {
    let empty: GridState<Row> = GridState::new(Vec::new(), columns(), "id", &GridConfig::default());
    assert_eq!(empty.body_state(), BodyState::NoData);

    let mut state = sample_state();
    assert_eq!(state.body_state(), BodyState::Rows);
    state.set_column_filter("name", Some("zzz".to_string()));
    assert_eq!(state.body_state(), BodyState::NoMatches);
    assert!(state.visible_rows().is_empty());
}

#[test]
fn test_pagination_window_and_navigation() {
    let mut state = twenty_five();
    state.set_sorting(vec![SortSpec::asc("name")]);
    assert_eq!(state.page_count(), 3);
    assert_eq!(visible_names(&state).first().map(String::as_str), Some("Row 01"));

    state.next_page();
    assert_eq!(state.current_page_index(), 1);
    assert_eq!(visible_names(&state).first().map(String::as_str), Some("Row 11"));

    state.last_page();
    assert_eq!(state.current_page_index(), 2);
    assert_eq!(state.visible_rows().len(), 5);
    assert!(!state.can_next_page());

    state.next_page();
    assert_eq!(state.current_page_index(), 2);

    state.first_page();
    assert!(!state.can_previous_page());
}

#[test]
fn test_page_index_clamps_when_rows_shrink() {
    let mut state = twenty_five();
    state.last_page();
    assert_eq!(state.current_page_index(), 2);

    state.set_column_filter("name", Some("Row 0".to_string()));
    assert_eq!(state.current_page_index(), 0);
    assert_eq!(state.visible_rows().len(), 9);
    assert_eq!(state.pagination().page_index, 0);
}

#[test]
fn test_set_pagination_out_of_range_lands_on_last_page() {
    let mut state = twenty_five();
    state.set_pagination(Pagination {
        page_index: 9,
        page_size: 20,
    });
    assert_eq!(state.current_page_index(), 1);
    assert_eq!(state.visible_rows().len(), 5);
}

#[test]
fn test_page_size_change_keeps_top_row_in_view() {
    let mut state = twenty_five();
    state.set_page_size(5);
    state.set_page_index(3);
    state.set_page_size(10);
    assert_eq!(state.current_page_index(), 1);
}

#[test]
fn test_column_visibility_toggles_only_hideable_columns() {
    let mut state = sample_state();
    assert!(state.toggle_column_visibility("group"));
    assert!(!state.is_column_visible("group"));
    assert!(!state.toggle_column_visibility("name"));
    assert!(state.is_column_visible("name"));

    let visible: Vec<&str> = state.visible_columns().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(visible, vec!["name", "price", "notes"]);

    state.set_column_filter("group", Some("y".to_string()));
    assert_eq!(visible_names(&state), vec!["Bob", "Dave"]);
}

#[test]
fn test_sync_rows_with_same_identities_keeps_selection_and_visibility() {
    let mut state = sample_state();
    state.toggle_row(&RowId::from("b"), true);
    state.toggle_column_visibility("price");

    let mut reordered = state.rows().to_vec();
    reordered.reverse();
    assert!(!state.sync_rows(reordered.clone()));
    assert_eq!(state.rows(), reordered.as_slice());
    assert!(state.is_selected(&RowId::from("b")));
    assert!(!state.is_column_visible("price"));
}

#[test]
fn test_sync_rows_with_new_identities_resets_selection_and_visibility() {
    let mut state = sample_state();
    state.toggle_row(&RowId::from("b"), true);
    state.toggle_column_visibility("price");

    let mut rows = state.rows().to_vec();
    rows.push(row(json!({"id": "e", "name": "Eve"})));
    assert!(state.sync_rows(rows));
    assert_eq!(state.selected_count(), 0);
    assert!(state.is_column_visible("price"));
    assert_eq!(state.rows().len(), 5);
}

#[test]
fn test_set_column_filters_drops_empty_values() {
    let mut state = sample_state();
    state.set_column_filters(BTreeMap::from([
        ("group".to_string(), "y".to_string()),
        ("name".to_string(), String::new()),
    ]));

    assert_eq!(state.column_filters().len(), 1);
    assert_eq!(visible_names(&state), vec!["Bob", "Dave"]);
}

#[test]
fn test_clear_selection_and_cancel_search() {
    let mut state = sample_state();
    state.toggle_all_on_page(true);
    state.clear_selection();
    assert_eq!(state.selected_count(), 0);

    let now = std::time::Instant::now();
    state.search_input("Al", now);
    assert_eq!(state.search_deadline(), Some(now + state.search_delay()));
    assert!(state.cancel_search());
    assert_eq!(state.search_deadline(), None);
    assert_eq!(state.search_term(), "Al");
}

#[test]
fn test_set_columns_drops_state_of_removed_columns() {
    let mut state = sample_state();
    state.toggle_sort("price");
    state.toggle_column_visibility("price");
    state.toggle_column_visibility("notes");
    state.set_column_filter("group", Some("y".to_string()));
    assert!(!state.set_columns(columns()));

    let narrowed = vec![
        ColumnDescriptor::field("name", "Name").always_visible(),
        ColumnDescriptor::field("notes", "Notes").unsortable(),
    ];
    assert!(state.set_columns(narrowed));
    assert!(state.sorting().is_empty());
    assert!(state.column_filters().is_empty());
    assert_eq!(visible_names(&state), vec!["Alice", "Bob", "Carol", "Dave"]);
    assert!(!state.is_column_visible("notes"));

    assert!(state.set_columns(columns()));
    assert!(state.is_column_visible("price"));
}

#[test]
fn test_reconfigure_moves_search_and_applies_case_and_delay() {
    let mut state = sample_state();
    let now = std::time::Instant::now();
    state.search_input("x", now);
    assert!(state.flush_search(now + state.search_delay()));
    assert_eq!(state.filtered_count(), 0);

    let config = GridConfig {
        search_debounce_ms: 50,
        search_column: "group".to_string(),
        filter_case: FilterCase::Sensitive,
        ..GridConfig::default()
    };
    assert!(state.reconfigure(&config));
    assert!(!state.reconfigure(&config));
    assert_eq!(state.search_delay(), std::time::Duration::from_millis(50));
    assert_eq!(state.search_column(), "group");
    assert_eq!(visible_names(&state), vec!["Alice", "Carol"]);

    let later = now + std::time::Duration::from_secs(1);
    state.search_input("X", later);
    assert_eq!(
        state.search_deadline(),
        Some(later + std::time::Duration::from_millis(50))
    );
    assert!(state.flush_search(later + state.search_delay()));
    assert_eq!(state.body_state(), BodyState::NoMatches);

    assert!(state.reconfigure(&GridConfig {
        filter_case: FilterCase::Insensitive,
        ..config
    }));
    assert_eq!(visible_names(&state), vec!["Alice", "Carol"]);
}
