use serde_json::{json, Value};

use tripgrid::state::column::ColumnDescriptor;
use tripgrid::state::config::GridConfig;
use tripgrid::state::data_model::Row;
use tripgrid::state::drag::{self, DragInput, DragState, MoveDirection, RowRect};
use tripgrid::state::grid_state::GridState;
use tripgrid::state::row_identity::RowId;
use tripgrid::state::sorting::SortSpec;

fn row(value: Value) -> Row {
    serde_json::from_value(value).unwrap()
}

fn sample_rows() -> Vec<Row> {
    ["Lombok", "Bali", "Flores", "Java", "Sumba", "Bintan"]
        .iter()
        .enumerate()
        .map(|(i, name)| row(json!({"id": i + 1, "name": name})))
        .collect()
}

fn sample_state() -> GridState<Row> {
    GridState::new(
        sample_rows(),
        vec![ColumnDescriptor::field("name", "Name")],
        "id",
        &GridConfig::default(),
    )
}

fn id(value: &str) -> RowId {
    RowId::from(value)
}

fn names(rows: &[Row]) -> Vec<&str> {
    rows.iter()
        .map(|r| r["name"].as_str().unwrap_or_default())
        .collect()
}

fn rects(ids: &[&str]) -> Vec<RowRect> {
    ids.iter()
        .enumerate()
        .map(|(i, value)| RowRect {
            id: id(value),
            top: 100.0 + i as f64 * 30.0,
            height: 30.0,
        })
        .collect()
}

#[test]
fn test_array_move_matches_remove_then_insert() {
    assert_eq!(drag::array_move(vec![1, 2, 3, 4], 0, 2), vec![2, 3, 1, 4]);
    assert_eq!(drag::array_move(vec![1, 2, 3, 4], 3, 1), vec![1, 4, 2, 3]);
    assert_eq!(drag::array_move(vec![1, 2, 3], 1, 9), vec![1, 2, 3]);
}

#[test]
fn test_closest_center_picks_nearest_row_within_span() {
    let rects = rects(&["1", "2", "3"]);
    assert_eq!(drag::closest_center(101.0, &rects), Some(&id("1")));
    assert_eq!(drag::closest_center(146.0, &rects), Some(&id("2")));
    assert_eq!(drag::closest_center(189.0, &rects), Some(&id("3")));
    assert_eq!(drag::closest_center(99.0, &rects), None);
    assert_eq!(drag::closest_center(191.0, &rects), None);
    assert_eq!(drag::closest_center(120.0, &[]), None);
}

#[test]
fn test_pointer_drag_commits_once_with_full_order() {
    let mut state = sample_state();
    assert!(state.begin_drag(&id("1"), DragInput::Pointer));
    assert_eq!(state.dragging_row(), Some(&id("1")));

    let layout = rects(&["1", "2", "3", "4", "5", "6"]);
    state.drag_pointer_move(130.0, &layout);
    state.drag_pointer_move(175.0, &layout);
    assert_eq!(state.drop_target(), Some(&id("3")));
    assert_eq!(names(state.rows())[0], "Lombok");

    let reordered = state.end_drag().expect("drop on another row reorders");
    assert_eq!(
        names(&reordered),
        vec!["Bali", "Flores", "Lombok", "Java", "Sumba", "Bintan"]
    );
    assert_eq!(state.rows(), reordered.as_slice());
    assert_eq!(state.drag_state(), &DragState::Idle);
    assert_eq!(state.end_drag(), None);
}

#[test]
fn test_drop_on_self_emits_nothing() {
    let mut state = sample_state();
    state.begin_drag(&id("2"), DragInput::Pointer);
    state.drag_hover(Some(id("2")));
    assert_eq!(state.end_drag(), None);
    assert_eq!(state.rows(), sample_rows().as_slice());
}

#[test]
fn test_release_outside_rows_cancels() {
    let mut state = sample_state();
    state.begin_drag(&id("2"), DragInput::Pointer);
    let layout = rects(&["1", "2", "3"]);
    state.drag_pointer_move(130.0, &layout);
    state.drag_pointer_move(400.0, &layout);
    assert_eq!(state.drop_target(), None);
    assert_eq!(state.end_drag(), None);
    assert_eq!(state.rows(), sample_rows().as_slice());
}

#[test]
fn test_cancel_returns_to_idle_without_change() {
    let mut state = sample_state();
    state.begin_drag(&id("4"), DragInput::Pointer);
    state.drag_hover(Some(id("1")));
    assert!(state.cancel_drag());
    assert_eq!(state.drag_state(), &DragState::Idle);
    assert_eq!(state.end_drag(), None);
    assert_eq!(state.rows(), sample_rows().as_slice());
}

#[test]
fn test_teardown_mid_drag_emits_nothing() {
    let mut state = sample_state();
    state.begin_drag(&id("1"), DragInput::Pointer);
    state.drag_hover(Some(id("5")));
    state.teardown();
    assert_eq!(state.end_drag(), None);
    assert_eq!(state.rows(), sample_rows().as_slice());
}

#[test]
fn test_reorder_under_filter_uses_canonical_indices() {
    let mut state = sample_state();
    state.set_column_filter("name", Some("i".to_string()));
    let visible: Vec<RowId> = state.page_row_ids();
    assert_eq!(visible, vec![id("2"), id("6")]);

    state.begin_drag(&id("6"), DragInput::Pointer);
    state.drag_hover(Some(id("2")));
    let reordered = state.end_drag().expect("reorder");

    let expected = drag::array_move(sample_rows(), 5, 1);
    assert_eq!(reordered, expected);
    assert_eq!(
        names(&reordered),
        vec!["Lombok", "Bintan", "Bali", "Flores", "Java", "Sumba"]
    );
    assert_eq!(state.page_row_ids(), vec![id("6"), id("2")]);
}

#[test]
fn test_pointer_drag_ignores_rects_of_rows_off_the_page() {
    let mut state = sample_state();
    // Measured before the filter hid rows 1, 3 and 4.
    let stale = rects(&["1", "3", "4"]);
    state.set_column_filter("name", Some("i".to_string()));

    state.begin_drag(&id("6"), DragInput::Pointer);
    state.drag_pointer_move(145.0, &stale);
    assert_eq!(state.drop_target(), None);
    assert_eq!(state.end_drag(), None);
    assert_eq!(state.rows(), sample_rows().as_slice());
}

#[test]
fn test_pointer_drag_before_measurement_has_no_target() {
    let mut state = sample_state();
    state.begin_drag(&id("1"), DragInput::Pointer);
    state.drag_pointer_move(145.0, &[]);
    assert_eq!(state.drop_target(), None);
    assert_eq!(state.end_drag(), None);

    // A second gesture measured against the live page still targets rows.
    state.begin_drag(&id("1"), DragInput::Pointer);
    state.drag_pointer_move(145.0, &rects(&["1", "2", "3"]));
    assert_eq!(state.drop_target(), Some(&id("2")));
}

#[test]
fn test_keyboard_drag_moves_through_visible_order() {
    let mut state = sample_state();
    state.set_sorting(vec![SortSpec::asc("name")]);
    // Bali(2), Bintan(6), Flores(3), Java(4), Lombok(1), Sumba(5)
    state.begin_drag(&id("6"), DragInput::Keyboard);
    assert_eq!(state.drop_target(), Some(&id("6")));

    state.drag_step(MoveDirection::Down);
    state.drag_step(MoveDirection::Down);
    assert_eq!(state.drop_target(), Some(&id("4")));
    state.drag_step(MoveDirection::Up);
    assert_eq!(state.drop_target(), Some(&id("3")));

    let reordered = state.end_drag().expect("reorder");
    assert_eq!(reordered, drag::array_move(sample_rows(), 5, 2));
}

#[test]
fn test_keyboard_step_stops_at_page_edges() {
    let mut state = sample_state();
    state.begin_drag(&id("1"), DragInput::Keyboard);
    state.drag_step(MoveDirection::Up);
    assert_eq!(state.drop_target(), Some(&id("1")));
    assert_eq!(state.end_drag(), None);
}

#[test]
fn test_begin_drag_on_unknown_row_is_ignored() {
    let mut state = sample_state();
    assert!(!state.begin_drag(&id("99"), DragInput::Pointer));
    assert_eq!(state.drag_state(), &DragState::Idle);
}

#[test]
fn test_fallback_identities_recomputed_after_reorder() {
    let rows = vec![
        row(json!({"name": "A"})),
        row(json!({"name": "B"})),
        row(json!({"name": "C"})),
    ];
    let mut state = GridState::new(
        rows,
        vec![ColumnDescriptor::field("name", "Name")],
        "id",
        &GridConfig::default(),
    );
    state.begin_drag(&id("fallback-0"), DragInput::Pointer);
    state.drag_hover(Some(id("fallback-2")));
    let reordered = state.end_drag().expect("reorder");

    assert_eq!(names(&reordered), vec!["B", "C", "A"]);
    assert_eq!(
        state.row_ids(),
        &[id("fallback-0"), id("fallback-1"), id("fallback-2")]
    );
}
