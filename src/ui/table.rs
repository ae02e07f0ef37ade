use std::collections::HashMap;
use std::rc::Rc;

use dioxus::prelude::{Key, *};

use crate::state::column::ColumnDescriptor;
use crate::state::data_model::GridRow;
use crate::state::drag::{DragInput, DragState, MoveDirection, RowRect};
use crate::state::grid_state::BodyState;
use crate::state::i18n;
use crate::state::row_identity::RowId;
use crate::state::selection::CheckState;
use crate::state::sorting::{SortDirection, SortSpec};
use crate::ui::grid::GridHandles;

struct RowView {
    id: RowId,
    /// Reconciliation key: the row id, suffixed when an id repeats on the page.
    key: String,
    dom_id: String,
    class: String,
    selected: bool,
    cells: Vec<(String, Element)>,
}

/// Header row, then either the page rows or the "no rows match" body.
pub(crate) fn render_table<T: GridRow>(grid: &GridHandles<T>) -> Element {
    let mut state = grid.state;
    let language = grid.language;

    let snapshot = state.read();
    let columns: Vec<ColumnDescriptor<T>> =
        snapshot.visible_columns().into_iter().cloned().collect();
    let sorting = snapshot.sorting().to_vec();
    let check_state = snapshot.page_check_state();
    let body_state = snapshot.body_state();
    let dragging = snapshot.dragging_row().cloned();
    let drop_target = snapshot.drop_target().cloned();
    let pointer_drag = matches!(
        snapshot.drag_state(),
        DragState::Dragging(session) if session.input == DragInput::Pointer
    );
    let mut occurrences: HashMap<RowId, usize> = HashMap::new();
    let rows: Vec<RowView> = snapshot
        .visible_row_indices()
        .into_iter()
        .enumerate()
        .map(|(display_index, idx)| {
            let id = snapshot.row_ids()[idx].clone();
            let seen = occurrences.entry(id.clone()).or_default();
            let key = match *seen {
                0 => id.to_string(),
                n => format!("{id}#{n}"),
            };
            *seen += 1;

            let selected = snapshot.is_selected(&id);
            let row = &snapshot.rows()[idx];
            RowView {
                key,
                dom_id: sanitize_id(id.as_str()),
                class: row_class(
                    display_index,
                    selected,
                    dragging.as_ref() == Some(&id),
                    drop_target.as_ref() == Some(&id),
                ),
                selected,
                cells: render_cells(&columns, row),
                id,
            }
        })
        .collect();
    drop(snapshot);

    // Rows that left the page are remounted, and re-registered, when they come back.
    grid.row_mounts
        .borrow_mut()
        .retain(|id, _| occurrences.contains_key(id));

    let no_matches_label = i18n::tr(language, "grid.no_matches");
    let select_all_label = i18n::tr(language, "grid.select_all");
    let select_row_label = i18n::tr(language, "grid.select_row");
    let handle_label = i18n::tr(language, "grid.drag_handle");
    let span = columns.len() + 2;
    let all_checked = check_state == CheckState::Checked;
    let row_rects = Rc::clone(&grid.row_rects);
    let commit_grid = grid.clone();

    rsx! {
        div {
            class: "table-container",
            id: "grid-table-container",
            onpointerup: move |_| {
                if pointer_drag {
                    commit_grid.commit_drag();
                }
            },
            onpointerleave: move |_| {
                if pointer_drag {
                    state.write().cancel_drag();
                }
            },
            table {
                thead {
                    tr {
                        th { class: "select-cell",
                            input {
                                r#type: "checkbox",
                                id: "grid-select-all",
                                class: check_state_class(check_state),
                                "aria-label": "{select_all_label}",
                                "aria-checked": check_state_aria(check_state),
                                checked: all_checked,
                                onchange: move |_| {
                                    state.write().toggle_all_on_page(!all_checked);
                                }
                            }
                        }
                        th { class: "handle-cell" }
                        for col in columns.iter() {
                            {render_header(grid, col, &sorting)}
                        }
                    }
                }
                tbody {
                    onpointermove: move |evt: PointerEvent| {
                        if pointer_drag {
                            let y = evt.client_coordinates().y;
                            state.write().drag_pointer_move(y, &row_rects.borrow());
                        }
                    },
                    onpointerleave: move |_| {
                        if pointer_drag {
                            state.write().drag_hover(None);
                        }
                    },
                    if body_state == BodyState::NoMatches {
                        tr { class: "no-matches-row",
                            td { id: "grid-no-matches", colspan: "{span}", "{no_matches_label}" }
                        }
                    }
                    for view in rows {
                        tr {
                            key: "{view.key}",
                            class: "{view.class}",
                            id: "row-{view.dom_id}",
                            onmounted: {
                                let mounts = Rc::clone(&grid.row_mounts);
                                let id = view.id.clone();
                                move |evt: MountedEvent| {
                                    mounts.borrow_mut().insert(id.clone(), evt.data());
                                }
                            },
                            td { class: "select-cell",
                                input {
                                    r#type: "checkbox",
                                    id: "select-{view.dom_id}",
                                    "aria-label": "{select_row_label}",
                                    checked: view.selected,
                                    onchange: {
                                        let id = view.id.clone();
                                        let selected = view.selected;
                                        move |_| {
                                            state.write().toggle_row(&id, !selected);
                                        }
                                    }
                                }
                            }
                            td { class: "handle-cell",
                                button {
                                    class: "drag-handle",
                                    id: "handle-{view.dom_id}",
                                    title: "{handle_label}",
                                    "aria-label": "{handle_label}",
                                    onpointerdown: {
                                        let grid = grid.clone();
                                        let id = view.id.clone();
                                        move |evt: PointerEvent| {
                                            evt.prevent_default();
                                            begin_pointer_drag(&grid, &id);
                                        }
                                    },
                                    onkeydown: {
                                        let grid = grid.clone();
                                        let id = view.id.clone();
                                        move |evt: KeyboardEvent| {
                                            if handle_drag_key(&grid, &id, evt.key()) {
                                                evt.prevent_default();
                                            }
                                        }
                                    },
                                    "\u{2807}"
                                }
                            }
                            for (col_id, content) in view.cells {
                                td { key: "{col_id}", class: "cell", {content} }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_header<T: GridRow>(
    grid: &GridHandles<T>,
    col: &ColumnDescriptor<T>,
    sorting: &[SortSpec],
) -> Element {
    let mut state = grid.state;
    let direction = sorting
        .iter()
        .find(|spec| spec.column == col.id)
        .map(|spec| spec.direction);
    let sortable = col.sortable;
    let column_id = col.id.clone();
    let aria_sort = match direction {
        Some(SortDirection::Asc) => "ascending",
        Some(SortDirection::Desc) => "descending",
        None => "none",
    };

    rsx! {
        th {
            key: "{col.id}",
            class: header_class(sortable, direction),
            id: format!("col-{}", sanitize_id(&col.id)),
            "aria-sort": aria_sort,
            onclick: move |_| {
                if sortable {
                    state.write().toggle_sort(&column_id);
                }
            },
            "{col.header}"
        }
    }
}

fn render_cells<T: GridRow>(columns: &[ColumnDescriptor<T>], row: &T) -> Vec<(String, Element)> {
    columns
        .iter()
        .map(|col| {
            let content = match col.cell.as_ref() {
                Some(render) => render(row),
                None => {
                    let text = col.display(row);
                    rsx! { "{text}" }
                }
            };
            (col.id.clone(), content)
        })
        .collect()
}

fn row_class(display_index: usize, selected: bool, dragging: bool, drop_target: bool) -> String {
    let mut class = if display_index % 2 == 0 { "even" } else { "odd" }.to_string();
    if selected {
        class.push_str(" selected-row");
    }
    if dragging {
        class.push_str(" dragging");
    } else if drop_target {
        class.push_str(" drop-target");
    }
    class
}

/// Starts a pointer drag and measures the rendered rows of the current page
/// for closest-center targeting. Until the measurement lands there is no
/// drop target.
fn begin_pointer_drag<T: GridRow>(grid: &GridHandles<T>, id: &RowId) {
    let mut state = grid.state;
    grid.row_rects.borrow_mut().clear();
    if !state.write().begin_drag(id, DragInput::Pointer) {
        return;
    }

    let order = state.read().page_row_ids();
    let mounted: Vec<(RowId, Rc<MountedData>)> = {
        let mounts = grid.row_mounts.borrow();
        order
            .into_iter()
            .filter_map(|id| mounts.get(&id).map(|data| (id, Rc::clone(data))))
            .collect()
    };
    let row_rects = Rc::clone(&grid.row_rects);
    let active = id.clone();
    spawn(async move {
        let mut rects = Vec::with_capacity(mounted.len());
        for (id, data) in mounted {
            if let Ok(rect) = data.get_client_rect().await {
                rects.push(RowRect {
                    id,
                    top: rect.origin.y,
                    height: rect.size.height,
                });
            }
        }
        // A later gesture owns the rects now.
        if state.peek().dragging_row() == Some(&active) {
            *row_rects.borrow_mut() = rects;
        }
    });
}

/// Keyboard reordering on a focused handle. Returns true if the key was used.
fn handle_drag_key<T: GridRow>(grid: &GridHandles<T>, id: &RowId, key: Key) -> bool {
    let mut state = grid.state;
    let keyboard_drag = matches!(
        state.read().drag_state(),
        DragState::Dragging(session) if session.input == DragInput::Keyboard
    );

    match key {
        Key::Enter => {}
        Key::Character(ref c) if c == " " => {}
        Key::ArrowUp if keyboard_drag => {
            state.write().drag_step(MoveDirection::Up);
            return true;
        }
        Key::ArrowDown if keyboard_drag => {
            state.write().drag_step(MoveDirection::Down);
            return true;
        }
        Key::Escape if keyboard_drag => {
            state.write().cancel_drag();
            return true;
        }
        _ => return false,
    }

    if keyboard_drag {
        grid.commit_drag();
    } else {
        state.write().begin_drag(id, DragInput::Keyboard);
    }
    true
}

fn header_class(sortable: bool, direction: Option<SortDirection>) -> String {
    let sortable_class = if sortable { "sortable" } else { "" };
    let sort_class = match direction {
        Some(SortDirection::Asc) => "sorted-asc",
        Some(SortDirection::Desc) => "sorted-desc",
        None => "",
    };
    join_classes(sortable_class, sort_class)
}

fn check_state_class(check_state: CheckState) -> &'static str {
    match check_state {
        CheckState::Checked => "check-all checked",
        CheckState::Indeterminate => "check-all indeterminate",
        CheckState::Unchecked => "check-all",
    }
}

fn check_state_aria(check_state: CheckState) -> &'static str {
    match check_state {
        CheckState::Checked => "true",
        CheckState::Indeterminate => "mixed",
        CheckState::Unchecked => "false",
    }
}

fn join_classes(a: &str, b: &str) -> String {
    if a.is_empty() {
        return b.to_string();
    }
    if b.is_empty() {
        return a.to_string();
    }
    format!("{a} {b}")
}

pub(crate) fn sanitize_id(value: &str) -> String {
    value
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect()
}
