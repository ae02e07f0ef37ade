use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use dioxus::prelude::*;

use crate::state::column::ColumnDescriptor;
use crate::state::config::GridConfig;
use crate::state::data_model::GridRow;
use crate::state::drag::RowRect;
use crate::state::grid_state::{BodyState, GridState};
use crate::state::i18n::{self, Language};
use crate::state::row_identity::RowId;
use crate::ui::{pagination, table, toolbar};

#[derive(Props, Clone, PartialEq)]
pub struct DataGridProps<T: GridRow> {
    pub rows: Vec<T>,
    pub columns: Vec<ColumnDescriptor<T>>,
    #[props(into)]
    pub row_id_key: String,
    /// Changes after mount are applied to the live grid, except
    /// `initial_page_size`.
    #[props(default)]
    pub config: GridConfig,
    /// Search text typed into the box on mount, debounced like user input.
    pub initial_search: Option<String>,
    /// Called once per committed drag with the full canonical row order.
    pub on_reorder: Option<EventHandler<Vec<T>>>,
    /// Called with the search term each time the debounced filter is applied.
    pub on_search: Option<EventHandler<String>>,
    pub on_add_new: Option<EventHandler<()>>,
    pub add_new_href: Option<String>,
    /// Shown instead of the table when `rows` is empty.
    pub empty_state: Option<Element>,
}

/// Everything the toolbar, table and footer need to wire their events.
#[derive(Clone)]
pub(crate) struct GridHandles<T: GridRow> {
    pub state: Signal<GridState<T>>,
    pub language: Language,
    pub config: GridConfig,
    pub on_reorder: Option<EventHandler<Vec<T>>>,
    pub on_search: Option<EventHandler<String>>,
    pub search_task: Rc<Cell<Option<Task>>>,
    pub row_mounts: Rc<RefCell<HashMap<RowId, Rc<MountedData>>>>,
    pub row_rects: Rc<RefCell<Vec<RowRect>>>,
}

impl<T: GridRow> GridHandles<T> {
    /// Echoes the keystroke and restarts the debounce timer task.
    ///
    /// Timestamps come from the tokio clock, which the timer task sleeps on.
    pub fn search_input(&self, text: String) {
        let mut state = self.state;
        let delay = {
            let mut write = state.write();
            write.search_input(text, tokio::time::Instant::now().into_std());
            write.search_delay()
        };

        if let Some(pending) = self.search_task.take() {
            pending.cancel();
        }
        let slot = Rc::clone(&self.search_task);
        let on_search = self.on_search;
        let task = spawn(async move {
            tokio::time::sleep(delay).await;
            slot.set(None);
            let applied = {
                let mut write = state.write();
                write
                    .flush_search(tokio::time::Instant::now().into_std())
                    .then(|| write.search_term().to_string())
            };
            if let (Some(term), Some(on_search)) = (applied, on_search) {
                on_search.call(term);
            }
        });
        self.search_task.set(Some(task));
    }

    /// Drops the dragged row and notifies the caller if the order changed.
    pub fn commit_drag(&self) {
        let mut state = self.state;
        let reordered = state.write().end_drag();
        if let (Some(rows), Some(on_reorder)) = (reordered, self.on_reorder.as_ref()) {
            on_reorder.call(rows);
        }
    }
}

/// Generic interactive data grid: search, column menu, sortable headers,
/// row selection, drag reordering and pagination over caller-supplied rows.
#[allow(non_snake_case)]
pub fn DataGrid<T: GridRow>(props: DataGridProps<T>) -> Element {
    let config = props.config.clone();
    let mut state = use_signal(|| {
        GridState::new(
            props.rows.clone(),
            props.columns.clone(),
            props.row_id_key.clone(),
            &config,
        )
    });
    let search_task = use_hook(|| Rc::new(Cell::new(None::<Task>)));
    let row_mounts = use_hook(|| Rc::new(RefCell::new(HashMap::new())));
    let row_rects = use_hook(|| Rc::new(RefCell::new(Vec::new())));
    let language = try_use_context::<Signal<Language>>()
        .map(|language| *language.read())
        .unwrap_or_default();

    // Caller data flows in after mount; peek first so an unchanged prop
    // does not dirty the grid.
    use_effect(use_reactive((&props.rows,), move |(rows,)| {
        if state.peek().rows() != rows.as_slice() {
            state.write().sync_rows(rows);
        }
    }));
    use_effect(use_reactive((&props.columns,), move |(columns,)| {
        if state.peek().columns() != columns.as_slice() {
            state.write().set_columns(columns);
        }
    }));
    use_effect(use_reactive((&props.config,), move |(config,)| {
        if *state.peek().config() != config {
            state.write().reconfigure(&config);
        }
    }));

    use_drop({
        let search_task = Rc::clone(&search_task);
        move || {
            if let Some(pending) = search_task.take() {
                pending.cancel();
            }
            if let Ok(mut state) = state.try_write() {
                state.teardown();
            }
        }
    });

    let grid = GridHandles {
        state,
        language,
        config,
        on_reorder: props.on_reorder,
        on_search: props.on_search,
        search_task,
        row_mounts,
        row_rects,
    };

    // Reads nothing reactive, so it runs once after the first render.
    use_effect({
        let grid = grid.clone();
        let initial = props.initial_search.clone();
        move || {
            if let Some(text) = initial.clone().filter(|text| !text.is_empty()) {
                grid.search_input(text);
            }
        }
    });

    let body_state = state.read().body_state();
    let toolbar = toolbar::render_toolbar(&grid, props.on_add_new, props.add_new_href.clone());

    if body_state == BodyState::NoData {
        let no_data_label = i18n::tr(language, "grid.no_data");
        let placeholder = match props.empty_state.clone() {
            Some(content) => content,
            None => rsx! {
                p { class: "grid-empty", id: "grid-empty", "{no_data_label}" }
            },
        };
        return rsx! {
            div { class: "data-grid",
                {toolbar}
                {placeholder}
            }
        };
    }

    rsx! {
        div { class: "data-grid",
            {toolbar}
            {table::render_table(&grid)}
            {pagination::render_footer(&grid)}
        }
    }
}
