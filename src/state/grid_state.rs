use std::collections::{BTreeMap, HashSet};
use std::time::{Duration, Instant};

use log::{debug, trace};
use serde_json::Value;

use crate::state::column::ColumnDescriptor;
use crate::state::config::GridConfig;
use crate::state::data_model::{self, GridRow};
use crate::state::debounce::SearchDebouncer;
use crate::state::drag::{self, DragController, DragInput, DragState, MoveDirection, RowRect};
use crate::state::pagination::Pagination;
use crate::state::row_identity::{self, RowId};
use crate::state::selection::{CheckState, SelectionTracker};
use crate::state::sorting::{self, SortSpec};

/// What the table body should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyState {
    /// The caller supplied no rows at all.
    NoData,
    /// Rows exist but the active filters hide all of them.
    NoMatches,
    Rows,
}

/// All state owned by one grid instance.
///
/// `local_rows` is the canonical order. Sorting, filtering and pagination only
/// derive a visible window from it; drag reordering is the only thing that
/// rewrites it, and never adds or drops rows.
pub struct GridState<T: GridRow> {
    columns: Vec<ColumnDescriptor<T>>,
    row_id_key: String,
    local_rows: Vec<T>,
    row_ids: Vec<RowId>,
    sorting: Vec<SortSpec>,
    column_filters: BTreeMap<String, String>,
    column_visibility: BTreeMap<String, bool>,
    pagination: Pagination,
    selection: SelectionTracker,
    search: SearchDebouncer,
    drag: DragController,
    config: GridConfig,
}

impl<T: GridRow> GridState<T> {
    pub fn new(
        rows: Vec<T>,
        columns: Vec<ColumnDescriptor<T>>,
        row_id_key: impl Into<String>,
        config: &GridConfig,
    ) -> Self {
        let row_id_key = row_id_key.into();
        let row_ids = row_identity::resolve_ids(&rows, &row_id_key);
        Self {
            columns,
            row_id_key,
            local_rows: rows,
            row_ids,
            sorting: Vec::new(),
            column_filters: BTreeMap::new(),
            column_visibility: BTreeMap::new(),
            pagination: Pagination::new(config.initial_page_size),
            selection: SelectionTracker::new(),
            search: SearchDebouncer::new(config.search_delay()),
            drag: DragController::new(),
            config: config.clone(),
        }
    }

    pub fn rows(&self) -> &[T] {
        &self.local_rows
    }

    pub fn row_ids(&self) -> &[RowId] {
        &self.row_ids
    }

    pub fn row_id_key(&self) -> &str {
        &self.row_id_key
    }

    pub fn columns(&self) -> &[ColumnDescriptor<T>] {
        &self.columns
    }

    pub fn column(&self, id: &str) -> Option<&ColumnDescriptor<T>> {
        self.columns.iter().find(|col| col.id == id)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Swaps in a new column set. Sorts, filters and visibility entries that
    /// name a column no longer present are dropped.
    pub fn set_columns(&mut self, columns: Vec<ColumnDescriptor<T>>) -> bool {
        if columns == self.columns {
            return false;
        }
        self.columns = columns;

        let known: HashSet<String> = self.columns.iter().map(|col| col.id.clone()).collect();
        self.sorting.retain(|spec| known.contains(&spec.column));
        self.column_visibility.retain(|id, _| known.contains(id));
        let search_column = &self.config.search_column;
        self.column_filters
            .retain(|id, _| known.contains(id) || id == search_column);
        debug!("grid columns replaced: {} columns", self.columns.len());
        true
    }

    /// Applies a changed config to a live grid. The initial page size only
    /// matters at construction and is not re-applied.
    pub fn reconfigure(&mut self, config: &GridConfig) -> bool {
        if *config == self.config {
            return false;
        }
        self.search.set_delay(config.search_delay());
        if config.search_column != self.config.search_column {
            let term = self.column_filters.remove(&self.config.search_column);
            if let Some(term) = term {
                self.column_filters.insert(config.search_column.clone(), term);
            }
        }
        self.config = config.clone();
        debug!("grid config updated: {:?}", self.config);
        true
    }

    pub fn row_by_id(&self, id: &RowId) -> Option<&T> {
        let pos = self.row_ids.iter().position(|row_id| row_id == id)?;
        self.local_rows.get(pos)
    }

    /// Copies a new caller array in. When the set of identities changed,
    /// selection and column visibility start over. Returns true in that case.
    pub fn sync_rows(&mut self, rows: Vec<T>) -> bool {
        if rows == self.local_rows {
            return false;
        }

        let ids = row_identity::resolve_ids(&rows, &self.row_id_key);
        let before: HashSet<&RowId> = self.row_ids.iter().collect();
        let after: HashSet<&RowId> = ids.iter().collect();
        let structural = before != after;

        if structural {
            debug!(
                "grid rows replaced: {} -> {} rows, selection reset",
                self.local_rows.len(),
                rows.len()
            );
            self.selection.clear();
            self.column_visibility.clear();
            self.drag.cancel();
        } else {
            trace!("grid rows re-supplied with the same identities");
        }

        self.local_rows = rows;
        self.row_ids = ids;
        structural
    }

    // Sorting

    pub fn sorting(&self) -> &[SortSpec] {
        &self.sorting
    }

    pub fn set_sorting(&mut self, sorting: Vec<SortSpec>) {
        debug!("grid sorting set to {:?}", sorting);
        self.sorting = sorting;
    }

    /// Header click on `column`. Returns false for unknown or unsortable columns.
    pub fn toggle_sort(&mut self, column: &str) -> bool {
        if !self.column(column).is_some_and(|col| col.sortable) {
            return false;
        }
        let next = sorting::next_sort(&self.sorting, column);
        self.set_sorting(next);
        true
    }

    pub fn sort_for(&self, column: &str) -> Option<&SortSpec> {
        self.sorting.iter().find(|spec| spec.column == column)
    }

    // Filtering

    pub fn column_filters(&self) -> &BTreeMap<String, String> {
        &self.column_filters
    }

    pub fn set_column_filters(&mut self, filters: BTreeMap<String, String>) {
        self.column_filters = filters
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .collect();
        debug!("grid filters set to {:?}", self.column_filters);
    }

    /// Sets or clears one filter. An empty value removes the entry.
    pub fn set_column_filter(&mut self, column: &str, value: Option<String>) {
        match value.filter(|v| !v.is_empty()) {
            Some(value) => {
                self.column_filters.insert(column.to_string(), value);
            }
            None => {
                self.column_filters.remove(column);
            }
        }
        debug!("grid filters set to {:?}", self.column_filters);
    }

    // Search

    pub fn search_term(&self) -> &str {
        self.search.term()
    }

    pub fn search_column(&self) -> &str {
        &self.config.search_column
    }

    pub fn search_delay(&self) -> Duration {
        self.search.delay()
    }

    pub fn search_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Echoes the typed text now and schedules the filter update.
    pub fn search_input(&mut self, text: impl Into<String>, now: Instant) -> Instant {
        self.search.input(text, now)
    }

    /// Applies the pending search if its quiet period has elapsed.
    pub fn flush_search(&mut self, now: Instant) -> bool {
        let Some(term) = self.search.poll(now) else {
            return false;
        };
        let column = self.config.search_column.clone();
        self.set_column_filter(&column, Some(term));
        true
    }

    pub fn cancel_search(&mut self) -> bool {
        self.search.cancel()
    }

    // Visible window

    fn column_value(&self, row: &T, column: &str) -> Option<Value> {
        match self.column(column) {
            Some(col) => col.value(row),
            None => row.field(column),
        }
    }

    fn row_matches_filters(&self, row: &T) -> bool {
        self.column_filters.iter().all(|(column, needle)| {
            if needle.is_empty() {
                return true;
            }
            self.column_value(row, column)
                .map(|value| {
                    self.config
                        .filter_case
                        .matches(&data_model::cell_text(&value), needle)
                })
                .unwrap_or(false)
        })
    }

    /// Canonical indices of every row passing the filters, in sorted order.
    pub fn filtered_sorted_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .local_rows
            .iter()
            .enumerate()
            .filter_map(|(idx, row)| self.row_matches_filters(row).then_some(idx))
            .collect();
        sorting::sort_indices(&mut indices, &self.sorting, |idx, spec| {
            self.column_value(&self.local_rows[idx], &spec.column)
        });
        indices
    }

    pub fn filtered_count(&self) -> usize {
        self.local_rows
            .iter()
            .filter(|row| self.row_matches_filters(row))
            .count()
    }

    /// Canonical indices of the rows on the current page.
    pub fn visible_row_indices(&self) -> Vec<usize> {
        let all = self.filtered_sorted_indices();
        let window = self.pagination.window(all.len());
        all[window].to_vec()
    }

    pub fn visible_rows(&self) -> Vec<&T> {
        self.visible_row_indices()
            .into_iter()
            .map(|idx| &self.local_rows[idx])
            .collect()
    }

    pub fn page_row_ids(&self) -> Vec<RowId> {
        self.visible_row_indices()
            .into_iter()
            .map(|idx| self.row_ids[idx].clone())
            .collect()
    }

    pub fn body_state(&self) -> BodyState {
        if self.local_rows.is_empty() {
            BodyState::NoData
        } else if self.filtered_count() == 0 {
            BodyState::NoMatches
        } else {
            BodyState::Rows
        }
    }

    // Pagination

    /// Pagination with the page index clamped to the current row count.
    pub fn pagination(&self) -> Pagination {
        self.pagination.clamped(self.filtered_count())
    }

    pub fn set_pagination(&mut self, pagination: Pagination) {
        self.pagination = Pagination {
            page_index: pagination.page_index,
            page_size: pagination.page_size.max(1),
        };
    }

    /// Changes the page size, keeping the first row of the current page in view.
    pub fn set_page_size(&mut self, page_size: usize) {
        let page_size = page_size.max(1);
        let current = self.pagination();
        let top_row = current.page_index * current.page_size;
        self.pagination = Pagination {
            page_index: top_row / page_size,
            page_size,
        };
        debug!("grid page size set to {page_size}");
    }

    pub fn set_page_index(&mut self, page_index: usize) {
        let last = self.page_count() - 1;
        self.pagination.page_index = page_index.min(last);
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count(self.filtered_count())
    }

    pub fn current_page_index(&self) -> usize {
        self.pagination.clamped_index(self.filtered_count())
    }

    pub fn can_previous_page(&self) -> bool {
        self.pagination.can_previous(self.filtered_count())
    }

    pub fn can_next_page(&self) -> bool {
        self.pagination.can_next(self.filtered_count())
    }

    pub fn first_page(&mut self) {
        self.set_page_index(0);
    }

    pub fn previous_page(&mut self) {
        let current = self.current_page_index();
        self.set_page_index(current.saturating_sub(1));
    }

    pub fn next_page(&mut self) {
        let current = self.current_page_index();
        self.set_page_index(current + 1);
    }

    pub fn last_page(&mut self) {
        let last = self.page_count() - 1;
        self.set_page_index(last);
    }

    // Selection

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    /// Selects or clears exactly the rows on the current page.
    pub fn toggle_all_on_page(&mut self, value: bool) {
        let page = self.page_row_ids();
        debug!("grid select-all on page: {} rows -> {value}", page.len());
        self.selection.toggle_all(&page, value);
    }

    pub fn toggle_row(&mut self, id: &RowId, value: bool) -> bool {
        self.selection.toggle_row(id, value)
    }

    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selection.is_selected(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selection.selected_count()
    }

    pub fn page_check_state(&self) -> CheckState {
        self.selection.check_state(&self.page_row_ids())
    }

    /// Selected rows in canonical order, including rows hidden by filters.
    pub fn selected_rows(&self) -> Vec<&T> {
        self.local_rows
            .iter()
            .zip(&self.row_ids)
            .filter_map(|(row, id)| self.selection.is_selected(id).then_some(row))
            .collect()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // Column visibility

    pub fn is_column_visible(&self, id: &str) -> bool {
        self.column_visibility.get(id).copied().unwrap_or(true)
    }

    /// Returns false if the column is unknown or cannot be hidden.
    pub fn set_column_visible(&mut self, id: &str, visible: bool) -> bool {
        if !self.column(id).is_some_and(|col| col.hideable) {
            return false;
        }
        self.column_visibility.insert(id.to_string(), visible);
        true
    }

    pub fn toggle_column_visibility(&mut self, id: &str) -> bool {
        let visible = self.is_column_visible(id);
        self.set_column_visible(id, !visible)
    }

    pub fn visible_columns(&self) -> Vec<&ColumnDescriptor<T>> {
        self.columns
            .iter()
            .filter(|col| self.is_column_visible(&col.id))
            .collect()
    }

    pub fn hideable_columns(&self) -> Vec<&ColumnDescriptor<T>> {
        self.columns.iter().filter(|col| col.hideable).collect()
    }

    // Drag reordering

    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    pub fn dragging_row(&self) -> Option<&RowId> {
        self.drag.active()
    }

    pub fn drop_target(&self) -> Option<&RowId> {
        self.drag.over()
    }

    /// Picks up the row with `id`. Unknown identities are ignored.
    pub fn begin_drag(&mut self, id: &RowId, input: DragInput) -> bool {
        if !self.row_ids.contains(id) {
            return false;
        }
        debug!("grid drag started on {id} via {input:?}");
        self.drag.begin(id.clone(), input);
        true
    }

    /// Retargets a pointer drag. Rects measured for rows that are not on the
    /// current page are ignored.
    pub fn drag_pointer_move(&mut self, y: f64, rects: &[RowRect]) {
        let page = self.page_row_ids();
        let live: Vec<RowRect> = rects
            .iter()
            .filter(|rect| page.contains(&rect.id))
            .cloned()
            .collect();
        self.drag.pointer_move(y, &live);
    }

    pub fn drag_hover(&mut self, over: Option<RowId>) {
        self.drag.hover(over);
    }

    /// Keyboard move of the drop target through the rows on the current page.
    pub fn drag_step(&mut self, direction: MoveDirection) {
        let order = self.page_row_ids();
        self.drag.step(direction, &order);
    }

    /// Drops the dragged row. On a real move the canonical rows are rewritten
    /// and the full new order is returned for the caller to persist.
    pub fn end_drag(&mut self) -> Option<Vec<T>> {
        let commit = self.drag.drop_active()?;
        let from = self.row_ids.iter().position(|id| *id == commit.active);
        let to = self.row_ids.iter().position(|id| *id == commit.over);

        let reordered = match (from, to) {
            (Some(from), Some(to)) => {
                let rows = std::mem::take(&mut self.local_rows);
                self.local_rows = drag::array_move(rows, from, to);
                self.row_ids = row_identity::resolve_ids(&self.local_rows, &self.row_id_key);
                debug!("grid reorder committed: {from} -> {to}");
                Some(self.local_rows.clone())
            }
            _ => {
                debug!("grid drop ignored: row no longer present");
                None
            }
        };

        self.drag.finish();
        reordered
    }

    pub fn cancel_drag(&mut self) -> bool {
        let cancelled = self.drag.cancel();
        if cancelled {
            debug!("grid drag cancelled");
        }
        cancelled
    }

    /// Drops pending timers and any gesture in flight. Nothing is emitted.
    pub fn teardown(&mut self) {
        self.search.cancel();
        self.drag.cancel();
    }
}
