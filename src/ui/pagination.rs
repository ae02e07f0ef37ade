use dioxus::prelude::*;

use crate::state::data_model::GridRow;
use crate::state::i18n;
use crate::ui::grid::GridHandles;

/// Page-size selector and first/previous/next/last controls.
pub(crate) fn render_footer<T: GridRow>(grid: &GridHandles<T>) -> Element {
    let mut state = grid.state;
    let language = grid.language;
    let (page, page_count, can_previous, can_next) = {
        let snapshot = state.read();
        (
            snapshot.pagination(),
            snapshot.page_count(),
            snapshot.can_previous_page(),
            snapshot.can_next_page(),
        )
    };
    let page_number = page.page_index + 1;
    let page_size_options = grid.config.page_size_options.clone();

    let rows_per_page_label = i18n::tr(language, "grid.rows_per_page");
    let page_label = i18n::tr(language, "grid.page");
    let of_label = i18n::tr(language, "grid.of");
    let first_label = i18n::tr(language, "grid.first_page");
    let previous_label = i18n::tr(language, "grid.previous_page");
    let next_label = i18n::tr(language, "grid.next_page");
    let last_label = i18n::tr(language, "grid.last_page");

    rsx! {
        div { class: "grid-footer",
            div { class: "toolbar-group",
                span { class: "toolbar-label", "{rows_per_page_label}" }
                select {
                    class: "toolbar-select toolbar-select-sm",
                    id: "grid-page-size",
                    value: "{page.page_size}",
                    onchange: move |evt: FormEvent| {
                        if let Ok(size) = evt.value().parse::<usize>() {
                            state.write().set_page_size(size);
                        }
                    },
                    for size in page_size_options {
                        option { key: "{size}", value: "{size}", selected: size == page.page_size, "{size}" }
                    }
                }
            }
            div { class: "toolbar-group",
                span { class: "toolbar-label", id: "grid-page-label",
                    "{page_label} {page_number} {of_label} {page_count}"
                }
                button {
                    class: "toolbar-btn",
                    id: "grid-first-page",
                    title: "{first_label}",
                    disabled: !can_previous,
                    onclick: move |_| state.write().first_page(),
                    "\u{00AB}"
                }
                button {
                    class: "toolbar-btn",
                    id: "grid-previous-page",
                    title: "{previous_label}",
                    disabled: !can_previous,
                    onclick: move |_| state.write().previous_page(),
                    "\u{2039}"
                }
                button {
                    class: "toolbar-btn",
                    id: "grid-next-page",
                    title: "{next_label}",
                    disabled: !can_next,
                    onclick: move |_| state.write().next_page(),
                    "\u{203A}"
                }
                button {
                    class: "toolbar-btn",
                    id: "grid-last-page",
                    title: "{last_label}",
                    disabled: !can_next,
                    onclick: move |_| state.write().last_page(),
                    "\u{00BB}"
                }
            }
        }
    }
}
