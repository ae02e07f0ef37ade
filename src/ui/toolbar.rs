use dioxus::prelude::*;

use crate::state::data_model::GridRow;
use crate::state::i18n;
use crate::ui::grid::GridHandles;
use crate::ui::table::sanitize_id;

/// Search box, column-visibility menu and the "add new" affordance.
pub(crate) fn render_toolbar<T: GridRow>(
    grid: &GridHandles<T>,
    on_add_new: Option<EventHandler<()>>,
    add_new_href: Option<String>,
) -> Element {
    let mut state = grid.state;
    let language = grid.language;
    let (search_term, selected_count, toggles) = {
        let snapshot = state.read();
        let toggles: Vec<(String, String, bool)> = snapshot
            .hideable_columns()
            .into_iter()
            .map(|col| {
                (
                    col.id.clone(),
                    col.header.clone(),
                    snapshot.is_column_visible(&col.id),
                )
            })
            .collect();
        (
            snapshot.search_term().to_string(),
            snapshot.selected_count(),
            toggles,
        )
    };

    let search_placeholder = i18n::tr(language, "grid.search_placeholder");
    let columns_label = i18n::tr(language, "grid.columns");
    let add_new_label = i18n::tr(language, "grid.add_new");
    let selected_label = i18n::tr(language, "grid.selected");
    let search_grid = grid.clone();

    rsx! {
        div { class: "toolbar grid-toolbar",
            div { class: "toolbar-group",
                input {
                    class: "toolbar-input",
                    id: "grid-search",
                    r#type: "search",
                    placeholder: "{search_placeholder}",
                    value: "{search_term}",
                    oninput: move |evt: FormEvent| {
                        search_grid.search_input(evt.value());
                    }
                }
            }
            div { class: "toolbar-separator" }

            // Column visibility
            div { class: "toolbar-group",
                details { class: "column-menu", id: "grid-column-menu",
                    summary { class: "toolbar-btn", "\u{2630} {columns_label}" }
                    div { class: "column-menu-list",
                        for (id, header, visible) in toggles {
                            label {
                                key: "{id}",
                                class: "column-menu-item",
                                input {
                                    r#type: "checkbox",
                                    id: format!("toggle-col-{}", sanitize_id(&id)),
                                    checked: visible,
                                    onchange: {
                                        let id = id.clone();
                                        move |_| {
                                            state.write().toggle_column_visibility(&id);
                                        }
                                    }
                                }
                                "{header}"
                            }
                        }
                    }
                }
            }

            if selected_count > 0 {
                div { class: "toolbar-info",
                    span { class: "toolbar-label", id: "grid-selected-count",
                        "{selected_count} {selected_label}"
                    }
                }
            }

            if let Some(href) = add_new_href {
                a { class: "toolbar-btn toolbar-btn-primary", id: "grid-add-new", href: "{href}",
                    "\u{2795} {add_new_label}"
                }
            } else if let Some(on_add_new) = on_add_new {
                button {
                    class: "toolbar-btn toolbar-btn-primary",
                    id: "grid-add-new",
                    onclick: move |_| on_add_new.call(()),
                    "\u{2795} {add_new_label}"
                }
            }
        }
    }
}
