use dioxus::prelude::*;
use std::path::PathBuf;

use crate::io::config_io;
use crate::state::column::ColumnDescriptor;
use crate::state::config::GridConfig;
use crate::state::data_model::Row;
use crate::state::i18n::{self, Language};
use crate::ui::actions;
use crate::ui::grid::DataGrid;
use crate::ui::vehicles::VehiclesScreen;

const STYLES: Asset = asset!("/assets/styles.css");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Screen {
    Vehicles,
    JsonFile,
}

#[component]
pub fn App() -> Element {
    let mut language = use_context_provider(|| Signal::new(Language::default()));
    let mut screen = use_signal(|| Screen::Vehicles);
    let error_message = use_signal::<Option<String>>(|| None);
    let config = use_hook(|| match config_io::load_config_from_env() {
        Ok(config) => config,
        Err(err) => {
            log::warn!("falling back to default grid config: {err}");
            GridConfig::default()
        }
    });

    let current_language = *language.read();
    let title = i18n::tr(current_language, "app.title");
    let vehicles_label = i18n::tr(current_language, "app.vehicles");
    let json_label = i18n::tr(current_language, "app.json_rows");
    let active = *screen.read();
    let nav_class = |target: Screen| {
        if active == target {
            "toolbar-btn active"
        } else {
            "toolbar-btn"
        }
    };
    let vehicles_class = nav_class(Screen::Vehicles);
    let json_class = nav_class(Screen::JsonFile);

    rsx! {
        document::Stylesheet { href: STYLES }
        div { class: "app",
            div { class: "toolbar",
                div { class: "toolbar-group",
                    span { class: "app-title", "{title}" }
                    button {
                        class: vehicles_class,
                        id: "nav-vehicles",
                        onclick: move |_| screen.set(Screen::Vehicles),
                        "{vehicles_label}"
                    }
                    button {
                        class: json_class,
                        id: "nav-json",
                        onclick: move |_| screen.set(Screen::JsonFile),
                        "{json_label}"
                    }
                }
                div { class: "toolbar-info",
                    select {
                        class: "toolbar-select toolbar-select-sm",
                        id: "select-language",
                        value: "{current_language.code()}",
                        onchange: move |evt| {
                            if let Some(next_language) = Language::from_code(&evt.value()) {
                                language.set(next_language);
                            }
                        },
                        for lang in Language::all().iter().copied() {
                            option { value: "{lang.code()}", "{i18n::tr(current_language, lang.label_key())}" }
                        }
                    }
                    if let Some(err) = error_message.read().as_ref() {
                        span { class: "error-message", "{err}" }
                    }
                }
            }
            if active == Screen::Vehicles {
                VehiclesScreen { config: config.clone(), error_message }
            } else {
                JsonFileScreen { config: config.clone(), error_message }
            }
        }
    }
}

#[component]
fn JsonFileScreen(config: GridConfig, error_message: Signal<Option<String>>) -> Element {
    let language = use_context::<Signal<Language>>();
    let rows = use_signal(Vec::<Row>::new);
    let file_path = use_signal::<Option<PathBuf>>(|| None);

    use_hook(move || {
        if let Ok(path) = std::env::var(actions::OPEN_ENV) {
            actions::load_path(&PathBuf::from(path), rows, file_path, error_message);
        }
    });

    let current_language = *language.read();
    let open_label = i18n::tr(current_language, "app.open");
    let no_file_label = i18n::tr(current_language, "app.no_file");
    let grid_key = file_path
        .read()
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_default();
    let columns = ColumnDescriptor::from_rows(&rows.read());

    rsx! {
        div { class: "screen", id: "screen-json",
            div { class: "toolbar",
                div { class: "toolbar-group",
                    button {
                        class: "toolbar-btn",
                        id: "btn-open",
                        onclick: move |_| {
                            spawn(async move {
                                actions::open_file(current_language, rows, file_path, error_message).await;
                            });
                        },
                        "\u{1F4C2} {open_label}"
                    }
                }
                div { class: "toolbar-info",
                    if let Some(path) = file_path.read().as_ref() {
                        span { class: "file-path", "{path.display()}" }
                    } else {
                        span { class: "file-path", "{no_file_label}" }
                    }
                }
            }
            DataGrid::<Row> {
                key: "{grid_key}",
                rows: rows.read().clone(),
                columns,
                row_id_key: "id",
                config: config.clone(),
                on_reorder: move |reordered: Vec<Row>| {
                    actions::persist_order(reordered, rows, file_path, error_message);
                },
            }
        }
    }
}
