use dioxus::prelude::*;
use std::path::{Path, PathBuf};

use crate::io::json_io;
use crate::state::data_model::Row;
use crate::state::i18n::{self, Language};

pub const OPEN_ENV: &str = "TRIPGRID_OPEN";

pub async fn open_file(
    language: Language,
    rows: Signal<Vec<Row>>,
    file_path: Signal<Option<PathBuf>>,
    error_message: Signal<Option<String>>,
) {
    let task = rfd::AsyncFileDialog::new()
        .add_filter(i18n::tr(language, "dialog.json_filter"), &["json"])
        .pick_file()
        .await;

    if let Some(handle) = task {
        load_path(handle.path(), rows, file_path, error_message);
    }
}

pub fn load_path(
    path: &Path,
    mut rows: Signal<Vec<Row>>,
    mut file_path: Signal<Option<PathBuf>>,
    mut error_message: Signal<Option<String>>,
) {
    match json_io::load_json(path) {
        Ok(loaded) => {
            log::info!("loaded {} rows from {}", loaded.len(), path.display());
            rows.set(loaded);
            file_path.set(Some(path.to_path_buf()));
            error_message.set(None);
        }
        Err(err) => {
            log::warn!("failed to open {}: {err}", path.display());
            error_message.set(Some(err.to_string()));
        }
    }
}

/// Accepts a new row order from the grid and writes it back to the open file.
pub fn persist_order(
    reordered: Vec<Row>,
    mut rows: Signal<Vec<Row>>,
    file_path: Signal<Option<PathBuf>>,
    mut error_message: Signal<Option<String>>,
) -> bool {
    rows.set(reordered);

    // Nothing to write back until a file has been opened.
    let Some(path) = file_path.read().clone() else {
        return false;
    };

    let saved = json_io::save_json(&path, &rows.read());
    match saved {
        Ok(()) => {
            error_message.set(None);
            true
        }
        Err(err) => {
            log::warn!("reorder not saved to {}: {err}", path.display());
            error_message.set(Some(err.to_string()));
            false
        }
    }
}
