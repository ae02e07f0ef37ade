use std::fs;
use std::io;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::state::data_model::Row;

#[derive(Debug, Error)]
pub enum JsonIoError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("JSON root is not an array")]
    NotAnArray,
    #[error("JSON array contains non-object elements")]
    NotArrayOfObjects,
}

pub fn load_json(path: &Path) -> Result<Vec<Row>, JsonIoError> {
    let content = fs::read_to_string(path)?;
    parse_rows(&content)
}

/// Parses a JSON array of objects into rows, keeping array order.
pub fn parse_rows(content: &str) -> Result<Vec<Row>, JsonIoError> {
    let Value::Array(items) = serde_json::from_str(content)? else {
        return Err(JsonIoError::NotAnArray);
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(map) => Ok(map.into_iter().collect()),
            _ => Err(JsonIoError::NotArrayOfObjects),
        })
        .collect()
}

pub fn parse_records<T: DeserializeOwned>(content: &str) -> Result<Vec<T>, JsonIoError> {
    let value: Value = serde_json::from_str(content)?;
    if !value.is_array() {
        return Err(JsonIoError::NotAnArray);
    }
    Ok(serde_json::from_value(value)?)
}

pub fn save_json(path: &Path, data: &[Row]) -> Result<(), JsonIoError> {
    save_records(path, data)
}

/// Writes `records` as a pretty JSON array, replacing the file atomically.
pub fn save_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), JsonIoError> {
    let json = serde_json::to_string_pretty(records)?;
    super::atomic_write_string(path, &json)?;
    log::info!("saved {} rows to {}", records.len(), path.display());
    Ok(())
}
