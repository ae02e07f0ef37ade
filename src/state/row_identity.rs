use std::fmt;

use serde_json::Value;

use crate::state::data_model::{self, GridRow};

pub const FALLBACK_PREFIX: &str = "fallback-";

/// Stable key used to track a row across renders, reorders and selection.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId(String);

impl RowId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn fallback(index: usize) -> Self {
        Self(format!("{FALLBACK_PREFIX}{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Resolves the identity of `row` from its `key` field.
///
/// Missing, null and empty-string keys silently fall back to
/// `"fallback-{index}"`. Fallbacks are positional, so callers that need
/// selection or order to follow the underlying entity must supply a real key.
pub fn resolve_id<T: GridRow>(row: &T, index: usize, key: &str) -> RowId {
    match row.field(key) {
        None | Some(Value::Null) => RowId::fallback(index),
        Some(Value::String(s)) if s.is_empty() => RowId::fallback(index),
        Some(value) => RowId(data_model::cell_text(&value).into_owned()),
    }
}

pub fn resolve_ids<T: GridRow>(rows: &[T], key: &str) -> Vec<RowId> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| resolve_id(row, index, key))
        .collect()
}
