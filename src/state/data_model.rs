use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

pub type Row = BTreeMap<String, Value>;
pub type TableData = Vec<Row>;

/// A record the grid can list.
///
/// The grid never inspects a row beyond the fields it asks for by name: the
/// identity key and whatever field accessors the column descriptors carry.
pub trait GridRow: Clone + PartialEq + 'static {
    fn field(&self, key: &str) -> Option<Value>;
}

impl GridRow for Row {
    fn field(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }
}

/// Every field name used by any row, in key order.
pub fn field_names(rows: &[Row]) -> Vec<String> {
    rows.iter()
        .flat_map(Row::keys)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .cloned()
        .collect()
}

/// Cell text for a JSON value: strings unquoted, null blank, anything else
/// in its compact JSON form.
pub fn cell_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::String(text) => Cow::Borrowed(text),
        other => Cow::Owned(other.to_string()),
    }
}
