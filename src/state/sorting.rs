use std::cmp::Ordering;

use serde_json::{Number, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Next sort for a header click: none, then ascending, then descending, then none.
pub fn next_sort(current: &[SortSpec], column: &str) -> Vec<SortSpec> {
    match current.first() {
        Some(spec) if spec.column == column => match spec.direction {
            SortDirection::Asc => vec![SortSpec::desc(column)],
            SortDirection::Desc => Vec::new(),
        },
        _ => vec![SortSpec::asc(column)],
    }
}

/// Sorts `indices` in place by `key(index, spec)` for each sort spec in turn.
///
/// `slice::sort_by` is stable, and descending order flips the comparator
/// instead of reversing the output, so equal keys keep their input order.
pub fn sort_indices<F>(indices: &mut [usize], sorting: &[SortSpec], mut key: F)
where
    F: FnMut(usize, &SortSpec) -> Option<Value>,
{
    if sorting.is_empty() {
        return;
    }

    let mut keyed: Vec<(usize, Vec<SortKey>)> = indices
        .iter()
        .map(|&idx| {
            let keys = sorting
                .iter()
                .map(|spec| SortKey::new(key(idx, spec).as_ref()))
                .collect();
            (idx, keys)
        })
        .collect();
    keyed.sort_by(|(_, left), (_, right)| {
        sorting
            .iter()
            .zip(left.iter().zip(right.iter()))
            .fold(Ordering::Equal, |acc, (spec, (a, b))| {
                acc.then_with(|| match spec.direction {
                    SortDirection::Asc => a.cmp(b),
                    SortDirection::Desc => b.cmp(a),
                })
            })
    });

    for (slot, (idx, _)) in indices.iter_mut().zip(keyed) {
        *slot = idx;
    }
}

/// Orders two cell values the way a sorted column lists them.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    SortKey::new(a).cmp(&SortKey::new(b))
}

/// Comparable form of one cell, built once per row and sort column.
///
/// Variant order ranks mixed types: missing cells first, then null, booleans,
/// numbers, text, arrays and objects. Text compares without case. Arrays and
/// objects compare by their JSON text.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Missing,
    Null,
    Bool(bool),
    Number(NumberKey),
    Text(String),
    Array(String),
    Object(String),
}

impl SortKey {
    fn new(value: Option<&Value>) -> Self {
        match value {
            None => SortKey::Missing,
            Some(Value::Null) => SortKey::Null,
            Some(Value::Bool(flag)) => SortKey::Bool(*flag),
            Some(Value::Number(number)) => SortKey::Number(NumberKey::new(number)),
            Some(Value::String(text)) => SortKey::Text(text.to_lowercase()),
            Some(nested @ Value::Array(_)) => SortKey::Array(nested.to_string()),
            Some(nested @ Value::Object(_)) => SortKey::Object(nested.to_string()),
        }
    }
}

/// Integers compare exactly across the whole `i64` and `u64` range. Floats,
/// or an integer against a float, compare as `f64`.
#[derive(Clone, Copy, Debug)]
enum NumberKey {
    Int(i128),
    Float(f64),
}

impl NumberKey {
    fn new(number: &Number) -> Self {
        number
            .as_i64()
            .map(i128::from)
            .or_else(|| number.as_u64().map(i128::from))
            .map(NumberKey::Int)
            .unwrap_or_else(|| NumberKey::Float(number.as_f64().unwrap_or(f64::NAN)))
    }

    fn as_f64(self) -> f64 {
        match self {
            NumberKey::Int(value) => value as f64,
            NumberKey::Float(value) => value,
        }
    }
}

impl Ord for NumberKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (NumberKey::Int(a), NumberKey::Int(b)) => a.cmp(b),
            _ => self.as_f64().total_cmp(&other.as_f64()),
        }
    }
}

impl PartialOrd for NumberKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NumberKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NumberKey {}
