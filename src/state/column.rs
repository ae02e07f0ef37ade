use std::fmt;
use std::rc::Rc;

use dioxus::prelude::Element;
use serde_json::Value;

use crate::state::data_model::{self, GridRow, Row};

pub type ComputedFn<T> = Rc<dyn Fn(&T) -> Value>;
pub type CellRenderer<T> = Rc<dyn Fn(&T) -> Element>;

/// How a column reads its value out of a row.
pub enum Accessor<T> {
    Field(String),
    Computed(ComputedFn<T>),
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Field(name) => Accessor::Field(name.clone()),
            Accessor::Computed(f) => Accessor::Computed(Rc::clone(f)),
        }
    }
}

impl<T> PartialEq for Accessor<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Accessor::Field(a), Accessor::Field(b)) => a == b,
            (Accessor::Computed(a), Accessor::Computed(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<T> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Accessor::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Declarative definition of one grid column.
///
/// Sorting and filtering always go through `accessor`; `cell` only changes
/// what is rendered.
pub struct ColumnDescriptor<T> {
    pub id: String,
    pub header: String,
    pub accessor: Accessor<T>,
    pub sortable: bool,
    pub hideable: bool,
    pub cell: Option<CellRenderer<T>>,
}

impl<T: GridRow> ColumnDescriptor<T> {
    pub fn field(id: impl Into<String>, header: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            accessor: Accessor::Field(id.clone()),
            id,
            header: header.into(),
            sortable: true,
            hideable: true,
            cell: None,
        }
    }

    pub fn computed(
        id: impl Into<String>,
        header: impl Into<String>,
        compute: impl Fn(&T) -> Value + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            accessor: Accessor::Computed(Rc::new(compute)),
            sortable: true,
            hideable: true,
            cell: None,
        }
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn always_visible(mut self) -> Self {
        self.hideable = false;
        self
    }

    pub fn render_with(mut self, render: impl Fn(&T) -> Element + 'static) -> Self {
        self.cell = Some(Rc::new(render));
        self
    }

    pub fn value(&self, row: &T) -> Option<Value> {
        match &self.accessor {
            Accessor::Field(name) => row.field(name),
            Accessor::Computed(compute) => Some(compute(row)),
        }
    }

    pub fn display(&self, row: &T) -> String {
        self.value(row)
            .as_ref()
            .map(|value| data_model::cell_text(&value).into_owned())
            .unwrap_or_default()
    }
}

impl ColumnDescriptor<Row> {
    /// One field column per key found in `rows`, in key order.
    pub fn from_rows(rows: &[Row]) -> Vec<Self> {
        data_model::field_names(rows)
            .into_iter()
            .map(|key| ColumnDescriptor::field(key.clone(), key))
            .collect()
    }
}

impl<T> Clone for ColumnDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            sortable: self.sortable,
            hideable: self.hideable,
            cell: self.cell.clone(),
        }
    }
}

impl<T> PartialEq for ColumnDescriptor<T> {
    fn eq(&self, other: &Self) -> bool {
        let same_cell = match (&self.cell, &other.cell) {
            (None, None) => true,
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        };
        self.id == other.id
            && self.header == other.header
            && self.accessor == other.accessor
            && self.sortable == other.sortable
            && self.hideable == other.hideable
            && same_cell
    }
}

impl<T> fmt::Debug for ColumnDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("sortable", &self.sortable)
            .field("hideable", &self.hideable)
            .field("cell", &self.cell.is_some())
            .finish()
    }
}
