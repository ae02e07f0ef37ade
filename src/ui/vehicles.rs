use dioxus::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::io::json_io::{self, JsonIoError};
use crate::state::column::ColumnDescriptor;
use crate::state::config::GridConfig;
use crate::state::data_model::GridRow;
use crate::state::i18n::{self, Language};
use crate::ui::grid::DataGrid;

const SAMPLE_VEHICLES: &str = include_str!("../../assets/sample/vehicles.json");

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: u32,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub seats: u8,
    pub daily_rate: f64,
    #[serde(default)]
    pub available: bool,
}

impl Vehicle {
    pub fn draft(id: u32) -> Self {
        Self {
            id,
            name: format!("Draft vehicle {id}"),
            brand: String::new(),
            category: String::new(),
            seats: 0,
            daily_rate: 0.0,
            available: false,
        }
    }

    pub fn capacity_class(&self) -> &'static str {
        match self.seats {
            0 => "",
            1..=4 => "Compact",
            5..=7 => "Family",
            _ => "Group",
        }
    }
}

impl GridRow for Vehicle {
    fn field(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(json!(self.id)),
            "name" => Some(json!(self.name)),
            "brand" => Some(json!(self.brand)),
            "category" => Some(json!(self.category)),
            "seats" => Some(json!(self.seats)),
            "daily_rate" => Some(json!(self.daily_rate)),
            "available" => Some(json!(self.available)),
            _ => None,
        }
    }
}

pub fn sample_vehicles() -> Result<Vec<Vehicle>, JsonIoError> {
    json_io::parse_records(SAMPLE_VEHICLES)
}

pub fn vehicle_columns() -> Vec<ColumnDescriptor<Vehicle>> {
    vec![
        ColumnDescriptor::field("name", "Name").always_visible(),
        ColumnDescriptor::field("brand", "Brand"),
        ColumnDescriptor::field("category", "Category"),
        ColumnDescriptor::field("seats", "Seats"),
        ColumnDescriptor::computed("capacity", "Capacity", |v: &Vehicle| {
            json!(v.capacity_class())
        }),
        ColumnDescriptor::field("daily_rate", "Daily rate").render_with(|v: &Vehicle| {
            let rate = format!("${:.2}", v.daily_rate);
            rsx! { span { class: "money", "{rate}" } }
        }),
        ColumnDescriptor::field("available", "Status").render_with(|v: &Vehicle| {
            let (class, label) = if v.available {
                ("badge badge-ok", "Available")
            } else {
                ("badge badge-off", "Unavailable")
            };
            rsx! { span { class: "{class}", "{label}" } }
        }),
    ]
}

#[component]
pub fn VehiclesScreen(config: GridConfig, mut error_message: Signal<Option<String>>) -> Element {
    let language = use_context::<Signal<Language>>();
    let mut vehicles = use_signal(|| match sample_vehicles() {
        Ok(rows) => rows,
        Err(err) => {
            log::error!("failed to load sample vehicles: {err}");
            Vec::new()
        }
    });
    let mut drafts = use_signal(|| 0usize);
    let columns = use_hook(vehicle_columns);

    let drafts_label = i18n::tr(*language.read(), "app.draft_count");
    let draft_count = *drafts.read();

    rsx! {
        div { class: "screen", id: "screen-vehicles",
            if draft_count > 0 {
                p { class: "screen-note", "{drafts_label}: {draft_count}" }
            }
            DataGrid::<Vehicle> {
                rows: vehicles.read().clone(),
                columns,
                row_id_key: "id",
                config: config.clone(),
                on_reorder: move |rows: Vec<Vehicle>| {
                    log::info!("vehicle order changed; {} rows", rows.len());
                    vehicles.set(rows);
                    error_message.set(None);
                },
                on_add_new: move |_| {
                    let next_id = vehicles.read().iter().map(|v| v.id).max().unwrap_or(0) + 1;
                    vehicles.write().push(Vehicle::draft(next_id));
                    drafts += 1;
                },
            }
        }
    }
}
