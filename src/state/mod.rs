pub mod column;
pub mod config;
pub mod data_model;
pub mod debounce;
pub mod drag;
pub mod grid_state;
pub mod i18n;
pub mod pagination;
pub mod row_identity;
pub mod selection;
pub mod sorting;
