pub mod actions;
pub mod app;
pub mod grid;
pub mod pagination;
pub mod table;
pub mod toolbar;
pub mod vehicles;
