use std::fs;
use std::path::Path;

use crate::state::config::{ConfigError, GridConfig};

pub const CONFIG_ENV: &str = "TRIPGRID_CONFIG";

pub fn load_config(path: &Path) -> Result<GridConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<GridConfig, ConfigError> {
    let config: GridConfig = serde_json::from_str(content)?;
    config.validated()
}

/// Reads the config named by `TRIPGRID_CONFIG`, or the defaults when unset.
pub fn load_config_from_env() -> Result<GridConfig, ConfigError> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            log::info!("loading grid config from {path}");
            load_config(Path::new(&path))
        }
        Err(_) => GridConfig::default().validated(),
    }
}
