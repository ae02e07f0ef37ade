use std::io;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterCase {
    #[default]
    Insensitive,
    Sensitive,
}

impl FilterCase {
    pub fn matches(self, haystack: &str, needle: &str) -> bool {
        match self {
            FilterCase::Sensitive => haystack.contains(needle),
            FilterCase::Insensitive => haystack.to_lowercase().contains(&needle.to_lowercase()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub initial_page_size: usize,
    pub page_size_options: Vec<usize>,
    pub search_debounce_ms: u64,
    pub search_column: String,
    pub filter_case: FilterCase,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            initial_page_size: 10,
            page_size_options: vec![10, 20, 50, 100],
            search_debounce_ms: 300,
            search_column: "name".to_string(),
            filter_case: FilterCase::Insensitive,
        }
    }
}

impl GridConfig {
    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Checks page sizes and the search column, and makes sure the initial
    /// page size is one of the selectable options.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        if self.initial_page_size == 0 {
            return Err(ConfigError::Invalid(
                "initial_page_size must be greater than zero".to_string(),
            ));
        }
        if self.page_size_options.contains(&0) {
            return Err(ConfigError::Invalid(
                "page_size_options must not contain zero".to_string(),
            ));
        }
        if self.search_column.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "search_column must not be empty".to_string(),
            ));
        }

        self.search_column = self.search_column.trim().to_string();
        if !self.page_size_options.contains(&self.initial_page_size) {
            self.page_size_options.push(self.initial_page_size);
        }
        self.page_size_options.sort_unstable();
        self.page_size_options.dedup();
        Ok(self)
    }
}
