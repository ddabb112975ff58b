use crate::view::file_tree::filter::MATCH_ALL;
use crate::view::file_tree::view::DEFAULT_NAME_COLUMN_WIDTH;
use crate::view::file_tree::{SortColumn, SortOrder};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persisted settings for the directory tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TreeConfig {
    /// Glob applied to file names; `*` shows everything
    #[serde(default = "default_filter")]
    pub filter: String,

    #[serde(default)]
    pub sort_column: SortColumn,

    #[serde(default)]
    pub sort_order: SortOrder,

    /// When false, entries keep the order the filesystem returned them in
    #[serde(default = "default_true")]
    pub sorting_enabled: bool,

    #[serde(default = "default_name_column_width")]
    pub name_column_width: usize,
}

fn default_filter() -> String {
    MATCH_ALL.to_string()
}

fn default_true() -> bool {
    true
}

fn default_name_column_width() -> usize {
    DEFAULT_NAME_COLUMN_WIDTH
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            sort_column: SortColumn::default(),
            sort_order: SortOrder::default(),
            sorting_enabled: true,
            name_column_width: default_name_column_width(),
        }
    }
}

impl TreeConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: TreeConfig =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if !path.as_ref().exists() {
            tracing::debug!("No config at {:?}, using defaults", path.as_ref());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }
        std::fs::write(path.as_ref(), contents).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// `<config_dir>/dirtree/config.json`, if the platform has a config dir
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dirtree").join("config.json"))
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
