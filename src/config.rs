//! Server configuration
//!
//! Values are resolved in this order, later sources winning:
//! built-in defaults, an optional TOML file, the `TODO_DB_FOLDER` /
//! `TODO_DB_FILE` environment variables, and finally command-line arguments
//! (applied by the binary).
//!
//! ```toml
//! db_folder = "/home/me/.todo-list-mcp"
//! db_file = "todos.sqlite"
//! log_level = "debug"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DB_FOLDER_ENV: &str = "TODO_DB_FOLDER";
pub const DB_FILE_ENV: &str = "TODO_DB_FILE";

const DEFAULT_DB_FOLDER_NAME: &str = ".todo-list-mcp";
const DEFAULT_DB_FILE: &str = "todos.sqlite";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Folder holding the database file; created on startup if missing
    pub db_folder: PathBuf,
    /// Database file name inside `db_folder`
    pub db_file: String,
    /// `tracing` filter directive, e.g. "info" or "todo_mcp=debug"
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            db_folder: home.join(DEFAULT_DB_FOLDER_NAME),
            db_file: DEFAULT_DB_FILE.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Defaults (or the given file) with environment overrides applied
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_env(|key| std::env::var(key).ok()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Override folder and file from the environment; empty values are ignored
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(folder) = lookup(DB_FOLDER_ENV).filter(|v| !v.is_empty()) {
            self.db_folder = PathBuf::from(folder);
        }
        if let Some(file) = lookup(DB_FILE_ENV).filter(|v| !v.is_empty()) {
            self.db_file = file;
        }
        self
    }

    pub fn db_path(&self) -> PathBuf {
        self.db_folder.join(&self.db_file)
    }
}
