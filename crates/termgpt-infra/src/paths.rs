//! Data directory and file path resolution.
//!
//! Everything termgpt persists lives in one directory: the SQLite database
//! and `config.toml`.

use std::path::{Path, PathBuf};

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `TERMGPT_DATA_DIR` environment variable
/// 2. Platform config directory (e.g., `~/.config/termgpt` on Linux)
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TERMGPT_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(config) = dirs::config_dir() {
        return config.join("termgpt");
    }

    // Last resort: current directory
    PathBuf::from(".termgpt")
}

/// SQLite connection URL for the database inside `data_dir`.
pub fn database_url(data_dir: &Path) -> String {
    format!(
        "sqlite://{}?mode=rwc",
        data_dir.join("database.db").display()
    )
}

/// Path of the configuration file inside `data_dir`.
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}
