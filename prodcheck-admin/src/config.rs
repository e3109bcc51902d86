//! Configuration loading and data folder resolution

use prodcheck_common::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable overriding the data folder
pub const DATA_DIR_ENV: &str = "PRODCHECK_DATA";

/// Name of the database file inside the data folder
const DATABASE_FILE: &str = "prodcheck.db";

/// Optional TOML configuration file (`<config dir>/prodcheck/config.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Data folder holding the checklist database
    pub data_dir: Option<PathBuf>,
}

/// Resolve the data folder, in priority order:
/// 1. Explicit caller argument
/// 2. `PRODCHECK_DATA` environment variable
/// 3. `data_dir` in the TOML config file
/// 4. OS-dependent default (`<local data dir>/prodcheck`)
///
/// A missing or unreadable config file falls through to the default; it is
/// never fatal.
pub fn resolve_data_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(path);
    }

    // A missing config file is the normal case
    if let Some(config_path) = config_file_path() {
        if let Ok(contents) = std::fs::read_to_string(&config_path) {
            match toml::from_str::<TomlConfig>(&contents) {
                Ok(config) => {
                    if let Some(data_dir) = config.data_dir {
                        return data_dir;
                    }
                }
                Err(e) => {
                    warn!("Ignoring malformed config file {}: {}", config_path.display(), e);
                }
            }
        }
    }

    default_data_dir()
}

/// Path of the checklist database inside the data folder
pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DATABASE_FILE)
}

/// Create the data folder if it does not exist (idempotent)
pub fn ensure_data_dir(data_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;
    Ok(())
}

/// Platform config file location, when the platform has a config dir
fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("prodcheck").join("config.toml"))
}

/// OS-dependent default data folder
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("prodcheck"))
        .unwrap_or_else(|| PathBuf::from("./prodcheck_data"))
}
