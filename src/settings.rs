//! User settings persisted as JSON under `~/.chronicles/`.
//!
//! Settings only carry environment concerns (directory overrides, autosave);
//! game state never lives here.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{APP_DIR_NAME, DATA_SUBDIR_NAME, SAVE_SUBDIR_NAME, SETTINGS_FILE_NAME};
use crate::error::Result;

fn default_autosave() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Overrides the default save directory when set.
    #[serde(default)]
    pub save_directory: Option<PathBuf>,
    /// Overrides the default catalog data directory when set.
    #[serde(default)]
    pub data_directory: Option<PathBuf>,
    /// Save after every menu action, not just on quit.
    #[serde(default = "default_autosave")]
    pub autosave: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            save_directory: None,
            data_directory: None,
            autosave: true,
        }
    }
}

/// The `~/.chronicles` directory, created on first use.
pub fn app_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(APP_DIR_NAME);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

impl Settings {
    /// Loads settings from the default location, falling back to defaults
    /// when the file is missing or unreadable.
    pub fn load_or_default() -> Self {
        match app_dir() {
            Ok(dir) => Self::load_from(&dir.join(SETTINGS_FILE_NAME)),
            Err(_) => Self::default(),
        }
    }

    /// Loads settings from an explicit path, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
            Err(_) => {
                debug!(path = %path.display(), "no settings file, using defaults");
                Self::default()
            }
        }
    }

    /// Writes settings to the default location as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        self.save_to(&app_dir()?.join(SETTINGS_FILE_NAME))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)?;
        Ok(())
    }

    /// The effective save directory: the override, or `~/.chronicles/saves`.
    pub fn save_directory(&self) -> Result<PathBuf> {
        match &self.save_directory {
            Some(dir) => Ok(dir.clone()),
            None => Ok(app_dir()?.join(SAVE_SUBDIR_NAME)),
        }
    }

    /// The effective data directory: the override, or `~/.chronicles/data`.
    pub fn data_directory(&self) -> Result<PathBuf> {
        match &self.data_directory {
            Some(dir) => Ok(dir.clone()),
            None => Ok(app_dir()?.join(DATA_SUBDIR_NAME)),
        }
    }
}
