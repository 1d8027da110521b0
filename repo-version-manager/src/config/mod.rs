//! Settings persistence.
//!
//! Settings are stored as a pretty-printed JSON file. The file is created
//! with defaults the first time it is edited.

mod error;
mod search_mode;
mod settings;

pub use error::ConfigError;
pub use search_mode::SearchMode;
pub use settings::Settings;

pub(crate) use settings::default_marker_prefix;

use std::path::Path;
use tracing::{debug, info};

/// Loads settings from `path`.
///
/// # Errors
///
/// Returns [`ConfigError::MissingFile`] if the file does not exist, or an
/// I/O or JSON error if it cannot be read.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    debug!(path = %path.display(), "Loading settings");

    if !path.exists() {
        return Err(ConfigError::MissingFile {
            path: path.display().to_string(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| ConfigError::JsonError {
        path: path.display().to_string(),
        source: e,
    })
}

/// Loads settings, writing defaults first if the file does not exist.
///
/// Returns the settings and whether the file was created.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or written.
pub fn load_or_create_settings(path: &Path) -> Result<(Settings, bool), ConfigError> {
    match load_settings(path) {
        Ok(settings) => Ok((settings, false)),
        Err(ConfigError::MissingFile { .. }) => {
            let settings = Settings::default();
            save_settings(path, &settings)?;
            info!(path = %path.display(), "Created default settings");
            Ok((settings, true))
        }
        Err(e) => Err(e),
    }
}

/// Writes settings to `path` as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    let json = serde_json::to_string_pretty(settings).map_err(|e| ConfigError::JsonError {
        path: path.display().to_string(),
        source: e,
    })?;

    std::fs::write(path, json + "\n").map_err(|e| ConfigError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    debug!(path = %path.display(), "Saved settings");
    Ok(())
}
