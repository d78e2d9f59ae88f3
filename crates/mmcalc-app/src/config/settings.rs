//! Settings loader for `mmcalc.toml`

use super::types::Settings;
use mmcalc_core::prelude::*;
use std::path::Path;

impl Settings {
    /// Parse settings from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        settings.check()?;
        Ok(settings)
    }

    /// Reject values the controller cannot work with
    fn check(&self) -> Result<()> {
        if self.hints.interval_ms == 0 {
            return Err(Error::config("hints.interval_ms must be greater than zero"));
        }
        if self.shortcuts.mode_keys.iter().any(|k| k.is_whitespace()) {
            return Err(Error::config("shortcuts.mode_keys cannot contain whitespace"));
        }
        if !self.shortcuts.mode_path.starts_with('/') {
            return Err(Error::config(format!(
                "shortcuts.mode_path must start with '/': {}",
                self.shortcuts.mode_path
            )));
        }
        Ok(())
    }
}

/// Load settings from an explicit config file
///
/// Unlike [`load_settings`], a missing or malformed file is an error.
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Err(Error::config_not_found(path));
    }

    let content = std::fs::read_to_string(path)?;
    let settings = Settings::from_toml_str(&content)?;
    debug!("Loaded settings from {:?}", path);
    Ok(settings)
}

/// Load settings, falling back to defaults when the file is missing or invalid
pub fn load_settings(path: &Path) -> Settings {
    if !path.exists() {
        debug!("No config file at {:?}, using defaults", path);
        return Settings::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match Settings::from_toml_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", path, e);
            Settings::default()
        }
    }
}
