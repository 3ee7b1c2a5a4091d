//! Application settings types and persistence
//!
//! This module handles loading and saving application settings.

use bevy::log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::dice::{DiceConfig, MAX_DICE, MIN_DICE};

/// Folder name used under the platform's per-user data directory.
pub const APP_DATA_FOLDER: &str = "dicetray";

const SETTINGS_FILE_NAME: &str = "settings.json";

/// Application settings (persisted as JSON).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_dice_count")]
    pub dice_count: usize,
}

fn default_dice_count() -> usize {
    DiceConfig::default().dice_count
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            dice_count: default_dice_count(),
        }
    }
}

impl AppSettings {
    /// Load settings from the per-user data directory.
    ///
    /// Missing or unreadable settings fall back to defaults.
    pub fn load() -> Self {
        match Self::settings_path() {
            Ok(path) if path.exists() => match Self::load_from(&path) {
                Ok(settings) => {
                    info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    warn!("{e}; using default settings");
                    Self::default()
                }
            },
            Ok(_) => Self::default(),
            Err(e) => {
                warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to the per-user data directory.
    pub fn save(&self) -> Result<(), String> {
        let path = Self::settings_path()?;
        self.save_to(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read settings {}: {}", path.display(), e))?;
        let settings: AppSettings = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse settings {}: {}", path.display(), e))?;
        Ok(settings.sanitized())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;
        std::fs::write(path, json)
            .map_err(|e| format!("Failed to write settings {}: {}", path.display(), e))
    }

    /// Clamp values read from disk into their valid ranges.
    pub fn sanitized(mut self) -> Self {
        self.dice_count = self.dice_count.clamp(MIN_DICE, MAX_DICE);
        self
    }

    pub fn dice_config(&self) -> DiceConfig {
        DiceConfig::new(self.dice_count)
    }

    fn settings_path() -> Result<PathBuf, String> {
        Ok(data_dir()?.join(SETTINGS_FILE_NAME))
    }
}

/// Per-user base directory for application data on this platform.
fn platform_data_root() -> Option<PathBuf> {
    let var = |name: &str| std::env::var_os(name).map(PathBuf::from);

    if cfg!(target_os = "windows") {
        var("LOCALAPPDATA")
    } else if cfg!(target_os = "macos") {
        var("HOME").map(|home| home.join("Library").join("Application Support"))
    } else {
        var("XDG_DATA_HOME").or_else(|| var("HOME").map(|home| home.join(".local").join("share")))
    }
}

/// Directory holding the settings file, created on first use. Falls back to
/// the working directory when the platform gives no per-user location.
fn data_dir() -> Result<PathBuf, String> {
    let Some(root) = platform_data_root() else {
        return std::env::current_dir()
            .map_err(|e| format!("Failed to resolve working directory: {}", e));
    };

    let dir = root.join(APP_DATA_FOLDER);
    std::fs::create_dir_all(&dir)
        .map_err(|e| format!("Failed to create data directory {}: {}", dir.display(), e))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_settings_path(name: &str) -> PathBuf {
        let dir_name = format!("dicetray-test-{}-{}", name, std::process::id());
        let dir = std::env::temp_dir().join(dir_name);
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(SETTINGS_FILE_NAME)
    }

    #[test]
    fn test_default_settings() {
        assert_eq!(AppSettings::default().dice_count, 2);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let settings: AppSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_settings_path("roundtrip");
        let settings = AppSettings { dice_count: 5 };
        settings.save_to(&path).unwrap();

        let loaded = AppSettings::load_from(&path).unwrap();
        assert_eq!(loaded.dice_count, 5);
        assert_eq!(loaded.dice_config().dice_count, 5);
    }

    #[test]
    fn test_out_of_range_count_is_clamped() {
        let path = temp_settings_path("clamp");
        std::fs::write(&path, r#"{ "dice_count": 42 }"#).unwrap();
        assert_eq!(AppSettings::load_from(&path).unwrap().dice_count, MAX_DICE);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = temp_settings_path("corrupt");
        std::fs::write(&path, "not json").unwrap();
        let err = AppSettings::load_from(&path).unwrap_err();
        assert!(err.contains("Failed to parse settings"));
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_linux_data_root_follows_xdg_layout() {
        let root = platform_data_root();
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            assert_eq!(root, Some(PathBuf::from(xdg)));
        } else if let Some(home) = std::env::var_os("HOME") {
            assert_eq!(root, Some(PathBuf::from(home).join(".local").join("share")));
        }
    }
}
