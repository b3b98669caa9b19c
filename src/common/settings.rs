//! Persisted settings: music volumes and the best score.
//!
//! A single small JSON file in the platform data directory. Every failure
//! degrades: an unreadable file yields defaults, an unwritable file is
//! warned about and the session plays on.

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub menu_volume: f32,
    pub game_volume: f32,
    pub best_score: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            menu_volume: 0.5,
            game_volume: 0.5,
            best_score: 0,
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Format(serde_json::Error),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "settings io error: {e}"),
            SettingsError::Format(e) => write!(f, "settings format error: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        SettingsError::Io(err)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Format(err)
    }
}

pub fn load(path: &Path) -> Result<Settings, SettingsError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn save(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    Ok(())
}

fn default_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("lane-runner").join("settings.json"))
}

/// Resource wrapping the current settings plus where they persist.
/// `path: None` (no data directory, or tests) means in-memory only.
#[derive(Resource, Debug, Clone)]
pub struct SettingsStore {
    pub current: Settings,
    path: Option<PathBuf>,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::load_or_default(default_path())
    }
}

impl SettingsStore {
    pub fn load_or_default(path: Option<PathBuf>) -> Self {
        let current = match &path {
            Some(p) if p.exists() => match load(p) {
                Ok(s) => s,
                Err(e) => {
                    warn!("could not read settings ({e}), using defaults");
                    Settings::default()
                }
            },
            _ => Settings::default(),
        };
        Self { current, path }
    }

    /// In-memory store for tests.
    pub fn ephemeral(settings: Settings) -> Self {
        Self {
            current: settings,
            path: None,
        }
    }

    pub fn persist(&self) {
        let Some(path) = &self.path else { return };
        if let Err(e) = save(path, &self.current) {
            warn!("could not write settings ({e}), keeping in-memory values");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let dir = std::env::temp_dir().join("lane-runner-settings-test");
        let path = dir.join("settings.json");
        let _ = fs::remove_file(&path);

        let out = Settings {
            menu_volume: 0.3,
            game_volume: 0.8,
            best_score: 1234,
        };
        save(&path, &out).unwrap();
        let back = load(&path).unwrap();
        assert_eq!(back, out);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_yields_defaults() {
        let store = SettingsStore::load_or_default(Some(PathBuf::from(
            "/definitely/not/a/real/path/settings.json",
        )));
        assert_eq!(store.current, Settings::default());
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let dir = std::env::temp_dir().join("lane-runner-settings-test");
        let path = dir.join("garbage.json");
        fs::create_dir_all(&dir).unwrap();
        fs::write(&path, "not json at all").unwrap();

        let store = SettingsStore::load_or_default(Some(path.clone()));
        assert_eq!(store.current, Settings::default());

        fs::remove_file(&path).unwrap();
    }
}
