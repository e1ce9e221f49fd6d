use crate::theme::Theme;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const APP_DIR_NAME: &str = "AnalogTrayClock";
pub const SETTINGS_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = "analog_tray_clock.log";

/// Persisted preferences, stored as `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Theme chosen through the tray menu. When absent the desktop theme is
    /// used instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_theme: Option<bool>,
    /// When enabled the application initialises the logger at debug level.
    /// Defaults to `false` when the field is missing in the settings file.
    #[serde(default)]
    pub debug_logging: bool,
}

impl Settings {
    pub fn theme(&self) -> Option<Theme> {
        self.dark_theme.map(Theme::from_dark_flag)
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.dark_theme = Some(theme.is_dark());
    }
}

/// Per-user application folder, `<local app data>/AnalogTrayClock`.
pub fn app_dir() -> Option<PathBuf> {
    dirs_next::data_local_dir().map(|dir| dir.join(APP_DIR_NAME))
}

pub fn log_path() -> Option<PathBuf> {
    app_dir().map(|dir| dir.join(LOG_FILE_NAME))
}

/// Reads and writes [`Settings`] at a fixed location. Each call opens, uses
/// and closes the file; no handle is held in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsStore {
    path: Option<PathBuf>,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Store rooted in the per-user application folder. If the platform has
    /// no local data directory the store has no location: loads report
    /// nothing stored and saves fail.
    pub fn locate() -> Self {
        Self {
            path: app_dir().map(|dir| dir.join(SETTINGS_FILE_NAME)),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// `Ok(None)` when there is no settings file. An empty file counts as
    /// default settings.
    pub fn load(&self) -> Result<Option<Settings>> {
        let Some(path) = self.path.as_deref() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read settings file {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Some(Settings::default()));
        }

        let settings = serde_json::from_str(&content)
            .with_context(|| format!("deserialize settings file {}", path.display()))?;
        Ok(Some(settings))
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        let path = self
            .path
            .as_deref()
            .ok_or_else(|| anyhow!("no local data directory to store settings in"))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create settings folder {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(settings).context("serialize settings")?;
        std::fs::write(path, json)
            .with_context(|| format!("write settings file {}", path.display()))
    }
}

/// Turns the outcome of [`SettingsStore::load`] into usable settings. A
/// missing or unreadable file yields defaults, which leave the theme to the
/// desktop.
pub fn settings_or_default(loaded: Result<Option<Settings>>) -> Settings {
    match loaded {
        Ok(Some(settings)) => settings,
        Ok(None) => {
            tracing::debug!("no stored settings; using defaults");
            Settings::default()
        }
        Err(err) => {
            tracing::warn!(error = %format!("{err:#}"), "ignoring unreadable settings");
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_as_nothing_stored() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = SettingsStore::new(dir.path().join(SETTINGS_FILE_NAME));
        assert_eq!(store.load().expect("load"), None);
    }

    #[test]
    fn store_without_location_loads_nothing_and_refuses_to_save() {
        let store = SettingsStore { path: None };
        assert_eq!(store.load().expect("load"), None);
        assert!(store.save(&Settings::default()).is_err());
    }

    #[test]
    fn empty_file_loads_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, "  \n").expect("write");

        let loaded = SettingsStore::new(&path).load().expect("load");
        assert_eq!(loaded, Some(Settings::default()));
    }

    #[test]
    fn save_creates_parent_folder() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(APP_DIR_NAME).join(SETTINGS_FILE_NAME);
        let store = SettingsStore::new(&path);

        let mut settings = Settings::default();
        settings.set_theme(Theme::Light);
        store.save(&settings).expect("save");

        assert!(path.exists());
        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["dark_theme"], serde_json::Value::Bool(false));
    }

    #[test]
    fn missing_theme_key_means_no_preference() {
        let settings: Settings = serde_json::from_str(r#"{"debug_logging":true}"#).unwrap();
        assert_eq!(settings.theme(), None);
        assert!(settings.debug_logging);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let settings: Settings =
            serde_json::from_str(r#"{"dark_theme":true,"window":"left"}"#).unwrap();
        assert_eq!(settings.theme(), Some(Theme::Dark));
    }

    #[test]
    fn unreadable_settings_fall_back_to_defaults() {
        let settings = settings_or_default(Err(anyhow!("boom")));
        assert_eq!(settings, Settings::default());
    }
}
