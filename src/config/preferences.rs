use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::tui::theme::ThemeName;
use crate::utils::units::DisplayUnit;

fn default_true() -> bool {
    true
}

/// Keys mirror the browser's local storage entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StoredPreferences {
    #[serde(rename = "useImperial", default)]
    use_imperial: bool,
    #[serde(rename = "colorTheme", default)]
    color_theme: ThemeName,
    #[serde(rename = "workoutHistoryVisible", default = "default_true")]
    history_visible: bool,
}

impl Default for StoredPreferences {
    fn default() -> Self {
        Self {
            use_imperial: false,
            color_theme: ThemeName::default(),
            history_visible: true,
        }
    }
}

/// User preferences, loaded once at startup and handed to every consumer.
/// Each setter writes through to disk before returning.
#[derive(Debug, Clone)]
pub struct Preferences {
    path: PathBuf,
    stored: StoredPreferences,
}

impl Preferences {
    pub fn load(path: &Path) -> Result<Self> {
        let stored = if path.exists() {
            let content =
                std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
            match serde_json::from_str(&content) {
                Ok(stored) => stored,
                Err(e) => {
                    log::warn!("Ignoring unreadable preferences {:?}: {}", path, e);
                    StoredPreferences::default()
                }
            }
        } else {
            StoredPreferences::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            stored,
        })
    }

    pub fn unit(&self) -> DisplayUnit {
        DisplayUnit::from_imperial(self.stored.use_imperial)
    }

    pub fn theme(&self) -> ThemeName {
        self.stored.color_theme
    }

    pub fn history_visible(&self) -> bool {
        self.stored.history_visible
    }

    pub fn set_unit(&mut self, unit: DisplayUnit) -> Result<()> {
        self.stored.use_imperial = unit.is_imperial();
        self.persist()
    }

    pub fn set_theme(&mut self, theme: ThemeName) -> Result<()> {
        self.stored.color_theme = theme;
        self.persist()
    }

    pub fn set_history_visible(&mut self, visible: bool) -> Result<()> {
        self.stored.history_visible = visible;
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            serde_json::to_string_pretty(&self.stored).context("Serializing preferences")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Writing {:?}", self.path))?;
        log::debug!("Saved preferences to {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::load(&dir.path().join("preferences.json")).unwrap();
        assert_eq!(prefs.unit(), DisplayUnit::Metric);
        assert_eq!(prefs.theme(), ThemeName::Purple);
        assert!(prefs.history_visible());
    }

    #[test]
    fn setters_write_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("preferences.json");

        let mut prefs = Preferences::load(&path).unwrap();
        prefs.set_unit(DisplayUnit::Imperial).unwrap();
        prefs.set_theme(ThemeName::Ocean).unwrap();
        prefs.set_history_visible(false).unwrap();

        let reloaded = Preferences::load(&path).unwrap();
        assert_eq!(reloaded.unit(), DisplayUnit::Imperial);
        assert_eq!(reloaded.theme(), ThemeName::Ocean);
        assert!(!reloaded.history_visible());
    }

    #[test]
    fn uses_local_storage_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        let mut prefs = Preferences::load(&path).unwrap();
        prefs.set_unit(DisplayUnit::Imperial).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["useImperial"], true);
        assert_eq!(raw["colorTheme"], "purple");
        assert_eq!(raw["workoutHistoryVisible"], true);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, r#"{"colorTheme": "forest"}"#).unwrap();
        let prefs = Preferences::load(&path).unwrap();
        assert_eq!(prefs.theme(), ThemeName::Forest);
        assert_eq!(prefs.unit(), DisplayUnit::Metric);
        assert!(prefs.history_visible());
    }

    #[test]
    fn corrupt_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "not json").unwrap();
        let prefs = Preferences::load(&path).unwrap();
        assert_eq!(prefs.unit(), DisplayUnit::Metric);
    }
}
