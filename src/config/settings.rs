use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Port the backend listens on when no explicit URL is configured.
pub const DEFAULT_API_PORT: u16 = 8225;

fn default_scheme() -> String {
    "http".to_string()
}
fn default_host() -> String {
    "localhost".to_string()
}
fn default_port() -> u16 {
    DEFAULT_API_PORT
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Full base URL, e.g. "http://192.168.1.20:8225". Overrides host/port.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_scheme")]
    pub scheme: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            scheme: default_scheme(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ApiConfig {
    /// Explicit override (flag or environment) first, then the configured
    /// base URL, then scheme://host:port.
    pub fn resolve_base_url(&self, override_url: Option<&str>) -> String {
        let chosen = override_url
            .filter(|u| !u.trim().is_empty())
            .map(str::to_string)
            .or_else(|| self.base_url.clone().filter(|u| !u.trim().is_empty()))
            .unwrap_or_else(|| format!("{}://{}:{}", self.scheme, self.host, self.port));
        chosen.trim().trim_end_matches('/').to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "sinister")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn preferences_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("preferences.json"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.api.port, DEFAULT_API_PORT);
        assert_eq!(config.api.resolve_base_url(None), "http://localhost:8225");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nhost = \"192.168.1.175\"\n").unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.api.resolve_base_url(None), "http://192.168.1.175:8225");
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.api.base_url = Some("https://kb.example.net/".to_string());
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.api.resolve_base_url(None), "https://kb.example.net");
    }

    #[test]
    fn override_wins() {
        let mut api = ApiConfig::default();
        api.base_url = Some("http://configured:1".to_string());
        assert_eq!(api.resolve_base_url(Some("http://flag:2/")), "http://flag:2");
        assert_eq!(api.resolve_base_url(Some("  ")), "http://configured:1");
        assert_eq!(api.resolve_base_url(None), "http://configured:1");
    }
}
