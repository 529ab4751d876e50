//! Configuration management for StreamHub
//!
//! Handles config file loading/saving and base URL resolution.
//! Config is stored at ~/.config/streamhub/config.toml

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::session::FileTokenStore;

/// Base URL used when neither the environment nor the config file set one
pub const DEFAULT_BASE_URL: &str = "https://mzhyi8cqgj06.manus.space/api";

/// Environment variable overriding the API base URL
pub const BASE_URL_ENV: &str = "STREAMHUB_API_URL";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API base URL (e.g. https://host/api)
    pub base_url: Option<String>,
    /// Where the session token is persisted
    pub token_path: Option<PathBuf>,
}

impl Config {
    /// Get config file path (~/.config/streamhub/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("streamhub").join("config.toml"))
    }

    /// Load config from the default file, or return default if not found
    pub fn load() -> Self {
        Self::path()
            .map(|p| Self::load_from(&p))
            .unwrap_or_default()
    }

    /// Load config from a specific file, or return default if unreadable
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(s) => toml::from_str(&s).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save config to the default file
    pub fn save(&self) -> Result<()> {
        let path = Self::path().ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
        self.save_to(&path)
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// Resolve the API base URL:
    /// 1. Environment variable STREAMHUB_API_URL
    /// 2. `base_url` from the config file
    /// 3. Built-in default
    pub fn resolve_base_url(&self) -> String {
        let env = std::env::var(BASE_URL_ENV).ok();
        Self::pick_base_url(env.as_deref(), self.base_url.as_deref())
    }

    fn pick_base_url(env: Option<&str>, file: Option<&str>) -> String {
        let url = env
            .filter(|s| !s.trim().is_empty())
            .or(file.filter(|s| !s.trim().is_empty()))
            .unwrap_or(DEFAULT_BASE_URL);
        url.trim().trim_end_matches('/').to_string()
    }

    /// Resolve where the session token lives
    pub fn resolve_token_path(&self) -> PathBuf {
        self.token_path
            .clone()
            .or_else(FileTokenStore::default_path)
            .unwrap_or_else(|| PathBuf::from("streamhub-session.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.base_url.is_none());
        assert!(config.token_path.is_none());
    }

    #[test]
    fn test_base_url_precedence() {
        assert_eq!(
            Config::pick_base_url(Some("http://env/api"), Some("http://file/api")),
            "http://env/api"
        );
        assert_eq!(
            Config::pick_base_url(None, Some("http://file/api/")),
            "http://file/api"
        );
        assert_eq!(Config::pick_base_url(Some("  "), None), DEFAULT_BASE_URL);
        assert_eq!(Config::pick_base_url(None, None), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            base_url: Some("http://localhost:5000/api".into()),
            token_path: Some(dir.path().join("session.toml")),
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path);
        assert_eq!(loaded.base_url.as_deref(), Some("http://localhost:5000/api"));
        assert_eq!(loaded.resolve_token_path(), dir.path().join("session.toml"));
    }

    #[test]
    fn test_malformed_config_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = [not toml").unwrap();

        let loaded = Config::load_from(&path);
        assert!(loaded.base_url.is_none());
    }
}
