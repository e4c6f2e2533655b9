//! Application configuration management
//!
//! Handles loading and saving application settings including:
//! - Booking backend base URL
//! - Default sort key for the room list

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::view::SortKey;
use crate::error::{ConciergeError, Result};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the booking backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Default sort key for the room list
    #[serde(default)]
    pub sort_by: SortKey,
}

fn default_base_url() -> String {
    crate::api::client::DEFAULT_BASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            sort_by: SortKey::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, or create default if not exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "concierge-rs", "concierge-rs")
            .ok_or_else(|| ConciergeError::Config("Could not determine config directory".into()))?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// Set the base URL after validating it parses as an HTTP(S) URL
    pub fn set_base_url(&mut self, url: &str) -> Result<()> {
        let parsed = Url::parse(url).map_err(|_| ConciergeError::InvalidBaseUrl(url.to_string()))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConciergeError::InvalidBaseUrl(url.to_string()));
        }

        self.base_url = url.trim_end_matches('/').to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.sort_by, SortKey::Price);
    }

    #[test]
    fn test_set_base_url_validates_scheme() {
        let mut config = Config::default();
        assert!(config.set_base_url("https://rooms.example.com/").is_ok());
        assert_eq!(config.base_url, "https://rooms.example.com");

        assert!(config.set_base_url("not a url").is_err());
        assert!(config.set_base_url("ftp://rooms.example.com").is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.set_base_url("http://10.0.0.2:8080").unwrap();
        config.sort_by = SortKey::Rating;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.base_url, "http://10.0.0.2:8080");
        assert_eq!(loaded.sort_by, SortKey::Rating);
    }

    #[test]
    fn test_load_missing_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(loaded.base_url, Config::default().base_url);
    }
}
