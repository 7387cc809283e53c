use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::CatalogSource;

const APP_NAME: &str = "taro";
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the catalog source.
pub const CATALOG_ENV: &str = "TARO_CATALOG";
/// Environment variable overriding the database path.
pub const DATABASE_ENV: &str = "TARO_DATABASE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Card data source: `embedded`, a file path or an http(s) URL.
    pub catalog: String,
    /// SQLite database path. Defaults to the platform data directory.
    pub database_path: Option<PathBuf>,
    /// Port for `taro serve`.
    pub port: u16,
    /// Pause between completing a selection and showing the reading.
    pub reading_delay_ms: u64,
    /// How long toasts stay visible.
    pub notice_ms: u64,
    /// How long success notices stay visible.
    pub success_notice_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: "embedded".to_string(),
            database_path: None,
            port: 3000,
            reading_delay_ms: 2000,
            notice_ms: 2000,
            success_notice_ms: 3000,
        }
    }
}

impl Config {
    /// Load configuration from the user's config directory, then apply
    /// environment overrides.
    /// Returns defaults if the file doesn't exist or fails to parse.
    pub fn load() -> Self {
        let config = match get_config_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        config.with_env()
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;

        let config = serde_json::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    fn with_env(mut self) -> Self {
        if let Ok(catalog) = std::env::var(CATALOG_ENV) {
            self.catalog = catalog;
        }
        if let Ok(path) = std::env::var(DATABASE_ENV) {
            self.database_path = Some(PathBuf::from(path));
        }
        self
    }

    /// Save the current configuration to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    pub fn catalog_source(&self) -> CatalogSource {
        CatalogSource::parse(&self.catalog)
    }

    pub fn reading_delay(&self) -> Duration {
        Duration::from_millis(self.reading_delay_ms)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_ms)
    }

    pub fn success_notice_duration(&self) -> Duration {
        Duration::from_millis(self.success_notice_ms)
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"port": 8080, "reading_delay_ms": 0}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.reading_delay(), Duration::ZERO);
        assert_eq!(config.catalog_source(), CatalogSource::Embedded);
        assert_eq!(config.success_notice_duration(), Duration::from_secs(3));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            catalog: "https://example.com/cards.json".to_string(),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_garbage_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
