//! Configuration management for sitecheck
//!
//! Handles loading, saving, and validating configuration from TOML files.

mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Page fetch configuration
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Paths configuration (internal, not user-editable)
    #[serde(skip)]
    pub paths: PathsConfig,
}

/// Page fetch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,

    /// User agent string
    #[serde(default = "default_fetch_user_agent")]
    pub user_agent: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file name, resolved against the config directory
    #[serde(default = "default_db_file_name")]
    pub file_name: String,
}

/// Internal paths configuration
#[derive(Debug, Clone, Default)]
pub struct PathsConfig {
    /// Base directory for sitecheck data
    pub base_dir: PathBuf,

    /// Path to config file
    pub config_file: PathBuf,

    /// Path to SQLite database
    pub db_file: PathBuf,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout(),
            user_agent: default_fetch_user_agent(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            file_name: default_db_file_name(),
        }
    }
}

impl Config {
    /// Get the default base directory for sitecheck (~/.sitecheck)
    pub fn default_base_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".sitecheck")
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        Self::default_base_dir().join("config.toml")
    }

    fn resolve_paths(&mut self, config_file: PathBuf) {
        let base = config_file
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf();
        self.paths = PathsConfig {
            db_file: base.join(&self.database.file_name),
            config_file,
            base_dir: base,
        };
    }

    /// Load configuration from a specific file path
    pub fn load(config_path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", config_path);

        if !config_path.exists() {
            return Err(Error::NotInitialized);
        }

        let content = std::fs::read_to_string(config_path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.resolve_paths(config_path.to_path_buf());

        config.validate()?;
        Ok(config)
    }

    /// Load configuration if `config_path` exists, otherwise start from defaults
    pub fn load_or_default(config_path: &Path) -> Result<Self> {
        let mut config = if config_path.exists() {
            debug!("Loading config from {:?}", config_path);
            let content = std::fs::read_to_string(config_path)?;
            toml::from_str(&content)?
        } else {
            debug!("No config file found, using defaults");
            Config::default()
        };
        config.resolve_paths(config_path.to_path_buf());

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.paths.config_file.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&self.paths.config_file, content)?;
        info!("Saved config to {:?}", self.paths.config_file);
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.fetch.timeout_secs == 0 {
            return Err(Error::Config(
                "fetch.timeout_secs must be positive".to_string(),
            ));
        }

        if self.fetch.user_agent.trim().is_empty() {
            return Err(Error::Config(
                "fetch.user_agent must not be empty".to_string(),
            ));
        }

        if self.database.file_name.trim().is_empty() {
            return Err(Error::Config(
                "database.file_name must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.fetch.timeout_secs, 10);
        assert_eq!(config.database.file_name, "sitecheck.db");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_save_load() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::load_or_default(&tmp.path().join("config.toml")).unwrap();
        config.fetch.timeout_secs = 3;
        config.fetch.user_agent = "test-agent".to_string();

        config.save().unwrap();
        assert!(config.paths.config_file.exists());

        let loaded = Config::load(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(loaded.fetch.timeout_secs, 3);
        assert_eq!(loaded.fetch.user_agent, "test-agent");
        assert_eq!(loaded.paths.db_file, tmp.path().join("sitecheck.db"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[fetch]\ntimeout_secs = 30\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.fetch.timeout_secs, 30);
        assert!(!config.fetch.user_agent.is_empty());
        assert_eq!(config.database.file_name, "sitecheck.db");
    }

    #[test]
    fn test_missing_file_is_not_initialized() {
        let tmp = TempDir::new().unwrap();
        let result = Config::load(&tmp.path().join("config.toml"));
        assert!(matches!(result, Err(Error::NotInitialized)));
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.fetch.timeout_secs = 0;
        assert!(config.validate().is_err());

        config.fetch.timeout_secs = 5;
        assert!(config.validate().is_ok());

        config.fetch.user_agent = "   ".to_string();
        assert!(config.validate().is_err());
    }
}
