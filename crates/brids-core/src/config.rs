//! Configuration management for brazilian-ids.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default root of the Correios site hosting the CEP range search.
pub const DEFAULT_CORREIOS_URL: &str = "https://www2.correios.com.br";

/// Browser-like user agent presented to the Correios site.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:129.0) Gecko/20100101 Firefox/129.0";

/// Main application configuration.
///
/// This is loaded from `~/.config/brids/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Correios range lookup settings
    pub correios: CorreiosConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the default path, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, falling back to defaults if not found.
    pub fn load_from(config_path: &Path) -> ConfigResult<Self> {
        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(config_path)?;
            let config: Self = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `BRIDS_CORREIOS_URL`: Override the Correios root URL
    /// - `BRIDS_USER_AGENT`: Override the user agent string
    /// - `BRIDS_TIMEOUT_SECS`: Override the request timeout
    pub fn load_with_env(config_path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides using the given variable lookup.
    ///
    /// Unparseable values are ignored, leaving the current setting in place.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("BRIDS_CORREIOS_URL") {
            tracing::debug!("Override correios.root_url from env: {}", url);
            self.correios.root_url = url;
        }

        if let Some(agent) = lookup("BRIDS_USER_AGENT") {
            tracing::debug!("Override correios.user_agent from env");
            self.correios.user_agent = agent;
        }

        if let Some(val) = lookup("BRIDS_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.correios.timeout_secs = secs;
                tracing::debug!("Override correios.timeout_secs from env: {}", secs);
            }
        }
    }

    /// Check values that would otherwise fail much later, at request time.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.correios.root_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "correios.root_url".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.correios.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "correios.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Save configuration to the given path.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, config_path: &Path) -> ConfigResult<()> {
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/brids/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("br", "brids", "brids").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Correios range lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorreiosConfig {
    /// Site root, without trailing slash
    pub root_url: String,
    /// User agent string sent with every request
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for CorreiosConfig {
    fn default() -> Self {
        Self {
            root_url: DEFAULT_CORREIOS_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,brids=debug".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.correios.root_url, "https://www2.correios.com.br");
        assert!(config.correios.user_agent.starts_with("Mozilla/5.0"));
        assert_eq!(config.correios.timeout_secs, 30);
        assert_eq!(config.logging.filter, "info,brids=debug");
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[correios]"));
        assert!(toml_str.contains("[logging]"));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.correios.root_url, config.correios.root_url);
    }

    #[test]
    fn test_config_save_load() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.correios.root_url = "http://localhost:8080".to_string();
        config.correios.timeout_secs = 5;

        config.save_to(&config_path).expect("save config");
        let loaded = AppConfig::load_from(&config_path).expect("load config");

        assert_eq!(loaded.correios.root_url, "http://localhost:8080");
        assert_eq!(loaded.correios.timeout_secs, 5);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let tmp = TempDir::new().expect("create temp dir");
        let loaded =
            AppConfig::load_from(&tmp.path().join("absent.toml")).expect("load defaults");
        assert_eq!(loaded.correios.timeout_secs, 30);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("BRIDS_CORREIOS_URL", "http://127.0.0.1:9000"),
            ("BRIDS_TIMEOUT_SECS", "12"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| vars.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.correios.root_url, "http://127.0.0.1:9000");
        assert_eq!(config.correios.timeout_secs, 12);
        assert_eq!(config.correios.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_env_override_ignores_garbage_timeout() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| {
            (key == "BRIDS_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert_eq!(config.correios.timeout_secs, 30);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[correios]
timeout_secs = 10
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.correios.timeout_secs, 10);
        // These should be defaults
        assert_eq!(config.correios.root_url, DEFAULT_CORREIOS_URL);
        assert_eq!(config.logging.filter, "info,brids=debug");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = AppConfig::default();
        config.correios.timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
