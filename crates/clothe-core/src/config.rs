//! Configuration management for Clothe.
//!
//! Loads configuration from ${CLOTHE_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::backend::{BackendConfig, DEFAULT_BACKEND_URL};

/// Environment variable that overrides the configured backend URL.
pub const BACKEND_URL_ENV: &str = "CLOTHE_BACKEND_URL";

pub mod paths {
    //! Path resolution for Clothe configuration and data directories.
    //!
    //! CLOTHE_HOME resolution order:
    //! 1. CLOTHE_HOME environment variable (if set)
    //! 2. ~/.config/clothe (default)

    use std::path::PathBuf;

    /// Returns the Clothe home directory.
    pub fn clothe_home() -> PathBuf {
        if let Ok(home) = std::env::var("CLOTHE_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".clothe"),
            |h| h.join(".config").join("clothe"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        clothe_home().join("config.toml")
    }

    /// Returns the directory that holds log files.
    pub fn logs_dir() -> PathBuf {
        clothe_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the outfit backend (env `CLOTHE_BACKEND_URL` wins over this)
    pub backend_url: Option<String>,

    /// Timeout for a single backend request in seconds (0 disables)
    pub request_timeout_secs: u32,

    /// User id sent with every request; screens use their own id when unset
    pub user_id: Option<String>,

    /// View shown at startup: "primary", "secondary" or "login"
    pub start_view: String,

    /// Default log filter when `CLOTHE_LOG` is not set
    pub log_level: String,
}

impl Config {
    const DEFAULT_REQUEST_TIMEOUT_SECS: u32 = 30;
    const DEFAULT_START_VIEW: &str = "primary";
    const DEFAULT_LOG_LEVEL: &str = "info";

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Configured user id override, ignoring blank values.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref().filter(|id| !id.trim().is_empty())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.request_timeout_secs)))
        }
    }

    /// Resolves the backend URL with precedence: env > config > default.
    ///
    /// # Errors
    /// Returns an error if the chosen URL is not a valid http(s) URL.
    pub fn resolve_backend_url(&self) -> Result<String> {
        if let Ok(env_url) = std::env::var(BACKEND_URL_ENV) {
            let trimmed = env_url.trim();
            if !trimmed.is_empty() {
                return validate_url(trimmed);
            }
        }

        if let Some(config_url) = self.backend_url.as_deref() {
            let trimmed = config_url.trim();
            if !trimmed.is_empty() {
                return validate_url(trimmed);
            }
        }

        Ok(DEFAULT_BACKEND_URL.to_string())
    }

    /// Builds the backend client settings from this config.
    ///
    /// # Errors
    /// Returns an error if the backend URL is invalid.
    pub fn backend_config(&self) -> Result<BackendConfig> {
        let base_url = self.resolve_backend_url()?;
        BackendConfig::new(&base_url, self.request_timeout())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: None,
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
            user_id: None,
            start_view: Self::DEFAULT_START_VIEW.to_string(),
            log_level: Self::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

fn validate_url(url: &str) -> Result<String> {
    url::Url::parse(url).with_context(|| format!("Invalid backend URL: {url}"))?;
    Ok(url.to_string())
}

/// Returns the commented template written by `clothe config init`.
pub fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert!(config.backend_url.is_none());
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.start_view, "primary");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_blank_user_id_is_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "user_id = \"  \"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.user_id(), None);

        fs::write(&path, "user_id = \"ana\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.user_id(), Some("ana"));
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "backend_url = \"http://localhost:9000\"\nuser_id = \"ana\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.backend_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.user_id.as_deref(), Some("ana"));
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_load_invalid_toml_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "backend_url = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn test_request_timeout_zero_disables() {
        let config = Config {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.request_timeout().is_none());
        assert_eq!(
            Config::default().request_timeout(),
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn test_invalid_config_url_is_rejected() {
        let config = Config {
            backend_url: Some("not a url".to_string()),
            ..Default::default()
        };
        // Only meaningful when the env override is absent.
        if std::env::var(BACKEND_URL_ENV).is_err() {
            assert!(config.resolve_backend_url().is_err());
        }
    }

    #[test]
    fn test_init_writes_template_and_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::init(&path).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("# backend_url ="));

        let err = Config::init(&path).unwrap_err();
        assert!(err.to_string().contains("already exists"));

        // The template itself must parse as a valid config.
        let parsed: Config = toml::from_str(default_config_template()).unwrap();
        assert_eq!(parsed.start_view, "primary");
    }
}
