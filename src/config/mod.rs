//! Configuration management for the ScanOps CLI

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// ScanOps API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Platform base URL, when not using the hosted service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".scanops").join("config.yaml"))
    }

    /// Resolve the effective config path from an optional override
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Self::default_path(),
        }
    }

    /// Load configuration, tolerating a missing default file.
    ///
    /// An explicitly passed path must exist; with no override, a missing
    /// default config simply yields `Config::default()` so commands against
    /// open or self-hosted installs work without running `init` first.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let resolved = Self::resolve_path(path)?;
        if !resolved.exists() {
            if path.is_some() {
                return Err(ConfigError::NotFound.into());
            }
            return Ok(Config::default());
        }

        let contents = std::fs::read_to_string(&resolved)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to the resolved path
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        let resolved = Self::resolve_path(path)?;

        if let Some(parent) = resolved.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&resolved, contents)?;

        // The config holds an API key; keep it private on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&resolved)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&resolved, perms)?;
        }

        Ok(())
    }
}
