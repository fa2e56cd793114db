//! Configuration management for datadash
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{DashError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Environment variable overriding the API base URL.
///
/// Kept under its historical name so existing deployments keep working.
pub const BASE_URL_ENV: &str = "NEXT_PUBLIC_API_BASE_URL";

/// Main configuration structure for datadash
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Durable storage settings for the session store
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every request path is appended to
    ///
    /// May be absolute (`https://host/api`) or relative (`/api`); a relative
    /// value is resolved against `origin`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Origin used to resolve a relative `base_url`
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Optional bearer token attached to every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_base_url() -> String {
    "/api".to_string()
}

fn default_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            origin: default_origin(),
            timeout_seconds: default_timeout_seconds(),
            token: None,
        }
    }
}

/// Session storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Directory of the sled database holding the session slot
    ///
    /// When `None`, the platform data directory is used.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DashError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| DashError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            tracing::debug!(base_url = %base_url, "Env override: {}", BASE_URL_ENV);
            self.api.base_url = base_url;
        }

        if let Ok(origin) = std::env::var("DATADASH_API_ORIGIN") {
            self.api.origin = origin;
        }

        if let Ok(timeout) = std::env::var("DATADASH_API_TIMEOUT_SECONDS") {
            match timeout.parse::<u64>() {
                Ok(v) => self.api.timeout_seconds = v,
                Err(_) => {
                    tracing::warn!("Invalid DATADASH_API_TIMEOUT_SECONDS: {}", timeout);
                }
            }
        }

        if let Ok(token) = std::env::var("DATADASH_API_TOKEN") {
            if !token.is_empty() {
                self.api.token = Some(token);
            }
        }

        if let Ok(storage_path) = std::env::var("DATADASH_STORAGE_PATH") {
            self.storage.path = Some(PathBuf::from(storage_path));
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let Some(storage_path) = &cli.storage_path {
            tracing::info!("Using storage path override from CLI: {}", storage_path);
            self.storage.path = Some(PathBuf::from(storage_path));
        }
    }

    /// Resolve `api.base_url` into an absolute URL
    ///
    /// # Errors
    ///
    /// Returns `DashError::Config` if neither the base URL nor its
    /// resolution against `api.origin` yields a valid URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use datadash::Config;
    ///
    /// let config = Config::default();
    /// let url = config.resolved_base_url().unwrap();
    /// assert_eq!(url.as_str(), "http://localhost:3000/api");
    /// ```
    pub fn resolved_base_url(&self) -> Result<Url> {
        let base = self.api.base_url.trim();
        if let Ok(url) = Url::parse(base) {
            return Ok(url);
        }

        let origin = Url::parse(&self.api.origin).map_err(|e| {
            DashError::Config(format!("Invalid api.origin '{}': {}", self.api.origin, e))
        })?;
        origin.join(base).map_err(|e| {
            DashError::Config(format!("Invalid api.base_url '{}': {}", base, e)).into()
        })
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(DashError::Config("api.base_url cannot be empty".to_string()).into());
        }

        if self.api.timeout_seconds == 0 {
            return Err(DashError::Config(
                "api.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        let url = self.resolved_base_url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DashError::Config(format!(
                "api.base_url must resolve to an http(s) URL, got {}",
                url
            ))
            .into());
        }

        Ok(())
    }
}
