use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project configuration file, looked up in the working directory
pub const CONFIG_FILE: &str = "iobroker-repositories.yaml";

/// Prefix for environment overrides, e.g. `IOBROKER_REPOS_TIMEOUT_MS`
pub const ENV_PREFIX: &str = "IOBROKER_REPOS_";

/// Environment variable holding the GitHub token
pub const GITHUB_TOKEN_ENV: &str = "IOBBOT_GITHUB_TOKEN";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid timeout_ms: {0}. Must be greater than 0")]
    InvalidTimeout(u64),

    #[error("Invalid {name} base URL: {value:?}. Must start with http:// or https://")]
    InvalidBaseUrl { name: &'static str, value: String },

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `iobroker-repositories.yaml` in the working directory (optional)
    /// 3. Environment variables (`IOBROKER_REPOS_*` prefix, `__` separates nested keys)
    /// 4. `IOBBOT_GITHUB_TOKEN` for the GitHub token
    pub fn load() -> Result<Config> {
        let mut config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&[GITHUB_TOKEN_ENV])
                    .map(|_| "github_token".into()),
            )
            .extract()
            .context("Failed to extract configuration from figment")?;

        normalize(&mut config);
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let mut config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        normalize(&mut config);
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout(config.timeout_ms));
        }

        for (name, value) in [
            ("canonical", &config.endpoints.canonical_base),
            ("mirror", &config.endpoints.mirror_base),
        ] {
            if !is_http_url(value) {
                return Err(ConfigError::InvalidBaseUrl {
                    name,
                    value: value.clone(),
                });
            }
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}

// An empty token is treated like an absent one.
fn normalize(config: &mut Config) {
    if config
        .github_token
        .as_deref()
        .is_some_and(|token| token.trim().is_empty())
    {
        config.github_token = None;
    }
}

fn is_http_url(value: &str) -> bool {
    ["http://", "https://"]
        .iter()
        .any(|scheme| value.len() > scheme.len() && value.starts_with(scheme))
}
