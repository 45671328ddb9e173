use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::source::{CANONICAL_BASE_URL, MIRROR_BASE_URL};

/// Main configuration structure for the repository cache
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Upper bound for a single repository download, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// GitHub token sent as `Authorization: token <X>`
    #[serde(default)]
    pub github_token: Option<String>,

    /// Origin base URLs
    #[serde(default)]
    pub endpoints: EndpointsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

const fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            github_token: None,
            endpoints: EndpointsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Base URLs the repository files are requested from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct EndpointsConfig {
    /// Canonical origin (`download.iobroker.net`)
    #[serde(default = "default_canonical_base")]
    pub canonical_base: String,

    /// Mirror origin (`repo.iobroker.live`)
    #[serde(default = "default_mirror_base")]
    pub mirror_base: String,
}

fn default_canonical_base() -> String {
    CANONICAL_BASE_URL.to_string()
}

fn default_mirror_base() -> String {
    MIRROR_BASE_URL.to_string()
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            canonical_base: default_canonical_base(),
            mirror_base: default_mirror_base(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stdout only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}
