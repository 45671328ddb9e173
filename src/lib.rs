//! ioBroker repository access
//!
//! Fetches the ioBroker adapter repositories (`sources-dist.json` and
//! `sources-dist-latest.json`) from the canonical and mirror origins, caches
//! each payload in memory after the first successful download, and provides
//! helpers that extract adapter names and URLs from the payloads.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): source descriptors, configuration, errors, ports
//! - **Infrastructure Layer** (`infrastructure`): HTTP client, cache, config loading, logging
//! - **Service Layer** (`services`): adapter helpers
//!
//! # Example
//!
//! ```no_run
//! use iobroker_repositories::{get_adapter_urls, RepositoryCache};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cache = RepositoryCache::from_env()?;
//!     let stable = cache.get_stable_repo().await?;
//!     for (name, url) in get_adapter_urls(&stable) {
//!         println!("{name}: {url}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Config, EndpointsConfig, LoggingConfig, RepositorySource, IOBROKER_SOURCES_LATEST,
    IOBROKER_SOURCES_LATEST_LIVE, IOBROKER_SOURCES_STABLE, IOBROKER_SOURCES_STABLE_LIVE,
};
pub use domain::ports::{RepositoryProvider, SharedRepository};
pub use domain::{RepositoryError, RepositoryResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::logging::{LogConfig, LoggerImpl};
pub use infrastructure::repositories::{RepositoryCache, RepositoryClient, RepositoryClientConfig};
pub use services::{
    adapter_entries, extract_adapter_name, get_adapter_urls, get_latest_adapters,
    get_stable_adapters,
};
