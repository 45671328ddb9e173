//! Domain models: repository sources and configuration

pub mod config;
pub mod source;

pub use config::{Config, EndpointsConfig, LoggingConfig};
pub use source::{
    RepositorySource, CANONICAL_BASE_URL, IOBROKER_SOURCES_LATEST, IOBROKER_SOURCES_LATEST_LIVE,
    IOBROKER_SOURCES_STABLE, IOBROKER_SOURCES_STABLE_LIVE, MIRROR_BASE_URL,
};
