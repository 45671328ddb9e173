//! Read-through cache for the ioBroker repository files.
//!
//! Each source owns one write-once slot. A slot is filled by the first
//! successful download and never replaced or cleared afterwards; failed
//! downloads leave it empty so the next call fetches again.

use async_trait::async_trait;
use std::sync::{Arc, OnceLock};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};

use super::client::{RepositoryClient, RepositoryClientConfig};
use crate::domain::error::RepositoryResult;
use crate::domain::models::{Config, EndpointsConfig, RepositorySource};
use crate::domain::ports::{RepositoryProvider, SharedRepository};
use crate::infrastructure::config::ConfigLoader;

/// Process-lifetime cache of repository payloads
///
/// Construct one per application (or per test) and share it by reference or
/// inside an `Arc`. Dropping it, or calling [`RepositoryCache::shutdown`],
/// ends every fetch still in flight.
#[derive(Debug)]
pub struct RepositoryCache {
    client: RepositoryClient,
    endpoints: EndpointsConfig,
    entries: [OnceLock<SharedRepository>; RepositorySource::ALL.len()],
    shutdown: CancellationToken,
}

impl RepositoryCache {
    /// Create an empty cache from configuration
    pub fn new(config: &Config) -> RepositoryResult<Self> {
        let client = RepositoryClient::new(&RepositoryClientConfig::from(config))?;
        Ok(Self::with_client(client, config.endpoints.clone()))
    }

    /// Create an empty cache from configuration files and the environment
    ///
    /// The GitHub token is read from `IOBBOT_GITHUB_TOKEN` here, once.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = ConfigLoader::load()?;
        Ok(Self::new(&config)?)
    }

    /// Create an empty cache around an existing client
    pub fn with_client(client: RepositoryClient, endpoints: EndpointsConfig) -> Self {
        Self {
            client,
            endpoints,
            entries: Default::default(),
            shutdown: CancellationToken::new(),
        }
    }

    /// Current latest repository from the canonical origin
    pub async fn get_latest_repo(&self) -> RepositoryResult<SharedRepository> {
        self.get_repo(RepositorySource::Latest).await
    }

    /// Current stable repository from the canonical origin
    pub async fn get_stable_repo(&self) -> RepositoryResult<SharedRepository> {
        self.get_repo(RepositorySource::Stable).await
    }

    /// Current latest repository from the mirror origin
    pub async fn get_latest_repo_live(&self) -> RepositoryResult<SharedRepository> {
        self.get_repo(RepositorySource::LatestLive).await
    }

    /// Current stable repository from the mirror origin
    pub async fn get_stable_repo_live(&self) -> RepositoryResult<SharedRepository> {
        self.get_repo(RepositorySource::StableLive).await
    }

    /// Return the payload for `source`, downloading it on first use
    #[instrument(skip(self, source), fields(source = %source))]
    pub async fn get_repo(&self, source: RepositorySource) -> RepositoryResult<SharedRepository> {
        if let Some(cached) = self.cached(source) {
            debug!("Serving cached repository");
            return Ok(cached);
        }

        let url = self.url_for(source);
        info!("retrieving \"{url}\"");

        match self.client.fetch_json(&url, &self.shutdown).await {
            Ok(body) => {
                let body = Arc::new(body);
                // A concurrent fetch may have filled the slot first; it keeps its value
                if self.entry(source).set(Arc::clone(&body)).is_err() {
                    debug!("Cache entry was filled by a concurrent fetch");
                }
                Ok(body)
            }
            Err(err) => {
                error!("Error: cannot download \"{url}\": {err}");
                Err(err)
            }
        }
    }

    /// Cached payload for `source`, without any I/O
    pub fn cached(&self, source: RepositorySource) -> Option<SharedRepository> {
        self.entry(source).get().cloned()
    }

    /// Whether `source` has been downloaded successfully
    pub fn is_cached(&self, source: RepositorySource) -> bool {
        self.entry(source).get().is_some()
    }

    /// URL `source` is downloaded from
    pub fn url_for(&self, source: RepositorySource) -> String {
        source.url(&self.endpoints)
    }

    /// Abort every fetch in flight and refuse new downloads
    ///
    /// Payloads already cached stay available.
    pub fn shutdown(&self) {
        info!("Shutting down repository cache");
        self.shutdown.cancel();
    }

    fn entry(&self, source: RepositorySource) -> &OnceLock<SharedRepository> {
        &self.entries[source.slot()]
    }
}

impl Drop for RepositoryCache {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

#[async_trait]
impl RepositoryProvider for RepositoryCache {
    async fn get_repo(&self, source: RepositorySource) -> RepositoryResult<SharedRepository> {
        Self::get_repo(self, source).await
    }
}
