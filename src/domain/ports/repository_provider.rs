use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::error::RepositoryResult;
use crate::domain::models::RepositorySource;

/// Shared, read-only repository payload
pub type SharedRepository = Arc<Value>;

/// Source of repository payloads
///
/// Implemented by the read-through cache; the adapter helpers only depend on
/// this trait so they can be exercised without network access.
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    /// Return the payload for `source`, fetching it if necessary
    async fn get_repo(&self, source: RepositorySource) -> RepositoryResult<SharedRepository>;
}
