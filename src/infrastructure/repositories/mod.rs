//! Repository download and caching
//!
//! - `client`: header profile, bounded downloads, error classification
//! - `cache`: write-once per-source cache with the accessor operations

pub mod cache;
pub mod client;

pub use cache::RepositoryCache;
pub use client::{RepositoryClient, RepositoryClientConfig, DEFAULT_TIMEOUT_MS, USER_AGENT};
