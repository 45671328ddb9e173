//! Port trait definitions
//!
//! Async trait interfaces that infrastructure adapters implement:
//! - RepositoryProvider: read-through access to repository payloads

pub mod repository_provider;

pub use repository_provider::{RepositoryProvider, SharedRepository};
