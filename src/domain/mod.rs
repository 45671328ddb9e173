//! Domain layer for the ioBroker repository cache
//!
//! This module contains the source descriptors, configuration models,
//! error types and port traits.

pub mod error;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use error::{RepositoryError, RepositoryResult};
