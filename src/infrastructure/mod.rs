//! Infrastructure layer module
//!
//! This module contains the adapters to the outside world:
//! - Repository HTTP client and read-through cache
//! - Configuration management
//! - Logging infrastructure
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod logging;
pub mod repositories;
