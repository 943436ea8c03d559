//! Shared library for the ap2mal list converter.
//!
//! This crate provides common functionality used by the binary crate:
//! - Configuration management
//! - Data models for list entries and export records
//! - Logging infrastructure

pub mod config;
pub mod logging;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use logging::LogConfig;
pub use models::*;

/// Common result type using anyhow::Error
pub type Result<T> = anyhow::Result<T>;
