//! Error types for the core domain.

use thiserror::Error;

/// Core domain error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid namespace: {0}")]
    InvalidNamespace(String),

    #[error("invalid provider name: {0}")]
    InvalidName(String),

    #[error("invalid provider version: {0}")]
    InvalidVersion(String),

    #[error("invalid platform: {0}")]
    InvalidPlatform(String),

    #[error("duplicate platform {os}/{arch} in version {version}")]
    DuplicatePlatform {
        version: String,
        os: String,
        arch: String,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
