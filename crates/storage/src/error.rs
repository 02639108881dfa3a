//! Catalog error types.

use thiserror::Error;

/// Catalog operation faults.
///
/// An absent provider is not an error; reads report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed provider document {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("S3 error: {0}")]
    S3(#[from] Box<dyn std::error::Error + Send + Sync>),

    #[error("catalog is read-only")]
    ReadOnly,

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for catalog operations.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
