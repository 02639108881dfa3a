//! Version catalog abstraction and backends for tfreg.
//!
//! This crate provides:
//! - The `VersionCatalog` trait mapping a provider key to its versions
//! - Backends: in-process map, local filesystem and S3-compatible

pub mod backends;
pub mod error;
pub mod traits;

pub use backends::filesystem::FilesystemBackend;
pub use backends::memory::MemoryBackend;
pub use backends::s3::{S3Backend, S3Settings};
pub use error::{CatalogError, CatalogResult};
pub use traits::VersionCatalog;

use std::sync::Arc;
use tfreg_core::config::CatalogConfig;

/// Create a version catalog from configuration.
pub async fn from_config(config: &CatalogConfig) -> CatalogResult<Arc<dyn VersionCatalog>> {
    config.validate().map_err(CatalogError::Config)?;

    match config {
        CatalogConfig::Memory => Ok(Arc::new(MemoryBackend::new())),
        CatalogConfig::Filesystem { path, read_only } => {
            let backend = if *read_only {
                FilesystemBackend::read_only(path).await?
            } else {
                FilesystemBackend::new(path).await?
            };
            Ok(Arc::new(backend))
        }
        CatalogConfig::S3 {
            bucket,
            endpoint,
            region,
            prefix,
            kind,
            access_key_id,
            secret_access_key,
            force_path_style,
        } => {
            let backend = S3Backend::new(S3Settings {
                bucket: bucket.clone(),
                endpoint: endpoint.clone(),
                region: region.clone(),
                prefix: prefix.clone(),
                kind: kind.clone(),
                access_key_id: access_key_id.clone(),
                secret_access_key: secret_access_key.clone(),
                force_path_style: *force_path_style,
            })
            .await?;
            Ok(Arc::new(backend))
        }
    }
}
