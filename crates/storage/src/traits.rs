//! Catalog trait definitions.

use crate::error::CatalogResult;
use async_trait::async_trait;
use tfreg_core::{ProviderKey, ProviderVersions};

/// Maps a provider key to the full set of its published versions.
///
/// Every backend reports reads three ways: `Ok(Some(_))` when the provider
/// exists, `Ok(None)` when it does not, and `Err(_)` on a backend fault.
#[async_trait]
pub trait VersionCatalog: Send + Sync + 'static {
    /// Read all versions stored for a provider.
    async fn read(&self, key: &ProviderKey) -> CatalogResult<Option<ProviderVersions>>;

    /// Replace all versions stored for a provider.
    ///
    /// The stored value is swapped as a whole; concurrent readers observe
    /// either the previous or the new collection.
    async fn write(&self, key: &ProviderKey, versions: ProviderVersions) -> CatalogResult<()>;

    /// Get the name of this catalog backend.
    ///
    /// Returns a static identifier (e.g., "memory", "filesystem", "s3") used for logging.
    fn backend_name(&self) -> &'static str;
}

/// Serialize a provider document the way every persistent backend stores it.
pub(crate) fn encode_document(
    key: &ProviderKey,
    versions: &ProviderVersions,
) -> CatalogResult<Vec<u8>> {
    serde_json::to_vec_pretty(versions).map_err(|source| crate::CatalogError::Serialization {
        key: key.storage_key(),
        source,
    })
}

/// Parse a stored provider document.
pub(crate) fn decode_document(key: &ProviderKey, data: &[u8]) -> CatalogResult<ProviderVersions> {
    serde_json::from_slice(data).map_err(|source| crate::CatalogError::Serialization {
        key: key.storage_key(),
        source,
    })
}
