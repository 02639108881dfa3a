//! In-process catalog backend.

use crate::error::CatalogResult;
use crate::traits::VersionCatalog;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tfreg_core::{ProviderKey, ProviderVersions};
use tracing::instrument;

/// In-memory version catalog.
///
/// Keys are spread over the map's shards, each behind its own read/write
/// lock, so writers to different providers do not contend. A shard's write
/// lock is held only to swap the stored `Arc`; readers clone the `Arc` and
/// never observe a partially built collection.
#[derive(Default)]
pub struct MemoryBackend {
    providers: DashMap<ProviderKey, Arc<ProviderVersions>>,
}

impl MemoryBackend {
    /// Create an empty memory catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of providers stored.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[async_trait]
impl VersionCatalog for MemoryBackend {
    #[instrument(skip(self), fields(backend = "memory"))]
    async fn read(&self, key: &ProviderKey) -> CatalogResult<Option<ProviderVersions>> {
        let snapshot = self.providers.get(key).map(|entry| Arc::clone(entry.value()));
        Ok(snapshot.map(|versions| versions.as_ref().clone()))
    }

    #[instrument(skip(self, versions), fields(backend = "memory", count = versions.versions.len()))]
    async fn write(&self, key: &ProviderKey, versions: ProviderVersions) -> CatalogResult<()> {
        self.providers.insert(key.clone(), Arc::new(versions));
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
