//! Catalog test doubles.

use async_trait::async_trait;
use tfreg_core::{ProviderKey, ProviderVersions};
use tfreg_storage::{CatalogError, CatalogResult, MemoryBackend, VersionCatalog};

/// A memory catalog that can be told to fail reads or writes.
#[allow(dead_code)]
#[derive(Default)]
pub struct FailingCatalog {
    pub inner: MemoryBackend,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

#[allow(dead_code)]
impl FailingCatalog {
    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Default::default()
        }
    }

    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Default::default()
        }
    }
}

fn injected(op: &str) -> CatalogError {
    CatalogError::Io(std::io::Error::other(format!("injected {op} failure")))
}

#[async_trait]
impl VersionCatalog for FailingCatalog {
    async fn read(&self, key: &ProviderKey) -> CatalogResult<Option<ProviderVersions>> {
        if self.fail_reads {
            return Err(injected("read"));
        }
        self.inner.read(key).await
    }

    async fn write(&self, key: &ProviderKey, versions: ProviderVersions) -> CatalogResult<()> {
        if self.fail_writes {
            return Err(injected("write"));
        }
        self.inner.write(key, versions).await
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}
