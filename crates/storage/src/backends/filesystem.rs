//! Local filesystem catalog backend.

use crate::error::{CatalogError, CatalogResult};
use crate::traits::{VersionCatalog, decode_document, encode_document};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tfreg_core::{ProviderKey, ProviderVersions};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::instrument;
use uuid::Uuid;

/// Filesystem version catalog.
///
/// Each provider is one JSON document at `<root>/<namespace>/<name>.json`.
/// Reads always go to disk.
pub struct FilesystemBackend {
    root: PathBuf,
    read_only: bool,
}

impl FilesystemBackend {
    /// Create a writable filesystem catalog, creating the root if needed.
    pub async fn new(root: impl AsRef<Path>) -> CatalogResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self {
            root,
            read_only: false,
        })
    }

    /// Open an existing provider tree without write support.
    pub async fn read_only(root: impl AsRef<Path>) -> CatalogResult<Self> {
        let root = root.as_ref().to_path_buf();
        let metadata = fs::metadata(&root).await.map_err(|e| {
            CatalogError::Config(format!(
                "providers directory {} is not accessible: {e}",
                root.display()
            ))
        })?;
        if !metadata.is_dir() {
            return Err(CatalogError::Config(format!(
                "providers path {} is not a directory",
                root.display()
            )));
        }
        Ok(Self {
            root,
            read_only: true,
        })
    }

    /// Path of the document holding a provider's versions.
    ///
    /// `ProviderKey` segments contain no separators or dots, so the result
    /// always stays below the root.
    pub fn document_path(&self, key: &ProviderKey) -> PathBuf {
        self.root
            .join(key.namespace())
            .join(format!("{}.json", key.name()))
    }
}

#[async_trait]
impl VersionCatalog for FilesystemBackend {
    #[instrument(skip(self), fields(backend = "filesystem"))]
    async fn read(&self, key: &ProviderKey) -> CatalogResult<Option<ProviderVersions>> {
        let path = self.document_path(key);
        let data = match fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CatalogError::Io(e)),
        };
        decode_document(key, &data).map(Some)
    }

    #[instrument(skip(self, versions), fields(backend = "filesystem", count = versions.versions.len()))]
    async fn write(&self, key: &ProviderKey, versions: ProviderVersions) -> CatalogResult<()> {
        if self.read_only {
            return Err(CatalogError::ReadOnly);
        }

        let data = encode_document(key, &versions)?;
        let path = self.document_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Write to temp file with unique name, fsync, then rename so readers
        // never see a partial document.
        let temp_path = path.with_file_name(format!("{}.json.tmp.{}", key.name(), Uuid::new_v4()));
        {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(&data).await?;
            file.sync_all().await?;
        }
        if let Err(e) = fs::rename(&temp_path, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(CatalogError::Io(e));
        }

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "filesystem"
    }
}
