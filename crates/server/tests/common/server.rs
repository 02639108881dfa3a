//! Server test utilities.

use std::sync::Arc;
use tempfile::TempDir;
use tfreg_core::config::{AppConfig, CatalogConfig};
use tfreg_server::{AppState, create_router};
use tfreg_storage::{FilesystemBackend, MemoryBackend, VersionCatalog};

/// A test server wrapper with all dependencies.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
    _temp_dir: Option<TempDir>,
}

#[allow(dead_code)]
impl TestServer {
    /// Create a test server over the memory catalog.
    pub fn new() -> Self {
        Self::with_catalog(Arc::new(MemoryBackend::new()))
    }

    /// Create a test server over an arbitrary catalog.
    pub fn with_catalog(catalog: Arc<dyn VersionCatalog>) -> Self {
        Self::build(AppConfig::for_testing(), catalog, None)
    }

    /// Create a test server over a filesystem catalog in a temporary directory.
    pub async fn with_filesystem() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let backend = FilesystemBackend::new(temp_dir.path())
            .await
            .expect("Failed to create filesystem catalog");
        let config = AppConfig {
            catalog: CatalogConfig::Filesystem {
                path: temp_dir.path().to_path_buf(),
                read_only: false,
            },
            ..AppConfig::for_testing()
        };
        Self::build(config, Arc::new(backend), Some(temp_dir))
    }

    /// Create a test server over a read-only filesystem catalog, seeded by `seed`.
    pub async fn with_read_only_filesystem<F, Fut>(seed: F) -> Self
    where
        F: FnOnce(FilesystemBackend) -> Fut,
        Fut: std::future::Future<Output = ()>,
    {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let writable = FilesystemBackend::new(temp_dir.path())
            .await
            .expect("Failed to create filesystem catalog");
        seed(writable).await;

        let backend = FilesystemBackend::read_only(temp_dir.path())
            .await
            .expect("Failed to open read-only catalog");
        let config = AppConfig {
            catalog: CatalogConfig::Filesystem {
                path: temp_dir.path().to_path_buf(),
                read_only: true,
            },
            ..AppConfig::for_testing()
        };
        Self::build(config, Arc::new(backend), Some(temp_dir))
    }

    fn build(config: AppConfig, catalog: Arc<dyn VersionCatalog>, temp_dir: Option<TempDir>) -> Self {
        let state = AppState::new(config, catalog);
        let router = create_router(state.clone());
        Self {
            router,
            state,
            _temp_dir: temp_dir,
        }
    }
}
