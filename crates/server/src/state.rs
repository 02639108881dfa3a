//! Application state shared across handlers.

use crate::auth::SharedSecret;
use dashmap::DashMap;
use std::sync::Arc;
use tfreg_core::ProviderKey;
use tfreg_core::config::AppConfig;
use tfreg_storage::VersionCatalog;
use tokio::sync::Mutex;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Version catalog backend, chosen once at startup.
    pub catalog: Arc<dyn VersionCatalog>,
    /// Publish secret.
    pub secret: SharedSecret,
    /// One lock per provider, held across a publish's read and write.
    publish_locks: Arc<DashMap<ProviderKey, Arc<Mutex<()>>>>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The configuration is expected to have passed `AppConfig::validate`.
    pub fn new(config: AppConfig, catalog: Arc<dyn VersionCatalog>) -> Self {
        let secret = SharedSecret::new(&config.auth.secret_key);
        Self {
            config: Arc::new(config),
            catalog,
            secret,
            publish_locks: Arc::new(DashMap::new()),
        }
    }

    /// Lock serializing publishes to one provider.
    pub fn publish_lock(&self, key: &ProviderKey) -> Arc<Mutex<()>> {
        self.publish_locks
            .entry(key.clone())
            .or_default()
            .value()
            .clone()
    }
}
