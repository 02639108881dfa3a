//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Maximum time to read a request body, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub read_timeout_secs: u64,
    /// Maximum time to produce a response, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub write_timeout_secs: u64,
    /// Maximum accepted publish body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// TLS termination (optional). Plain HTTP when absent.
    #[serde(default)]
    pub tls: Option<TlsConfig>,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            read_timeout_secs: default_timeout_secs(),
            write_timeout_secs: default_timeout_secs(),
            max_body_bytes: default_max_body_bytes(),
            tls: None,
        }
    }
}

impl ServerConfig {
    /// Get the read timeout as a Duration.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    /// Get the write timeout as a Duration.
    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }

    /// Validate server configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.read_timeout_secs == 0 {
            return Err("server.read_timeout_secs cannot be 0".to_string());
        }
        if self.write_timeout_secs == 0 {
            return Err("server.write_timeout_secs cannot be 0".to_string());
        }
        if self.max_body_bytes == 0 {
            return Err("server.max_body_bytes cannot be 0".to_string());
        }
        if let Some(tls) = &self.tls {
            tls.validate()?;
        }
        Ok(())
    }
}

/// TLS certificate and key, both PEM encoded.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TlsConfig {
    /// x509 certificate chain file.
    pub certificate: PathBuf,
    /// Private key file.
    pub private_key: PathBuf,
}

impl TlsConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.certificate.as_os_str().is_empty() || self.private_key.as_os_str().is_empty() {
            return Err(
                "server.tls requires both certificate and private_key to be set".to_string(),
            );
        }
        Ok(())
    }
}

/// Shared-secret configuration for the publish endpoint.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// The UUID secret clients present in the secret key header.
    pub secret_key: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl AuthConfig {
    /// Create a test configuration with a fixed secret.
    ///
    /// **For testing only.**
    pub fn for_testing() -> Self {
        Self {
            secret_key: "00000000-0000-4000-8000-000000000001".to_string(),
        }
    }

    /// Validate that the secret is present and is a UUID.
    pub fn validate(&self) -> Result<(), String> {
        if self.secret_key.is_empty() {
            return Err("auth.secret_key is required".to_string());
        }
        uuid::Uuid::parse_str(&self.secret_key)
            .map_err(|e| format!("auth.secret_key is an invalid UUID: {e}"))?;
        Ok(())
    }
}

/// Version catalog backend configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CatalogConfig {
    /// In-process map. Contents are lost on restart.
    #[default]
    Memory,
    /// One JSON document per provider at `<path>/<namespace>/<name>.json`.
    Filesystem {
        /// Root directory of the provider documents.
        path: PathBuf,
        /// Reject writes (serving a pre-populated tree).
        #[serde(default)]
        read_only: bool,
    },
    /// S3-compatible object store used as a remote key-value store.
    S3 {
        /// Bucket name.
        bucket: String,
        /// Optional endpoint URL (for MinIO, etc.).
        endpoint: Option<String>,
        /// AWS region.
        region: Option<String>,
        /// Optional key prefix.
        prefix: Option<String>,
        /// Collection identifier under which every provider record lives.
        #[serde(default = "default_kind")]
        kind: String,
        /// AWS access key ID. Falls back to the ambient AWS credential chain if not set.
        access_key_id: Option<String>,
        /// AWS secret access key. Falls back to the ambient AWS credential chain if not set.
        secret_access_key: Option<String>,
        /// Force path-style URLs (required for MinIO).
        #[serde(default)]
        force_path_style: bool,
    },
}

fn default_kind() -> String {
    "tfregistry".to_string()
}

impl CatalogConfig {
    /// Validate catalog configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            CatalogConfig::Memory => Ok(()),
            CatalogConfig::Filesystem { path, .. } => {
                if path.as_os_str().is_empty() {
                    return Err("filesystem catalog requires a path".to_string());
                }
                Ok(())
            }
            CatalogConfig::S3 {
                bucket,
                kind,
                access_key_id,
                secret_access_key,
                ..
            } => {
                if bucket.is_empty() {
                    return Err("s3 catalog requires a bucket".to_string());
                }
                if kind.is_empty() || kind.contains('/') {
                    return Err("s3 catalog kind must be non-empty and contain no '/'".to_string());
                }
                match (access_key_id.as_ref(), secret_access_key.as_ref()) {
                    (Some(_), Some(_)) | (None, None) => Ok(()),
                    _ => Err(
                        "s3 config requires both access_key_id and secret_access_key when either is set"
                            .to_string(),
                    ),
                }
            }
        }
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Shared-secret configuration (required).
    pub auth: AuthConfig,
    /// Version catalog backend.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl AppConfig {
    /// Create a test configuration with sensible defaults.
    ///
    /// **For testing only.** Uses the memory catalog and a fixed secret.
    pub fn for_testing() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::for_testing(),
            catalog: CatalogConfig::default(),
        }
    }

    /// Validate every section, returning the first problem found.
    pub fn validate(&self) -> crate::Result<()> {
        self.server.validate().map_err(crate::Error::Config)?;
        self.auth.validate().map_err(crate::Error::Config)?;
        self.catalog.validate().map_err(crate::Error::Config)?;
        Ok(())
    }
}
