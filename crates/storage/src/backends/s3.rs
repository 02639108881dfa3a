//! S3-compatible catalog backend.
//!
//! Uses an object store as a remote key-value store: every provider is one
//! object holding its JSON document, grouped under a fixed collection `kind`.

use crate::error::{CatalogError, CatalogResult};
use crate::traits::{VersionCatalog, decode_document, encode_document};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::SdkError;
use aws_smithy_http_client::Builder as SmithyHttpClientBuilder;
use bytes::Bytes;
use tfreg_core::{ProviderKey, ProviderVersions};
use tracing::instrument;

/// Connection settings for [`S3Backend`].
#[derive(Clone, Debug, Default)]
pub struct S3Settings {
    pub bucket: String,
    pub endpoint: Option<String>,
    pub region: Option<String>,
    pub prefix: Option<String>,
    pub kind: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub force_path_style: bool,
}

/// S3-compatible version catalog using the AWS SDK.
pub struct S3Backend {
    client: Client,
    bucket: String,
    prefix: Option<String>,
    kind: String,
}

impl std::fmt::Debug for S3Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Backend")
            .field("bucket", &self.bucket)
            .field("prefix", &self.prefix)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl S3Backend {
    /// Create a new S3 backend.
    ///
    /// Without explicit credentials the ambient AWS credential chain is used.
    pub async fn new(settings: S3Settings) -> CatalogResult<Self> {
        let S3Settings {
            bucket,
            endpoint,
            region,
            prefix,
            kind,
            access_key_id,
            secret_access_key,
            force_path_style,
        } = settings;

        if bucket.is_empty() {
            return Err(CatalogError::Config("s3 catalog requires a bucket".to_string()));
        }
        if kind.is_empty() || kind.contains('/') {
            return Err(CatalogError::Config(
                "s3 catalog kind must be non-empty and contain no '/'".to_string(),
            ));
        }

        let region = aws_config::Region::new(region.unwrap_or_else(|| "us-east-1".to_string()));

        let mut builder = match (access_key_id, secret_access_key) {
            (Some(key_id), Some(secret)) => {
                let credentials =
                    aws_sdk_s3::config::Credentials::new(key_id, secret, None, None, "tfreg-config");
                aws_sdk_s3::config::Builder::new()
                    .behavior_version(BehaviorVersion::latest())
                    .region(region)
                    .credentials_provider(credentials)
            }
            (None, None) => {
                let shared = aws_config::defaults(BehaviorVersion::latest())
                    .region(region)
                    .load()
                    .await;
                aws_sdk_s3::config::Builder::from(&shared)
            }
            _ => {
                return Err(CatalogError::Config(
                    "s3 config requires both access_key_id and secret_access_key when either is set"
                        .to_string(),
                ));
            }
        };

        if let Some(endpoint) = endpoint {
            // Bare host:port endpoints (e.g., "minio:9000") are plain HTTP.
            let endpoint_lower = endpoint.to_ascii_lowercase();
            let endpoint =
                if endpoint_lower.starts_with("http://") || endpoint_lower.starts_with("https://") {
                    endpoint
                } else {
                    format!("http://{endpoint}")
                };
            if endpoint.to_ascii_lowercase().starts_with("http://") {
                builder = builder.http_client(SmithyHttpClientBuilder::new().build_http());
            }
            builder = builder.endpoint_url(endpoint);
        }

        if force_path_style {
            builder = builder.force_path_style(true);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket,
            prefix: prefix
                .map(|p| p.trim_matches('/').to_string())
                .filter(|p| !p.is_empty()),
            kind,
        })
    }

    /// Object key holding a provider's document.
    pub fn object_key(&self, key: &ProviderKey) -> String {
        let record = format!("{}/{}.json", self.kind, key.storage_key());
        match &self.prefix {
            Some(prefix) => format!("{prefix}/{record}"),
            None => record,
        }
    }
}

fn is_not_found<E>(err: &SdkError<E>) -> bool {
    matches!(err, SdkError::ServiceError(service_err) if service_err.raw().status().as_u16() == 404)
}

#[async_trait]
impl VersionCatalog for S3Backend {
    #[instrument(skip(self), fields(backend = "s3"))]
    async fn read(&self, key: &ProviderKey) -> CatalogResult<Option<ProviderVersions>> {
        let object_key = self.object_key(key);
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&object_key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err) if is_not_found(&err) => return Ok(None),
            Err(err) => return Err(CatalogError::S3(Box::new(err))),
        };

        let data = output
            .body
            .collect()
            .await
            .map_err(|e| CatalogError::S3(Box::new(e)))?
            .into_bytes();

        decode_document(key, &data).map(Some)
    }

    #[instrument(skip(self, versions), fields(backend = "s3", count = versions.versions.len()))]
    async fn write(&self, key: &ProviderKey, versions: ProviderVersions) -> CatalogResult<()> {
        let data = Bytes::from(encode_document(key, &versions)?);
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(self.object_key(key))
            .content_type("application/json")
            .body(data.into())
            .send()
            .await
            .map_err(|e| CatalogError::S3(Box::new(e)))?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "s3"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(prefix: Option<&str>) -> S3Settings {
        S3Settings {
            bucket: "test-bucket".to_string(),
            endpoint: Some("s3.test".to_string()),
            region: Some("us-east-1".to_string()),
            prefix: prefix.map(str::to_string),
            kind: "tfregistry".to_string(),
            access_key_id: Some("access".to_string()),
            secret_access_key: Some("secret".to_string()),
            force_path_style: true,
        }
    }

    #[tokio::test]
    async fn test_object_key_layout() {
        let key = ProviderKey::new("hashicorp", "aws").unwrap();

        let backend = S3Backend::new(settings(None)).await.unwrap();
        assert_eq!(backend.object_key(&key), "tfregistry/hashicorp/aws.json");

        let backend = S3Backend::new(settings(Some("registry/"))).await.unwrap();
        assert_eq!(
            backend.object_key(&key),
            "registry/tfregistry/hashicorp/aws.json"
        );
    }

    #[tokio::test]
    async fn test_rejects_partial_credentials() {
        let mut s = settings(None);
        s.secret_access_key = None;
        assert!(matches!(
            S3Backend::new(s).await,
            Err(CatalogError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_rejects_empty_kind() {
        let mut s = settings(None);
        s.kind.clear();
        assert!(matches!(
            S3Backend::new(s).await,
            Err(CatalogError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_debug_omits_client() {
        let backend = S3Backend::new(settings(None)).await.unwrap();
        let debug = format!("{backend:?}");
        assert!(debug.contains("test-bucket"));
        assert!(!debug.contains("secret"));
    }
}
