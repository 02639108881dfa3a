//! Provider registry protocol endpoints.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use tfreg_core::{
    DownloadResponse, ProviderKey, ProviderVersion, ProviderVersions, Upsert, VersionsResponse,
};
use tracing::instrument;

/// Path parameters of the download endpoint.
#[derive(Debug, Deserialize)]
pub struct DownloadPath {
    pub namespace: String,
    pub name: String,
    pub version: String,
    pub os: String,
    pub arch: String,
}

/// Resolve a key for a read. A key that fails validation can never have been
/// stored, so it reads as absent.
fn lookup_key(namespace: String, name: String) -> ApiResult<ProviderKey> {
    ProviderKey::new(namespace, name).map_err(|e| ApiError::NotFound(e.to_string()))
}

async fn load_versions(state: &AppState, key: &ProviderKey) -> ApiResult<ProviderVersions> {
    state
        .catalog
        .read(key)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("provider {key} not found")))
}

/// GET /v1/{namespace}/{name}/versions
#[instrument(skip(state))]
pub async fn list_versions(
    State(state): State<AppState>,
    Path((namespace, name)): Path<(String, String)>,
) -> ApiResult<Json<VersionsResponse>> {
    let key = lookup_key(namespace, name)?;
    let versions = load_versions(&state, &key).await?;
    Ok(Json(versions.summaries()))
}

/// PUT /v1/{namespace}/{name}/versions
///
/// Replaces the entry with the same version string, or appends a new one.
/// Responds 200 on replace and 202 on append, with the stored collection.
/// Publishes to the same provider run one at a time.
#[instrument(skip(state, body), fields(body_len = body.len()))]
pub async fn publish_version(
    State(state): State<AppState>,
    Path((namespace, name)): Path<(String, String)>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ProviderVersions>)> {
    let key = ProviderKey::new(namespace, name)?;

    if body.is_empty() {
        return Err(ApiError::BadRequest("request body is empty".to_string()));
    }
    let version: ProviderVersion = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("invalid provider version: {e}")))?;
    version.validate()?;

    let lock = state.publish_lock(&key);
    let _guard = lock.lock().await;

    let mut versions = state.catalog.read(&key).await?.unwrap_or_default();
    let version_string = version.version.clone();
    let outcome = versions.upsert(version);
    state.catalog.write(&key, versions.clone()).await?;

    let status = match outcome {
        Upsert::Created => StatusCode::ACCEPTED,
        Upsert::Updated => StatusCode::OK,
    };
    tracing::info!(
        provider = %key,
        version = %version_string,
        outcome = ?outcome,
        total_versions = versions.versions.len(),
        "Provider version published"
    );

    Ok((status, Json(versions)))
}

/// GET /v1/{namespace}/{name}/{version}/download/{os}/{arch}
///
/// A missing version and a missing platform are both plain 404s.
#[instrument(skip(state))]
pub async fn download(
    State(state): State<AppState>,
    Path(params): Path<DownloadPath>,
) -> ApiResult<Json<DownloadResponse>> {
    let key = lookup_key(params.namespace, params.name)?;
    let versions = load_versions(&state, &key).await?;

    versions
        .find(&params.version)
        .and_then(|v| v.download(&params.os, &params.arch))
        .map(Json)
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "no {}/{} package for {key} {}",
                params.os, params.arch, params.version
            ))
        })
}
