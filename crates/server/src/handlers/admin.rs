//! Operational endpoints.

use axum::Json;
use serde::Serialize;
use tfreg_core::BuildInfo;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /health
///
/// Liveness only: the catalog is not probed.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /version
pub async fn build_version() -> Json<BuildInfo> {
    Json(BuildInfo::current())
}
