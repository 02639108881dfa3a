//! Remote service discovery.

use axum::Json;
use serde::{Deserialize, Serialize};
use tfreg_core::PROVIDERS_V1_PREFIX;

/// Body of `/.well-known/terraform.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryResponse {
    #[serde(rename = "providers.v1")]
    pub providers_v1: String,
}

/// GET /.well-known/terraform.json
pub async fn service_discovery() -> Json<DiscoveryResponse> {
    Json(DiscoveryResponse {
        providers_v1: PROVIDERS_V1_PREFIX.to_string(),
    })
}
