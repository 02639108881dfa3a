//! Shared-secret gate for the publish endpoint.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use sha2::{Digest, Sha256};

/// Header carrying the shared secret on publish requests.
pub const SECRET_KEY_HEADER: &str = "x-registry-secret-key";

/// The process-wide publish secret, held only as a SHA-256 digest.
#[derive(Clone)]
pub struct SharedSecret {
    digest: [u8; 32],
}

impl SharedSecret {
    pub fn new(secret: &str) -> Self {
        Self {
            digest: hash_secret(secret.as_bytes()),
        }
    }

    /// Exact, case-sensitive comparison against a presented value.
    pub fn matches(&self, presented: &[u8]) -> bool {
        hash_secret(presented) == self.digest
    }

    /// Check the secret key header of a request.
    pub fn verify(&self, headers: &HeaderMap) -> ApiResult<()> {
        let presented = headers
            .get(SECRET_KEY_HEADER)
            .ok_or(ApiError::AuthRequired)?;
        if self.matches(presented.as_bytes()) {
            Ok(())
        } else {
            Err(ApiError::Unauthorized("invalid secret key".to_string()))
        }
    }
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedSecret")
            .field(&"<redacted>")
            .finish()
    }
}

/// Hash a secret so comparisons run over fixed-length digests.
fn hash_secret(secret: &[u8]) -> [u8; 32] {
    Sha256::digest(secret).into()
}

/// Middleware rejecting requests without the correct secret key header.
///
/// Installed as a route layer, so it runs before the handler reads the body.
pub async fn require_secret(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    state.secret.verify(req.headers())?;
    Ok(next.run(req).await)
}
