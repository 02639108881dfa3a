//! Build metadata reported by the `/version` endpoint.

use serde::{Deserialize, Serialize};

/// Release information baked in at compile time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInfo {
    /// The version tag.
    pub version: String,
    /// The full commit hash (`TFREG_GIT_HASH` at build time).
    pub commit_hash: String,
    /// The build date (`TFREG_BUILD_DATE` at build time).
    pub build_date: String,
}

impl BuildInfo {
    /// Build information for the running binary.
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            commit_hash: option_env!("TFREG_GIT_HASH").unwrap_or_default().to_string(),
            build_date: option_env!("TFREG_BUILD_DATE")
                .unwrap_or_default()
                .to_string(),
        }
    }
}
