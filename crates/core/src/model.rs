//! Provider version records and their response projections.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// All published versions of one provider, in publish order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderVersions {
    #[serde(default)]
    pub versions: Vec<ProviderVersion>,
}

/// Outcome of inserting a version into a [`ProviderVersions`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Upsert {
    /// No entry had this version string; the version was appended.
    Created,
    /// An entry with this version string was replaced in place.
    Updated,
}

impl ProviderVersions {
    /// Find the entry for a version string.
    pub fn find(&self, version: &str) -> Option<&ProviderVersion> {
        self.versions.iter().find(|v| v.version == version)
    }

    /// Replace the entry with the same version string, or append it.
    ///
    /// The whole entry is replaced; fields of the previous entry are not merged.
    pub fn upsert(&mut self, version: ProviderVersion) -> Upsert {
        match self
            .versions
            .iter_mut()
            .find(|v| v.version == version.version)
        {
            Some(existing) => {
                *existing = version;
                Upsert::Updated
            }
            None => {
                self.versions.push(version);
                Upsert::Created
            }
        }
    }

    /// Project every version to its list-endpoint shape, preserving order.
    pub fn summaries(&self) -> VersionsResponse {
        VersionsResponse {
            versions: self.versions.iter().map(VersionSummary::from).collect(),
        }
    }
}

/// A single provider version with its supported protocols and platforms.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderVersion {
    pub version: String,
    #[serde(default)]
    pub protocols: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<Platform>,
}

impl ProviderVersion {
    /// Check the invariants a publish body must satisfy.
    pub fn validate(&self) -> crate::Result<()> {
        if self.version.trim().is_empty() {
            return Err(crate::Error::InvalidVersion(
                "version must not be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for platform in &self.platforms {
            if platform.os.is_empty() || platform.arch.is_empty() {
                return Err(crate::Error::InvalidPlatform(format!(
                    "os and arch are required (got os={:?}, arch={:?})",
                    platform.os, platform.arch
                )));
            }
            if !seen.insert((platform.os.as_str(), platform.arch.as_str())) {
                return Err(crate::Error::DuplicatePlatform {
                    version: self.version.clone(),
                    os: platform.os.clone(),
                    arch: platform.arch.clone(),
                });
            }
        }
        Ok(())
    }

    /// First platform matching both os and arch.
    pub fn platform(&self, os: &str, arch: &str) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.os == os && p.arch == arch)
    }

    /// Build the download-endpoint response for one of this version's platforms.
    pub fn download(&self, os: &str, arch: &str) -> Option<DownloadResponse> {
        self.platform(os, arch).map(|platform| DownloadResponse {
            protocols: self.protocols.clone(),
            platform: platform.clone(),
        })
    }
}

/// An os/arch-specific artifact of a provider version.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub os: String,
    pub arch: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub download_url: String,
    #[serde(default)]
    pub shasums_url: String,
    #[serde(default)]
    pub shasums_signature_url: String,
    #[serde(default)]
    pub shasum: String,
    #[serde(default)]
    pub signing_keys: SigningKeys,
}

/// Keys used to verify the shasums signature.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningKeys {
    #[serde(default)]
    pub gpg_public_keys: Vec<GpgPublicKey>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpgPublicKey {
    #[serde(default)]
    pub key_id: String,
    #[serde(default)]
    pub ascii_armor: String,
    #[serde(default)]
    pub trust_signature: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub source_url: String,
}

/// Response body of the versions endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionsResponse {
    pub versions: Vec<VersionSummary>,
}

/// A version as listed by the versions endpoint: no download or checksum data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionSummary {
    pub version: String,
    pub protocols: Vec<String>,
    pub platforms: Vec<PlatformSummary>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSummary {
    pub os: String,
    pub arch: String,
}

impl From<&ProviderVersion> for VersionSummary {
    fn from(version: &ProviderVersion) -> Self {
        Self {
            version: version.version.clone(),
            protocols: version.protocols.clone(),
            platforms: version
                .platforms
                .iter()
                .map(|p| PlatformSummary {
                    os: p.os.clone(),
                    arch: p.arch.clone(),
                })
                .collect(),
        }
    }
}

/// Response body of the download endpoint.
///
/// Serializes as one flat object: `protocols` next to the platform's fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadResponse {
    pub protocols: Vec<String>,
    #[serde(flatten)]
    pub platform: Platform,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn linux_amd64(shasum: &str) -> Platform {
        Platform {
            os: "linux".to_string(),
            arch: "amd64".to_string(),
            filename: "aws_5.1.0_linux_amd64.zip".to_string(),
            download_url: "https://x/aws.zip".to_string(),
            shasum: shasum.to_string(),
            ..Default::default()
        }
    }

    fn version(v: &str, platforms: Vec<Platform>) -> ProviderVersion {
        ProviderVersion {
            version: v.to_string(),
            protocols: vec!["5.0".to_string()],
            platforms,
        }
    }

    #[test]
    fn test_decode_minimal_publish_body() {
        let body = json!({
            "version": "5.1.0",
            "protocols": ["5.0"],
            "platforms": [{
                "os": "linux",
                "arch": "amd64",
                "filename": "aws_5.1.0_linux_amd64.zip",
                "download_url": "https://x/aws.zip",
                "shasum": "abc123"
            }]
        });

        let decoded: ProviderVersion = serde_json::from_value(body).unwrap();
        assert_eq!(decoded, version("5.1.0", vec![linux_amd64("abc123")]));
        assert!(decoded.platforms[0].signing_keys.gpg_public_keys.is_empty());
        decoded.validate().unwrap();
    }

    #[test]
    fn test_upsert_appends_then_replaces() {
        let mut versions = ProviderVersions::default();
        assert_eq!(
            versions.upsert(version("5.1.0", vec![linux_amd64("abc123")])),
            Upsert::Created
        );
        assert_eq!(
            versions.upsert(version("5.2.0", vec![linux_amd64("aaa")])),
            Upsert::Created
        );

        let replacement = ProviderVersion {
            version: "5.1.0".to_string(),
            protocols: vec!["6.0".to_string()],
            platforms: vec![],
        };
        assert_eq!(versions.upsert(replacement.clone()), Upsert::Updated);

        assert_eq!(versions.versions.len(), 2);
        // Replaced in place, not moved to the end, and not merged.
        assert_eq!(versions.versions[0], replacement);
        assert_eq!(versions.versions[1].version, "5.2.0");
    }

    #[test]
    fn test_summaries_drop_download_fields() {
        let mut versions = ProviderVersions::default();
        versions.upsert(version("5.1.0", vec![linux_amd64("abc123")]));

        let value = serde_json::to_value(versions.summaries()).unwrap();
        assert_eq!(
            value,
            json!({
                "versions": [{
                    "version": "5.1.0",
                    "protocols": ["5.0"],
                    "platforms": [{"os": "linux", "arch": "amd64"}]
                }]
            })
        );
    }

    #[test]
    fn test_download_flattens_platform() {
        let v = version("5.1.0", vec![linux_amd64("abc123")]);
        let download = v.download("linux", "amd64").unwrap();
        let value = serde_json::to_value(&download).unwrap();

        assert_eq!(value["protocols"], json!(["5.0"]));
        assert_eq!(value["os"], "linux");
        assert_eq!(value["download_url"], "https://x/aws.zip");
        assert_eq!(value["shasum"], "abc123");
        assert_eq!(value["signing_keys"], json!({"gpg_public_keys": []}));
        assert!(value.get("platform").is_none());

        assert!(v.download("darwin", "arm64").is_none());
        assert!(v.download("linux", "arm64").is_none());
    }

    #[test]
    fn test_validate_rejects_empty_version() {
        let v = version("  ", vec![]);
        assert!(matches!(v.validate(), Err(crate::Error::InvalidVersion(_))));
    }

    #[test]
    fn test_validate_rejects_duplicate_platform() {
        let v = version("5.1.0", vec![linux_amd64("a"), linux_amd64("b")]);
        assert!(matches!(
            v.validate(),
            Err(crate::Error::DuplicatePlatform { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_platform_without_arch() {
        let mut platform = linux_amd64("a");
        platform.arch.clear();
        let v = version("5.1.0", vec![platform]);
        assert!(matches!(v.validate(), Err(crate::Error::InvalidPlatform(_))));
    }

    #[test]
    fn test_stored_document_roundtrip_keeps_signing_keys() {
        let document = json!({
            "versions": [{
                "version": "1.0.0",
                "protocols": ["5.0"],
                "platforms": [{
                    "os": "darwin",
                    "arch": "arm64",
                    "filename": "p.zip",
                    "download_url": "https://x/p.zip",
                    "shasums_url": "https://x/SHA256SUMS",
                    "shasums_signature_url": "https://x/SHA256SUMS.sig",
                    "shasum": "ff",
                    "signing_keys": {
                        "gpg_public_keys": [{
                            "key_id": "51852D87348FFC4C",
                            "ascii_armor": "-----BEGIN PGP PUBLIC KEY BLOCK-----",
                            "trust_signature": "",
                            "source": "HashiCorp",
                            "source_url": "https://www.hashicorp.com/security.html"
                        }]
                    }
                }]
            }]
        });

        let parsed: ProviderVersions = serde_json::from_value(document.clone()).unwrap();
        let key = &parsed.versions[0].platforms[0].signing_keys.gpg_public_keys[0];
        assert_eq!(key.key_id, "51852D87348FFC4C");
        assert_eq!(serde_json::to_value(&parsed).unwrap(), document);
    }
}
