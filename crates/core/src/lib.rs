//! Core domain types for the tfreg provider registry.
//!
//! This crate defines the canonical data model used across all other crates:
//! - Provider keys (namespace + name) and their storage form
//! - Provider versions, platforms and signing keys
//! - Response projections for the versions and download endpoints
//! - Server, auth and catalog configuration

pub mod build_info;
pub mod config;
pub mod error;
pub mod key;
pub mod model;

pub use build_info::BuildInfo;
pub use error::{Error, Result};
pub use key::ProviderKey;
pub use model::{
    DownloadResponse, GpgPublicKey, Platform, PlatformSummary, ProviderVersion, ProviderVersions,
    SigningKeys, Upsert, VersionSummary, VersionsResponse,
};

/// Path prefix advertised by service discovery for the providers protocol.
pub const PROVIDERS_V1_PREFIX: &str = "/v1/";
