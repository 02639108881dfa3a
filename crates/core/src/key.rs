//! Provider key types and validation.

use std::fmt;

/// Maximum length in bytes of a namespace or provider name.
pub const MAX_SEGMENT_LEN: usize = 64;

/// Separator between namespace and name in the storage key.
///
/// Never accepted inside either segment, so `storage_key` is injective.
pub const KEY_SEPARATOR: char = '/';

/// Identifies a provider by its (namespace, name) pair.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProviderKey {
    namespace: String,
    name: String,
}

impl ProviderKey {
    /// Create from components, validating both segments.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> crate::Result<Self> {
        let namespace = namespace.into();
        let name = name.into();
        validate_segment(&namespace).map_err(crate::Error::InvalidNamespace)?;
        validate_segment(&name).map_err(crate::Error::InvalidName)?;
        Ok(Self { namespace, name })
    }

    /// Get the namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Get the provider name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The composite key used by catalog backends.
    pub fn storage_key(&self) -> String {
        format!("{}{}{}", self.namespace, KEY_SEPARATOR, self.name)
    }
}

fn validate_segment(segment: &str) -> std::result::Result<(), String> {
    if segment.is_empty() {
        return Err("must not be empty".to_string());
    }
    if segment.len() > MAX_SEGMENT_LEN {
        return Err(format!(
            "must be at most {MAX_SEGMENT_LEN} bytes, got {}",
            segment.len()
        ));
    }
    if let Some(c) = segment
        .chars()
        .find(|c| !matches!(c, 'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_'))
    {
        return Err(format!("invalid character {c:?} in {segment:?}"));
    }
    Ok(())
}

impl fmt::Debug for ProviderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProviderKey({self})")
    }
}

impl fmt::Display for ProviderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.namespace, KEY_SEPARATOR, self.name)
    }
}
