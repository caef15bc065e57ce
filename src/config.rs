//! Signing configuration
//!
//! The codec never validates configuration: an empty key or a zero expiry
//! produce tokens that are useless, not errors. Callers load and sanity-check
//! these values themselves.

use serde::{Deserialize, Deserializer};
use std::fmt;

/// Shared HMAC secret
///
/// Deserializes from a plain string. `Debug` never prints the key material.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Key length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the key has no bytes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningKey(<{} bytes redacted>)", self.0.len())
    }
}

impl From<Vec<u8>> for SigningKey {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for SigningKey {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for SigningKey {
    fn from(bytes: &[u8; N]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<String> for SigningKey {
    fn from(secret: String) -> Self {
        Self(secret.into_bytes())
    }
}

impl From<&str> for SigningKey {
    fn from(secret: &str) -> Self {
        Self(secret.as_bytes().to_vec())
    }
}

impl<'de> Deserialize<'de> for SigningKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SigningKey::from)
    }
}

/// Everything the signer and verifier need besides the token itself
///
/// ```toml
/// signing_key = "s3cr3t"
/// issuer = "svc-a"
/// expiry_ms = 60000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SigningConfig {
    /// HMAC secret shared between issuer and verifier
    pub signing_key: SigningKey,

    /// Value written to the `iss` claim
    pub issuer: String,

    /// Token lifetime in milliseconds
    pub expiry_ms: u64,
}

impl SigningConfig {
    /// Create a configuration from its parts
    pub fn new(
        signing_key: impl Into<SigningKey>,
        issuer: impl Into<String>,
        expiry_ms: u64,
    ) -> Self {
        Self {
            signing_key: signing_key.into(),
            issuer: issuer.into(),
            expiry_ms,
        }
    }

    /// Key bytes used for signing and verification
    pub fn key(&self) -> &[u8] {
        self.signing_key.as_bytes()
    }
}
