use crate::claims::{self, TokenClaims};
use crate::error::{Error, Result};
use miniserde::json::{Object, Value};
use std::time::SystemTime;

/// A token whose algorithm and MAC have been verified
///
/// This is the second stage in the decode pipeline. At this stage:
/// - The declared algorithm matched the pinned one
/// - The MAC matched the configured key
/// - The payload can now be safely parsed
///
/// Next step: TokenClaims (after temporal and shape validation)
#[derive(Debug)]
pub struct VerifiedToken {
    raw_payload: Vec<u8>,
}

impl VerifiedToken {
    pub(crate) fn new(raw_payload: Vec<u8>) -> Self {
        Self { raw_payload }
    }

    /// Get the raw payload bytes
    pub fn raw_payload(&self) -> &[u8] {
        &self.raw_payload
    }

    /// Parse the payload as a JSON object, without interpreting any claim
    pub fn payload(&self) -> Result<Object> {
        let json = std::str::from_utf8(&self.raw_payload)
            .map_err(|e| Error::FormatInvalidJson(format!("Payload is not UTF-8: {e}")))?;
        let value: Value = miniserde::json::from_str(json)
            .map_err(|e| Error::FormatInvalidJson(format!("Failed to parse payload: {e}")))?;

        match value {
            Value::Object(object) => Ok(object),
            _ => Err(Error::FormatInvalidJson(
                "Payload is not a JSON object".into(),
            )),
        }
    }

    /// Check expiry against `now`, then extract the typed claim set
    pub fn validate_at(self, now: SystemTime) -> Result<TokenClaims> {
        let payload = self.payload()?;

        claims::ensure_not_expired(claims::expiration(&payload)?, now)?;

        TokenClaims::from_payload(&payload)
    }
}
