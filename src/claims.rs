//! Typed claim set
//!
//! Payloads arrive as untyped JSON. [`TokenClaims::from_payload`] converts a
//! verified payload into the typed claim set in one pass, checking presence
//! and type of every field it reads and failing closed on any mismatch.

use crate::config::SigningConfig;
use crate::error::{Error, Result};
use miniserde::Serialize;
use miniserde::json::{Number, Object, Value};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Ordered list of permission names
pub type Scopes = Vec<String>;

/// Claim names on the wire
pub(crate) mod names {
    pub const USER: &str = "usr";
    pub const ISSUER: &str = "iss";
    pub const ISSUED_AT: &str = "iat";
    pub const EXPIRATION: &str = "exp";
    pub const SCOPES: &str = "scopes";
}

/// Claims carried by every token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenClaims {
    /// Subject user identifier (usr)
    #[serde(rename = "usr")]
    pub user_id: String,

    /// Issuer (iss), carried but not enforced on decode
    #[serde(rename = "iss")]
    pub issuer: Option<String>,

    /// Issued At (iat), seconds since Unix epoch, integer when present
    #[serde(rename = "iat")]
    pub issued_at: Option<i64>,

    /// Expiration Time (exp), seconds since Unix epoch
    ///
    /// Must be an integer on the wire; fractional NumericDates are rejected.
    #[serde(rename = "exp")]
    pub expiration: i64,

    /// Granted scopes, order preserved
    pub scopes: Scopes,
}

impl TokenClaims {
    /// Assemble the claim set for a token issued at `now`
    ///
    /// `iat` and `exp` are both derived from the same instant, truncated to
    /// whole seconds after adding `expiry_ms`.
    pub fn issue<S>(
        config: &SigningConfig,
        user_id: &str,
        scopes: &[S],
        now: SystemTime,
    ) -> Result<Self>
    where
        S: AsRef<str>,
    {
        let now_ms = now
            .duration_since(UNIX_EPOCH)
            .map_err(|_| Error::Signing("system clock is before the Unix epoch".into()))?
            .as_millis();
        let exp_ms = now_ms
            .checked_add(u128::from(config.expiry_ms))
            .ok_or_else(|| Error::Signing("expiry overflows".into()))?;

        Ok(Self {
            user_id: user_id.to_string(),
            issuer: Some(config.issuer.clone()),
            issued_at: Some(millis_to_seconds(now_ms)?),
            expiration: millis_to_seconds(exp_ms)?,
            scopes: scopes.iter().map(|s| s.as_ref().to_string()).collect(),
        })
    }

    /// Build the typed claim set from a decoded payload object
    pub fn from_payload(payload: &Object) -> Result<Self> {
        Ok(Self {
            user_id: required_string(payload, names::USER)?,
            issuer: optional_string(payload, names::ISSUER)?,
            issued_at: optional_integer(payload, names::ISSUED_AT)?,
            expiration: expiration(payload)?,
            scopes: scopes(payload)?,
        })
    }

    /// True if the token is no longer valid at `now`
    pub fn is_expired_at(&self, now: SystemTime) -> bool {
        ensure_not_expired(self.expiration, now).is_err()
    }
}

/// Fail with `TokenExpired` once `now` has reached `expiration`
pub(crate) fn ensure_not_expired(expiration: i64, now: SystemTime) -> Result<()> {
    let now = unix_seconds(now);
    if now >= expiration {
        return Err(Error::TokenExpired {
            expired_at: expiration,
            now,
        });
    }
    Ok(())
}

/// Read the `exp` claim
pub(crate) fn expiration(payload: &Object) -> Result<i64> {
    optional_integer(payload, names::EXPIRATION)?
        .ok_or(Error::ClaimMissing(names::EXPIRATION))
}

/// Read the `scopes` claim; one bad element rejects the whole list
fn scopes(payload: &Object) -> Result<Scopes> {
    match payload.get(names::SCOPES) {
        None => Err(Error::ClaimMissing(names::SCOPES)),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::String(scope) => Ok(scope.clone()),
                _ => Err(Error::ScopeInvalidType { index }),
            })
            .collect(),
        Some(_) => Err(Error::ClaimInvalidType {
            claim: names::SCOPES,
            expected: "array of strings",
        }),
    }
}

fn required_string(payload: &Object, claim: &'static str) -> Result<String> {
    optional_string(payload, claim)?.ok_or(Error::ClaimMissing(claim))
}

fn optional_string(payload: &Object, claim: &'static str) -> Result<Option<String>> {
    match payload.get(claim) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(Error::ClaimInvalidType {
            claim,
            expected: "string",
        }),
    }
}

fn optional_integer(payload: &Object, claim: &'static str) -> Result<Option<i64>> {
    let invalid = Error::ClaimInvalidType {
        claim,
        expected: "integer",
    };

    match payload.get(claim) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(Number::I64(value))) => Ok(Some(*value)),
        Some(Value::Number(Number::U64(value))) => {
            i64::try_from(*value).map(Some).map_err(|_| invalid)
        }
        Some(_) => Err(invalid),
    }
}

fn millis_to_seconds(millis: u128) -> Result<i64> {
    i64::try_from(millis / 1000).map_err(|_| Error::Signing("timestamp overflows".into()))
}

/// Current Unix timestamp in whole seconds
///
/// A clock before the epoch reads as 0.
fn unix_seconds(now: SystemTime) -> i64 {
    let elapsed = now.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO);
    i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX)
}
