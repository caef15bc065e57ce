//! # jwthmac - Compact HS256 Authorization Tokens
//!
//! **jwthmac** issues and verifies signed tokens that bind a user id and an
//! ordered list of permission scopes to a bounded validity window. Issuer and
//! verifier share one symmetric secret; no session store is involved.
//!
//! ## Quick Start
//!
//! ```
//! use jwthmac::SigningConfig;
//!
//! let config = SigningConfig::new("s3cr3t", "svc-a", 60_000);
//!
//! let token = jwthmac::encode(&config, "user-42", &["read", "write"])?;
//! let (scopes, user_id) = jwthmac::decode(&config, &token)?;
//!
//! assert_eq!(scopes, ["read", "write"]);
//! assert_eq!(user_id, "user-42");
//! # Ok::<(), jwthmac::Error>(())
//! ```
//!
//! ## Wire Format
//!
//! Tokens use the JWS compact serialization: three Base64URL (no padding)
//! segments separated by `.`:
//!
//! ```text
//! {"alg":"HS256","typ":"JWT"} . {"usr":..,"iss":..,"iat":..,"exp":..,"scopes":[..]} . HMAC-SHA256
//! ```
//!
//! `iat` and `exp` are whole seconds since the Unix epoch, both derived from
//! one captured instant: `exp = floor((now_ms + expiry_ms) / 1000)`.
//!
//! ## Decode Pipeline
//!
//! ```text
//! ParsedToken (segments split and decoded)
//!     │ .verify::<HS256>(key)
//!     ▼
//! VerifiedToken (algorithm pinned, MAC checked)
//!     │ .validate_at(now)
//!     ▼
//! TokenClaims (exp checked, usr / scopes typed)
//! ```
//!
//! [`Verifier`] runs all three steps; there is no public way to read claims
//! out of a token that skipped one.
//!
//! ## Security
//!
//! ### Algorithm Pinning
//!
//! The verifier is generic over exactly one [`Algorithm`] (HS256 unless
//! chosen otherwise). A token declaring any other `alg`, including other HMAC
//! variants or asymmetric algorithms, is rejected before the key is touched.
//! The algorithm trait is sealed: only the HMAC family can be plugged in.
//!
//! ### "none" Algorithm Rejection
//!
//! The `"none"` algorithm (in any letter case) is always rejected per
//! [RFC 8725](https://datatracker.ietf.org/doc/html/rfc8725).
//!
//! ### Timing Attack Protection
//!
//! MAC comparison uses the [`constant_time_eq`](https://crates.io/crates/constant_time_eq)
//! crate.
//!
//! ### Not Enforced
//!
//! `iss` and `iat` are carried in the token but not checked on decode. Only
//! `exp` is.
//!
//! ## References
//!
//! - [RFC 7515](https://datatracker.ietf.org/doc/html/rfc7515): JSON Web Signature (JWS)
//! - [RFC 7519](https://datatracker.ietf.org/doc/html/rfc7519): JSON Web Token (JWT)
//! - [RFC 8725](https://datatracker.ietf.org/doc/html/rfc8725): JSON Web Signature Best Practices

// Core modules
pub mod error;
pub mod utils;

pub(crate) mod limits;

// Algorithm system
pub mod algorithm;

// Configuration, header and claims
pub mod claims;
pub mod config;
pub mod header;

// Token states
pub mod token;

// Signer and verifier (main public API)
pub mod signer;
pub mod verifier;

use std::time::SystemTime;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use algorithm::{Algorithm, HS256, HS384, HS512};
pub use claims::{Scopes, TokenClaims};
pub use config::{SigningConfig, SigningKey};
pub use error::{Error, ErrorKind, Result};
pub use header::TokenHeader;
pub use signer::Signer;
pub use verifier::Verifier;

/// Issue an HS256 token for `user_id` carrying `scopes`
pub fn encode<S: AsRef<str>>(
    config: &SigningConfig,
    user_id: &str,
    scopes: &[S],
) -> Result<String> {
    Signer::new(config).encode(user_id, scopes)
}

/// Issue an HS256 token as if the current time were `now`
pub fn encode_at<S: AsRef<str>>(
    config: &SigningConfig,
    user_id: &str,
    scopes: &[S],
    now: SystemTime,
) -> Result<String> {
    Signer::new(config).encode_at(user_id, scopes, now)
}

/// Verify an HS256 token and return its scopes and user id
pub fn decode(config: &SigningConfig, token: &str) -> Result<(Scopes, String)> {
    Verifier::new(config).decode(token)
}

/// Verify an HS256 token as if the current time were `now`
pub fn decode_at(
    config: &SigningConfig,
    token: &str,
    now: SystemTime,
) -> Result<(Scopes, String)> {
    Verifier::new(config).decode_at(token, now)
}

/// Verify an HS256 token and return the full claim set
pub fn decode_claims(config: &SigningConfig, token: &str) -> Result<TokenClaims> {
    Verifier::new(config).decode_claims(token)
}

/// Verify an HS256 token as if the current time were `now` and return the full claim set
pub fn decode_claims_at(
    config: &SigningConfig,
    token: &str,
    now: SystemTime,
) -> Result<TokenClaims> {
    Verifier::new(config).decode_claims_at(token, now)
}
