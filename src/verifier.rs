//! Token verifier and claims extractor
//!
//! Decoding runs a fixed pipeline, each step failing closed:
//!
//! ```text
//! &str
//!     │ ParsedToken::from_string   (three segments, Base64URL, header JSON)
//!     ▼
//! ParsedToken
//!     │ .verify::<A>(key)          (alg == A::NAME, constant-time MAC check)
//!     ▼
//! VerifiedToken
//!     │ .validate_at(now)          (exp > now, usr / scopes shapes)
//!     ▼
//! TokenClaims
//! ```
//!
//! The algorithm is a type parameter of [`Verifier`], so there is no way to
//! reach the MAC check without first matching the header against it.

use crate::algorithm::{Algorithm, HS256};
use crate::claims::{Scopes, TokenClaims};
use crate::config::SigningConfig;
use crate::error::Result;
use crate::token::ParsedToken;
use std::marker::PhantomData;
use std::time::SystemTime;

/// Token verifier bound to a configuration and a single algorithm
#[derive(Debug, Clone, Copy)]
pub struct Verifier<'a, A: Algorithm = HS256> {
    config: &'a SigningConfig,
    algorithm: PhantomData<A>,
}

impl<'a> Verifier<'a, HS256> {
    /// Create an HS256 verifier
    pub fn new(config: &'a SigningConfig) -> Self {
        Self::with_algorithm(config)
    }
}

impl<'a, A: Algorithm> Verifier<'a, A> {
    /// Create a verifier that only accepts tokens declaring algorithm `A`
    pub fn with_algorithm(config: &'a SigningConfig) -> Self {
        Self {
            config,
            algorithm: PhantomData,
        }
    }

    /// Verify `token` now and return its scopes and user id
    pub fn decode(&self, token: &str) -> Result<(Scopes, String)> {
        self.decode_at(token, SystemTime::now())
    }

    /// Verify `token` as if the current time were `now`
    pub fn decode_at(&self, token: &str, now: SystemTime) -> Result<(Scopes, String)> {
        let claims = self.decode_claims_at(token, now)?;
        Ok((claims.scopes, claims.user_id))
    }

    /// Verify `token` now and return the full claim set
    pub fn decode_claims(&self, token: &str) -> Result<TokenClaims> {
        self.decode_claims_at(token, SystemTime::now())
    }

    /// Verify `token` as if the current time were `now` and return the full claim set
    pub fn decode_claims_at(&self, token: &str, now: SystemTime) -> Result<TokenClaims> {
        let claims = ParsedToken::from_string(token)?
            .verify::<A>(self.config.key())?
            .validate_at(now)?;

        tracing::trace!(
            algorithm = A::NAME,
            scopes = claims.scopes.len(),
            expires_at = claims.expiration,
            "verified token"
        );

        Ok(claims)
    }
}
