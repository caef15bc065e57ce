//! Claims assembler and signer
//!
//! Builds the claim set for a user and scope list, serializes header and
//! payload, and appends the MAC computed with the configured key.

use crate::algorithm::{Algorithm, HS256};
use crate::claims::TokenClaims;
use crate::config::SigningConfig;
use crate::error::Result;
use crate::header::TokenHeader;
use crate::token::SEGMENT_SEPARATOR;
use crate::utils::base64url;
use std::marker::PhantomData;
use std::time::SystemTime;

/// Token signer bound to a configuration and a single algorithm
///
/// `Signer::new` signs with HS256; [`Signer::with_algorithm`] picks another
/// member of the HMAC family.
#[derive(Debug, Clone, Copy)]
pub struct Signer<'a, A: Algorithm = HS256> {
    config: &'a SigningConfig,
    algorithm: PhantomData<A>,
}

impl<'a> Signer<'a, HS256> {
    /// Create an HS256 signer
    pub fn new(config: &'a SigningConfig) -> Self {
        Self::with_algorithm(config)
    }
}

impl<'a, A: Algorithm> Signer<'a, A> {
    /// Create a signer for algorithm `A`
    pub fn with_algorithm(config: &'a SigningConfig) -> Self {
        Self {
            config,
            algorithm: PhantomData,
        }
    }

    /// Issue a token for `user_id` with `scopes`, valid from now
    pub fn encode<S: AsRef<str>>(&self, user_id: &str, scopes: &[S]) -> Result<String> {
        self.encode_at(user_id, scopes, SystemTime::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn encode_at<S: AsRef<str>>(
        &self,
        user_id: &str,
        scopes: &[S],
        now: SystemTime,
    ) -> Result<String> {
        let claims = TokenClaims::issue(self.config, user_id, scopes, now)?;
        let token = self.sign_claims(&claims)?;

        tracing::debug!(
            algorithm = A::NAME,
            issuer = %self.config.issuer,
            scopes = claims.scopes.len(),
            expires_at = claims.expiration,
            "issued token"
        );

        Ok(token)
    }

    /// Serialize and sign an already assembled claim set
    pub fn sign_claims(&self, claims: &TokenClaims) -> Result<String> {
        let header_json = miniserde::json::to_string(&TokenHeader::for_algorithm::<A>());
        let payload_json = miniserde::json::to_string(claims);

        let mut token = base64url::encode(&header_json);
        token.push(SEGMENT_SEPARATOR);
        token.push_str(&base64url::encode(&payload_json));

        let signature = A::sign(self.config.key(), token.as_bytes())?;
        token.push(SEGMENT_SEPARATOR);
        token.push_str(&base64url::encode_bytes(&signature));

        Ok(token)
    }
}
