//! Errors for jwthmac

use thiserror::Error;

/// jwthmac Errors
///
/// Every variant is terminal for the call that produced it. Callers should
/// treat any decode error as "unauthenticated".
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Signing Errors
    // ============================================================================
    #[error("Token signing failed: {0}")]
    Signing(String),

    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    #[error("Invalid token format: expected three parts separated by '.'")]
    FormatInvalid,

    #[error("Base64URL decoding failed: {0}")]
    FormatInvalidBase64(String),

    #[error("JSON parsing failed: {0}")]
    FormatInvalidJson(String),

    #[error("Token header has no 'alg' field")]
    HeaderMissingAlgorithm,

    // ============================================================================
    // Algorithm Errors
    // ============================================================================
    #[error("The 'none' algorithm is rejected for security reasons (RFC 8725)")]
    AlgorithmNoneRejected,

    #[error("Unexpected signing algorithm '{found}' (expected '{expected}')")]
    AlgorithmUnexpected {
        found: String,
        expected: &'static str,
    },

    // ============================================================================
    // Signature Errors
    // ============================================================================
    #[error("Signature verification failed")]
    SignatureInvalid,

    // ============================================================================
    // Token Errors
    // ============================================================================
    #[error("Token expired at {expired_at} (now: {now})")]
    TokenExpired { expired_at: i64, now: i64 },

    // ============================================================================
    // Claim Shape Errors
    // ============================================================================
    #[error("Required token claim '{0}' is missing")]
    ClaimMissing(&'static str),

    #[error("Token claim '{claim}' has the wrong type (expected {expected})")]
    ClaimInvalidType {
        claim: &'static str,
        expected: &'static str,
    },

    #[error("Scope at index {index} is not a string")]
    ScopeInvalidType { index: usize },
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Encode-side failure
    Signing,
    /// Token could not be split or decoded
    MalformedToken,
    /// Header declares an algorithm other than the pinned one
    UnexpectedAlgorithm,
    /// MAC mismatch
    InvalidSignature,
    /// `exp` is at or before the current time
    ExpiredToken,
    /// Payload decoded but a claim is missing or has the wrong type
    ClaimShape,
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Signing(_) => ErrorKind::Signing,
            Error::TokenTooLarge { .. }
            | Error::FormatInvalid
            | Error::FormatInvalidBase64(_)
            | Error::FormatInvalidJson(_)
            | Error::HeaderMissingAlgorithm => ErrorKind::MalformedToken,
            Error::AlgorithmNoneRejected | Error::AlgorithmUnexpected { .. } => {
                ErrorKind::UnexpectedAlgorithm
            }
            Error::SignatureInvalid => ErrorKind::InvalidSignature,
            Error::TokenExpired { .. } => ErrorKind::ExpiredToken,
            Error::ClaimMissing(_)
            | Error::ClaimInvalidType { .. }
            | Error::ScopeInvalidType { .. } => ErrorKind::ClaimShape,
        }
    }

    /// The token parsed but must not be trusted (algorithm, signature or expiry)
    pub fn is_invalid_token(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::UnexpectedAlgorithm | ErrorKind::InvalidSignature | ErrorKind::ExpiredToken
        )
    }
}

/// Result type alias for jwthmac operations
pub type Result<T> = std::result::Result<T, Error>;
