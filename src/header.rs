use crate::algorithm::{Algorithm, NONE_ALGORITHM};
use crate::error::{Error, Result};
use crate::limits::MAX_ALG_LENGTH;
use miniserde::{Deserialize, Serialize};

/// `typ` header value written by the signer
pub const TOKEN_TYPE: &str = "JWT";

/// Token header structure
///
/// Unknown header fields (including `kid`) are ignored on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenHeader {
    /// Algorithm used for signing
    #[serde(rename = "alg")]
    pub algorithm: Option<String>,

    /// Token type (typically "JWT")
    #[serde(rename = "typ")]
    pub token_type: Option<String>,
}

impl TokenHeader {
    /// Header declaring algorithm `A`
    pub fn for_algorithm<A: Algorithm>() -> Self {
        Self {
            algorithm: Some(A::NAME.to_string()),
            token_type: Some(TOKEN_TYPE.to_string()),
        }
    }

    /// Get algorithm as string
    pub fn algorithm_str(&self) -> Result<&str> {
        self.algorithm
            .as_deref()
            .ok_or(Error::HeaderMissingAlgorithm)
    }

    /// Require the declared algorithm to be exactly `A`
    pub(crate) fn ensure_algorithm<A: Algorithm>(&self) -> Result<()> {
        let declared = self.algorithm_str()?;

        if declared.eq_ignore_ascii_case(NONE_ALGORITHM) {
            return Err(Error::AlgorithmNoneRejected);
        }

        if declared != A::NAME {
            // Don't echo arbitrarily long attacker input into the error
            let found = if declared.len() > MAX_ALG_LENGTH {
                format!("<{} bytes>", declared.len())
            } else {
                declared.to_string()
            };
            return Err(Error::AlgorithmUnexpected {
                found,
                expected: A::NAME,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{HS256, HS512};

    fn header(alg: &str) -> TokenHeader {
        TokenHeader {
            algorithm: Some(alg.to_string()),
            token_type: None,
        }
    }

    #[test]
    fn test_serialized_layout() {
        let json = miniserde::json::to_string(&TokenHeader::for_algorithm::<HS256>());
        assert_eq!(json, r#"{"alg":"HS256","typ":"JWT"}"#);
    }

    #[test]
    fn test_ensure_algorithm_exact_match() {
        assert!(header("HS256").ensure_algorithm::<HS256>().is_ok());
        assert!(header("HS512").ensure_algorithm::<HS512>().is_ok());
    }

    #[test]
    fn test_ensure_algorithm_rejects_none_variants() {
        for alg in ["none", "None", "NONE", "nOnE"] {
            assert!(matches!(
                header(alg).ensure_algorithm::<HS256>(),
                Err(Error::AlgorithmNoneRejected)
            ));
        }
    }

    #[test]
    fn test_ensure_algorithm_rejects_other_families() {
        for alg in ["RS256", "ES256", "PS256", "HS384", "HS512", "hs256", ""] {
            assert!(matches!(
                header(alg).ensure_algorithm::<HS256>(),
                Err(Error::AlgorithmUnexpected { expected: "HS256", .. })
            ));
        }
    }

    #[test]
    fn test_ensure_algorithm_truncates_long_names() {
        let long = "X".repeat(1000);
        match header(&long).ensure_algorithm::<HS256>() {
            Err(Error::AlgorithmUnexpected { found, .. }) => assert_eq!(found, "<1000 bytes>"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_missing_algorithm() {
        let header = TokenHeader {
            algorithm: None,
            token_type: Some("JWT".into()),
        };
        assert!(matches!(
            header.ensure_algorithm::<HS256>(),
            Err(Error::HeaderMissingAlgorithm)
        ));
    }
}
