use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::header::TokenHeader;
use crate::limits::{
    MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_DECODED_SIGNATURE_SIZE,
    MAX_TOKEN_LENGTH,
};
use crate::token::VerifiedToken;
use crate::utils::base64url;

/// Separator between the three token segments
pub const SEGMENT_SEPARATOR: char = '.';

/// A token that has been split and decoded but not yet verified
///
/// This is the first stage in the decode pipeline. At this stage:
/// - The token has three Base64URL segments
/// - The header has been parsed
/// - The payload has been decoded to bytes (but not parsed)
/// - The signature has been decoded to bytes
///
/// Next step: VerifiedToken (after algorithm pinning and MAC check)
#[derive(Debug)]
pub struct ParsedToken<'a> {
    header: TokenHeader,
    signing_input: &'a str,
    raw_payload: Vec<u8>,
    signature: Vec<u8>,
}

impl<'a> ParsedToken<'a> {
    /// Parse a token from a string
    ///
    /// # Arguments
    /// * `token` - The token string in format "header.payload.signature"
    pub fn from_string(token: &'a str) -> Result<Self> {
        if token.len() > MAX_TOKEN_LENGTH {
            return Err(Error::TokenTooLarge {
                size: token.len(),
                max: MAX_TOKEN_LENGTH,
            });
        }

        let mut parts = token.split(SEGMENT_SEPARATOR);
        let header_b64 = parts.next().ok_or(Error::FormatInvalid)?;
        let payload_b64 = parts.next().ok_or(Error::FormatInvalid)?;
        let signature_b64 = parts.next().ok_or(Error::FormatInvalid)?;
        if parts.next().is_some() {
            return Err(Error::FormatInvalid);
        }

        let header_json = base64url::decode_string(header_b64, MAX_DECODED_HEADER_SIZE)?;
        let header: TokenHeader = miniserde::json::from_str(&header_json)
            .map_err(|e| Error::FormatInvalidJson(format!("Failed to parse header: {e}")))?;

        // Decoded now, read as text only after the MAC check
        let raw_payload = base64url::decode_bytes(payload_b64, MAX_DECODED_PAYLOAD_SIZE)?;
        let signature = base64url::decode_bytes(signature_b64, MAX_DECODED_SIGNATURE_SIZE)?;

        Ok(Self {
            header,
            signing_input: &token[..header_b64.len() + 1 + payload_b64.len()],
            raw_payload,
            signature,
        })
    }

    /// Get the token header
    pub fn header(&self) -> &TokenHeader {
        &self.header
    }

    /// Get the signing input (header.payload)
    pub fn signing_input(&self) -> &str {
        self.signing_input
    }

    /// Pin the algorithm to `A`, check the MAC, and move to VerifiedToken state
    ///
    /// The header's `alg` must name exactly `A`; the key is never used
    /// otherwise.
    pub fn verify<A: Algorithm>(self, key: &[u8]) -> Result<VerifiedToken> {
        self.header.ensure_algorithm::<A>()?;
        A::verify(key, self.signing_input.as_bytes(), &self.signature)?;

        Ok(VerifiedToken::new(self.raw_payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{HS256, HS384};

    fn sign_hs256(header: &str, payload: &str, secret: &[u8]) -> String {
        let signing_input = format!(
            "{}.{}",
            base64url::encode(header),
            base64url::encode(payload)
        );
        let signature = HS256::sign(secret, signing_input.as_bytes()).unwrap();
        format!("{}.{}", signing_input, base64url::encode_bytes(&signature))
    }

    #[test]
    fn test_parse_valid_token() {
        let token = sign_hs256(r#"{"alg":"HS256","typ":"JWT"}"#, r#"{"usr":"u"}"#, b"k");
        let parsed = ParsedToken::from_string(&token).unwrap();

        assert_eq!(parsed.header().algorithm.as_deref(), Some("HS256"));
        assert_eq!(parsed.header().token_type.as_deref(), Some("JWT"));
        assert_eq!(
            parsed.signing_input(),
            token.rsplit_once('.').map(|(input, _)| input).unwrap()
        );
    }

    #[test]
    fn test_parse_invalid_format() {
        assert!(matches!(
            ParsedToken::from_string("not.enough"),
            Err(Error::FormatInvalid)
        ));
        assert!(matches!(
            ParsedToken::from_string("too.many.parts.here"),
            Err(Error::FormatInvalid)
        ));
        assert!(matches!(
            ParsedToken::from_string(""),
            Err(Error::FormatInvalid)
        ));
    }

    #[test]
    fn test_parse_invalid_base64() {
        let result = ParsedToken::from_string("!!!.abc.def");
        assert!(matches!(result, Err(Error::FormatInvalidBase64(_))));
    }

    #[test]
    fn test_parse_invalid_signature_base64() {
        let token = format!(
            "{}.{}.***",
            base64url::encode(r#"{"alg":"HS256"}"#),
            base64url::encode("{}")
        );
        assert!(matches!(
            ParsedToken::from_string(&token),
            Err(Error::FormatInvalidBase64(_))
        ));
    }

    #[test]
    fn test_parse_invalid_json() {
        let token = format!(
            "{}.{}.{}",
            base64url::encode("not json"),
            base64url::encode(r#"{"usr":"u"}"#),
            base64url::encode("sig")
        );
        assert!(matches!(
            ParsedToken::from_string(&token),
            Err(Error::FormatInvalidJson(_))
        ));
    }

    #[test]
    fn test_parse_too_large() {
        let token = "a".repeat(MAX_TOKEN_LENGTH + 1);
        assert!(matches!(
            ParsedToken::from_string(&token),
            Err(Error::TokenTooLarge { .. })
        ));
    }

    #[test]
    fn test_verify_checks_algorithm_before_key() {
        // Correctly signed with HS384, but the verifier is pinned to HS256
        let signing_input = format!(
            "{}.{}",
            base64url::encode(r#"{"alg":"HS384"}"#),
            base64url::encode("{}")
        );
        let signature = HS384::sign(b"k", signing_input.as_bytes()).unwrap();
        let token = format!("{}.{}", signing_input, base64url::encode_bytes(&signature));

        let parsed = ParsedToken::from_string(&token).unwrap();
        assert!(matches!(
            parsed.verify::<HS256>(b"k"),
            Err(Error::AlgorithmUnexpected { .. })
        ));

        let parsed = ParsedToken::from_string(&token).unwrap();
        assert!(parsed.verify::<HS384>(b"k").is_ok());
    }

    #[test]
    fn test_invalid_utf8_payload_reaches_mac_check() {
        let signing_input = format!(
            "{}.{}",
            base64url::encode(r#"{"alg":"HS256"}"#),
            base64url::encode_bytes(&[0x7b, 0xff, 0x7d])
        );
        let signature = HS256::sign(b"k", signing_input.as_bytes()).unwrap();
        let token = format!("{}.{}", signing_input, base64url::encode_bytes(&signature));

        let parsed = ParsedToken::from_string(&token).unwrap();
        assert!(matches!(
            parsed.verify::<HS256>(b"other"),
            Err(Error::SignatureInvalid)
        ));
    }

    #[test]
    fn test_verify_wrong_key() {
        let token = sign_hs256(r#"{"alg":"HS256"}"#, r#"{"usr":"u"}"#, b"k");
        let parsed = ParsedToken::from_string(&token).unwrap();
        assert!(matches!(
            parsed.verify::<HS256>(b"other"),
            Err(Error::SignatureInvalid)
        ));
    }
}
