//! Encoding helpers shared by the signer and the verifier

pub mod base64url;
