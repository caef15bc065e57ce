//! Signing algorithms
//!
//! Only the HMAC family is implemented. The signer and verifier are generic
//! over a single [`Algorithm`], so the algorithm a token must declare is fixed
//! by the type the caller picks, never by the token itself. `HS256` is the
//! default everywhere.

mod hmac;
mod traits;

pub use self::hmac::{HS256, HS384, HS512};
pub use traits::Algorithm;

/// Name of the unsigned JWS algorithm, always rejected
pub(crate) const NONE_ALGORITHM: &str = "none";
