use crate::error::{Error, Result};

use constant_time_eq::constant_time_eq;

mod sealed {
    pub trait Sealed {}
}

pub(crate) use sealed::Sealed;

/// Core algorithm trait that every supported token algorithm implements
///
/// The trait is sealed: the crate decides which algorithms exist, so a
/// verifier can never be instantiated with an asymmetric or unsigned scheme.
pub trait Algorithm: Sealed + Send + Sync + 'static {
    /// The `alg` header value (e.g. "HS256")
    const NAME: &'static str;

    /// Compute the raw MAC over `signing_input` (header.payload)
    fn sign(key: &[u8], signing_input: &[u8]) -> Result<Vec<u8>>;

    /// Verify a decoded signature against `signing_input`
    ///
    /// The comparison runs in constant time.
    fn verify(key: &[u8], signing_input: &[u8], provided: &[u8]) -> Result<()> {
        let expected = Self::sign(key, signing_input).map_err(|_| Error::SignatureInvalid)?;

        if provided.len() != expected.len() {
            return Err(Error::SignatureInvalid);
        }

        if constant_time_eq(provided, &expected) {
            Ok(())
        } else {
            Err(Error::SignatureInvalid)
        }
    }
}
