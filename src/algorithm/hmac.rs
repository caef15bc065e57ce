use crate::algorithm::traits::{Algorithm, Sealed};
use crate::error::{Error, Result};

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

/// HS256 algorithm (HMAC with SHA-256)
#[derive(Debug, Clone, Copy, Default)]
pub struct HS256;

/// HS384 algorithm (HMAC with SHA-384)
#[derive(Debug, Clone, Copy, Default)]
pub struct HS384;

/// HS512 algorithm (HMAC with SHA-512)
#[derive(Debug, Clone, Copy, Default)]
pub struct HS512;

impl Sealed for HS256 {}
impl Sealed for HS384 {}
impl Sealed for HS512 {}

impl Algorithm for HS256 {
    const NAME: &'static str = "HS256";

    fn sign(key: &[u8], signing_input: &[u8]) -> Result<Vec<u8>> {
        compute_mac::<Hmac<Sha256>>(key, signing_input)
    }
}

impl Algorithm for HS384 {
    const NAME: &'static str = "HS384";

    fn sign(key: &[u8], signing_input: &[u8]) -> Result<Vec<u8>> {
        compute_mac::<Hmac<Sha384>>(key, signing_input)
    }
}

impl Algorithm for HS512 {
    const NAME: &'static str = "HS512";

    fn sign(key: &[u8], signing_input: &[u8]) -> Result<Vec<u8>> {
        compute_mac::<Hmac<Sha512>>(key, signing_input)
    }
}

/// HMAC over `signing_input` keyed with `key`
fn compute_mac<M>(key: &[u8], signing_input: &[u8]) -> Result<Vec<u8>>
where
    M: Mac + KeyInit,
{
    let mut mac = <M as Mac>::new_from_slice(key)
        .map_err(|e| Error::Signing(format!("invalid HMAC key: {e}")))?;
    mac.update(signing_input);
    Ok(mac.finalize().into_bytes().to_vec())
}
