//! HMAC-SHA256 signatures over raw webhook payloads.
//!
//! Signatures travel as `sha256=<lowercase hex>`. The prefix is optional on input; the digest
//! is always computed over the exact request bytes, before any JSON decoding.

use crate::{BlogError, BlogResult};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Scheme prefix carried by signature headers.
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Computes and checks payload signatures for one shared secret.
#[derive(Clone)]
pub struct SignatureVerifier {
    mac: HmacSha256,
}

impl fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureVerifier").finish_non_exhaustive()
    }
}

impl SignatureVerifier {
    /// Key a verifier with `secret`.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::Config`] if the secret is empty.
    pub fn new(secret: impl AsRef<[u8]>) -> BlogResult<Self> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(BlogError::Config("signature secret cannot be empty".into()));
        }

        let mac = HmacSha256::new_from_slice(secret)
            .map_err(|e| BlogError::Config(format!("invalid signature secret: {e}")))?;
        Ok(Self { mac })
    }

    /// Signature for `payload` in header form, `sha256=<hex>`.
    pub fn sign(&self, payload: &[u8]) -> String {
        let mut mac = self.mac.clone();
        mac.update(payload);
        format!(
            "{SIGNATURE_PREFIX}{}",
            hex::encode(mac.finalize().into_bytes())
        )
    }

    /// Check `signature` against `payload`.
    ///
    /// A missing, empty, or non-hex signature is simply invalid. The digest comparison runs in
    /// constant time.
    pub fn verify(&self, payload: &[u8], signature: Option<&str>) -> bool {
        let Some(signature) = signature.map(str::trim).filter(|s| !s.is_empty()) else {
            return false;
        };
        let hex_digest = signature
            .strip_prefix(SIGNATURE_PREFIX)
            .unwrap_or(signature);

        let Ok(expected) = hex::decode(hex_digest) else {
            return false;
        };

        let mut mac = self.mac.clone();
        mac.update(payload);
        mac.verify_slice(&expected).is_ok()
    }
}
