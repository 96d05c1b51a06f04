//! # Webhook Signature Verification
//!
//! ArcPay signs each webhook body with HMAC-SHA256 under the shared secret
//! and sends the lowercase hex digest in `X-Signature`.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Verifies `X-Signature` values against the shared secret.
///
/// Without a secret every signature is rejected.
#[derive(Clone)]
pub struct SignatureVerifier {
    secret: Option<String>,
}

impl SignatureVerifier {
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    /// Check if a secret is configured
    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Compute the hex signature for a payload
    pub fn sign(&self, payload: &[u8]) -> Option<String> {
        let mac = self.mac(payload)?;
        Some(hex::encode(mac.finalize().into_bytes()))
    }

    /// Compare `signature` to the HMAC of `payload` in constant time
    pub fn verify(&self, payload: &[u8], signature: &str) -> bool {
        let Ok(expected) = hex::decode(signature.trim()) else {
            return false;
        };
        match self.mac(payload) {
            Some(mac) => mac.verify_slice(&expected).is_ok(),
            None => false,
        }
    }

    fn mac(&self, payload: &[u8]) -> Option<HmacSha256> {
        let secret = self.secret.as_deref()?;
        // HMAC accepts keys of any length
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
        mac.update(payload);
        Some(mac)
    }
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("configured", &self.is_configured())
            .finish()
    }
}
