//! HMAC-SHA512 signing and verification for payment gateway webhooks.
//!
//! The gateway signs the raw request body with the merchant secret and
//! sends the lowercase hex digest in [`SIGNATURE_HEADER`]. A webhook payload
//! must not be parsed or trusted before [`verify_signature`] accepts it.

use hmac::{Hmac, Mac};
use sha2::Sha512;

/// Header carrying the hex-encoded signature.
pub const SIGNATURE_HEADER: &str = "x-gateway-signature";

type HmacSha512 = Hmac<Sha512>;

/// Compute the hex-encoded HMAC-SHA512 of `body` under `secret`.
pub fn sign_payload(secret: &str, body: &[u8]) -> String {
    let mut mac =
        HmacSha512::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Check `signature_hex` against the HMAC of `body`, in constant time.
///
/// Returns `false` for an empty secret, malformed hex, or a mismatch.
pub fn verify_signature(secret: &str, body: &[u8], signature_hex: &str) -> bool {
    if secret.is_empty() {
        return false;
    }
    let Some(expected) = hex::decode(signature_hex.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha512::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

mod hex {
    /// Encode bytes as a lowercase hex string.
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Decode a hex string (either case). `None` on odd length or bad digits.
    pub fn decode(s: &str) -> Option<Vec<u8>> {
        if s.len() % 2 != 0 {
            return None;
        }
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(s.get(i..i + 2)?, 16).ok())
            .collect()
    }
}
