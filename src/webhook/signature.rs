//! HMAC-SHA256 signing and constant-time verification.

use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// A webhook body as received by the caller's handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookPayload {
    /// The raw request body, signed exactly as given.
    Raw(String),
    /// A parsed body, signed over its compact JSON serialization.
    Json(Value),
}

impl WebhookPayload {
    /// The string the signature is computed over.
    #[must_use]
    pub fn canonical(&self) -> String {
        match self {
            Self::Raw(raw) => raw.clone(),
            Self::Json(value) => value.to_string(),
        }
    }
}

impl From<String> for WebhookPayload {
    fn from(raw: String) -> Self {
        Self::Raw(raw)
    }
}

impl From<&str> for WebhookPayload {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_string())
    }
}

impl From<Value> for WebhookPayload {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

/// Computes the lowercase hex HMAC-SHA256 signature of `payload`.
#[must_use]
pub fn sign_payload(payload: &WebhookPayload, secret: &str) -> String {
    // HMAC accepts any key length: short keys are padded, long ones hashed
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(payload.canonical().as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Returns true if `signature` is the signature of `payload` under `secret`.
///
/// The comparison is exact against lowercase hex. Signatures of the wrong
/// length or with non-hex characters are rejected without panicking.
#[must_use]
pub fn verify_signature(payload: &WebhookPayload, signature: &str, secret: &str) -> bool {
    let expected = sign_payload(payload, secret);
    constant_time_eq(expected.as_bytes(), signature.as_bytes())
}

/// Compares two byte strings without exiting early.
///
/// Runs over the longer of the two inputs. Positions past the end of the
/// shorter one compare against zero, and the length difference is folded
/// into the result.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let mut equal = a.len().ct_eq(&b.len());
    for i in 0..a.len().max(b.len()) {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        equal &= x.ct_eq(&y);
    }
    equal.into()
}
