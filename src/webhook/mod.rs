//! Webhook signature verification.
//!
//! The remote API signs each webhook delivery with HMAC-SHA256 keyed by the
//! merchant's webhook secret and sends the lowercase hex digest in a header.
//! [`verify_signature`] recomputes that digest and compares it in constant
//! time.

mod signature;

#[cfg(test)]
mod signature_tests;

pub use signature::{WebhookPayload, constant_time_eq, sign_payload, verify_signature};
