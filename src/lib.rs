//! Chapa: client SDK for the Chapa payment API.
//!
//! Every API call runs through the same pipeline: the options are checked
//! against the operation's schema ([`validation`]), sent by a single
//! transport that handles auth, logging with redaction, timeouts, retries
//! and cancellation ([`transport`]), and any failure is normalized into a
//! [`ChapaError`] carrying an HTTP-style status ([`error`]). Webhook
//! signatures are verified with HMAC-SHA256 in constant time ([`webhook`]).

pub mod chapa;
pub mod config;
pub mod error;
pub mod operation;
pub mod options;
pub mod reference;
pub mod time;
pub mod transport;
pub mod validation;
pub mod webhook;

#[cfg(test)]
mod test_fixtures;

pub use chapa::Chapa;
pub use config::ClientConfig;
pub use error::ChapaError;
pub use operation::Operation;
pub use reference::{GenTxRefOptions, gen_tx_ref};
pub use webhook::{WebhookPayload, verify_signature};
