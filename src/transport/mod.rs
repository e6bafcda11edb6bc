//! Transport layer for talking to the Chapa API.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`], [`ApiRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Auth, logging, timeouts and retries ([`Transport`])
//! - Retry policy configuration ([`RetryPolicy`])
//! - Redaction of secrets in diagnostics ([`redact`])

mod client;
mod error;
mod http;
pub mod redact;
mod request;
mod retry;
mod sender;

#[cfg(test)]
mod redact_tests;

pub use client::ReqwestClient;
pub use error::{HttpError, TransportError};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use request::{ApiRequest, RequestBody};
pub use retry::RetryPolicy;
pub use sender::{IsRetryable, LogMode, Transport};
