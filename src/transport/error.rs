//! Error types for transport operations.

use thiserror::Error;

use super::HttpResponse;

/// A failure where no HTTP response was received.
///
/// Describes what went wrong without dictating recovery strategy.
/// The transport decides which variants are worth retrying.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The remote host could not be reached.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and host or network unreachable errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The connection was established but the exchange failed.
    ///
    /// Covers resets mid-request, body read failures and similar
    /// network-level problems that are neither timeouts nor connect errors.
    #[error("Network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The caller cancelled the request.
    #[error("Request was cancelled")]
    Cancelled,

    /// The request URL could not be built.
    ///
    /// This typically indicates a configuration error rather than
    /// a transient failure.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Error returned by [`Transport::send`](super::Transport::send).
///
/// Either no response arrived at all, or the remote API answered with a
/// non-success status. The response is kept whole so the error normalizer
/// can extract the remote message.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No response was received.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The remote API returned a non-2xx status.
    #[error("Remote API returned HTTP {}", .0.status)]
    Status(HttpResponse),
}

impl TransportError {
    /// Returns the HTTP response for [`TransportError::Status`].
    #[must_use]
    pub const fn response(&self) -> Option<&HttpResponse> {
        match self {
            Self::Status(response) => Some(response),
            Self::Http(_) => None,
        }
    }
}
