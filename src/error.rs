//! The SDK error taxonomy and the normalizer that produces it.

use http::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::transport::{HttpError, HttpResponse, TransportError};
use crate::validation::ValidationError;

/// Message used when the remote API gives no usable one.
pub const DEFAULT_MESSAGE: &str = "An error occurred";

/// Every failure a [`Chapa`](crate::Chapa) call can return.
#[derive(Debug, Error)]
pub enum ChapaError {
    /// The options failed schema validation. No request was sent.
    #[error("{message}")]
    Validation {
        /// The first violated constraint.
        message: String,
    },

    /// The remote API answered with a non-success status.
    #[error("{message}")]
    Remote {
        /// Message from the response body, or [`DEFAULT_MESSAGE`].
        message: String,
        /// Status the API answered with.
        status: StatusCode,
    },

    /// No response was received.
    #[error("{message}")]
    Transport {
        /// Description of the underlying failure.
        message: String,
        /// 408 for timeouts and cancellations, 503 for unreachable hosts,
        /// 500 otherwise.
        status: StatusCode,
    },

    /// Webhook verification was requested without a webhook secret.
    #[error("Webhook secret not configured")]
    WebhookSecretMissing,

    /// The options could not be turned into JSON.
    #[error("failed to encode request options: {0}")]
    Encode(#[source] serde_json::Error),

    /// A success response body was not the expected JSON.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ChapaError {
    /// HTTP-style status for the normalized kinds.
    ///
    /// Validation failures report 400. Configuration and serialization
    /// failures have no status.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Validation { .. } => Some(StatusCode::BAD_REQUEST),
            Self::Remote { status, .. } | Self::Transport { status, .. } => Some(*status),
            Self::WebhookSecretMissing | Self::Encode(_) | Self::Decode(_) => None,
        }
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message }
            | Self::Remote { message, .. }
            | Self::Transport { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// A failure from one of the pipeline stages, before normalization.
#[derive(Debug)]
pub enum PipelineFailure {
    /// The validator rejected the options.
    Validation(ValidationError),
    /// The transport failed or the API answered with an error status.
    Transport(TransportError),
}

impl From<ValidationError> for PipelineFailure {
    fn from(error: ValidationError) -> Self {
        Self::Validation(error)
    }
}

impl From<TransportError> for PipelineFailure {
    fn from(error: TransportError) -> Self {
        Self::Transport(error)
    }
}

impl From<PipelineFailure> for ChapaError {
    fn from(failure: PipelineFailure) -> Self {
        normalize(failure)
    }
}

/// Converts a pipeline failure into a [`ChapaError`].
#[must_use]
pub fn normalize(failure: PipelineFailure) -> ChapaError {
    match failure {
        PipelineFailure::Validation(error) => ChapaError::Validation {
            message: error.message().to_string(),
        },
        PipelineFailure::Transport(TransportError::Status(response)) => from_response(&response),
        PipelineFailure::Transport(TransportError::Http(error)) => from_http(&error),
    }
}

fn from_response(response: &HttpResponse) -> ChapaError {
    let message = response
        .body_json()
        .as_ref()
        .and_then(|body| body.get("message"))
        .and_then(message_text)
        .unwrap_or_else(|| DEFAULT_MESSAGE.to_string());

    ChapaError::Remote {
        message,
        status: response.status,
    }
}

/// Extracts a message: strings as-is, anything else as compact JSON.
fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn from_http(error: &HttpError) -> ChapaError {
    let status = match error {
        HttpError::Timeout | HttpError::Cancelled => StatusCode::REQUEST_TIMEOUT,
        HttpError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
        HttpError::Network(_) | HttpError::InvalidUrl(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    ChapaError::Transport {
        message: error.to_string(),
        status,
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
