//! Error type for option validation.

use thiserror::Error;

/// The first constraint an options object violated.
///
/// The message is human readable and names the offending field path
/// (for example `bulk_data[0].bank_code`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    path: String,
    message: String,
}

impl ValidationError {
    /// Creates an error for the field at `path`.
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// The field path that failed, empty for the options object itself.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The human-readable violation message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
