//! Configuration of the API client itself.

use std::fmt;
use std::time::Duration;

use http::HeaderValue;
use url::Url;

use crate::transport::{LogMode, RetryPolicy};

use super::defaults;
use super::error::{ConfigError, field};

/// Settings for a [`Chapa`](crate::Chapa) client.
///
/// Built with [`ClientConfig::new`] and the `with_*` methods, then handed to
/// the client, which never changes it afterwards. `Debug` output hides both
/// secrets.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use chapa::config::ClientConfig;
///
/// let config = ClientConfig::new("CHASECK_TEST-xxxx")
///     .with_retries(2)
///     .with_timeout(Duration::from_secs(10));
/// assert_eq!(config.retries(), 2);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    secret_key: String,
    webhook_secret: Option<String>,
    logging: bool,
    debug: bool,
    retries: u32,
    retry_delay: Duration,
    timeout: Duration,
    base_url: String,
}

impl ClientConfig {
    /// Creates a configuration with defaults for everything but the key.
    #[must_use]
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            webhook_secret: None,
            logging: false,
            debug: false,
            retries: defaults::RETRIES,
            retry_delay: defaults::retry_delay(),
            timeout: defaults::timeout(),
            base_url: defaults::BASE_URL.to_string(),
        }
    }

    /// Sets the secret used to verify webhook signatures.
    #[must_use]
    pub fn with_webhook_secret(mut self, secret: impl Into<String>) -> Self {
        self.webhook_secret = Some(secret.into());
        self
    }

    /// Logs request and response summaries.
    #[must_use]
    pub const fn with_logging(mut self, logging: bool) -> Self {
        self.logging = logging;
        self
    }

    /// Logs headers, timeouts and retry decisions as well.
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Sets how many times a transient failure is retried.
    #[must_use]
    pub const fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Sets the delay before the first retry. Later retries double it.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Sets the per-attempt timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Points the client at another API root, such as a local stub.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    #[must_use]
    pub fn webhook_secret(&self) -> Option<&str> {
        self.webhook_secret.as_deref()
    }

    #[must_use]
    pub const fn logging(&self) -> bool {
        self.logging
    }

    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    #[must_use]
    pub const fn retries(&self) -> u32 {
        self.retries
    }

    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Logging mode derived from the `logging` and `debug` flags.
    #[must_use]
    pub const fn log_mode(&self) -> LogMode {
        LogMode::from_flags(self.logging, self.debug)
    }

    /// Retry policy derived from `retries` and `retry_delay`.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new()
            .with_retries(self.retries)
            .with_base_delay(self.retry_delay)
    }

    /// Checks the settings and returns the parsed base URL and the
    /// `Authorization` header value.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingRequired`] if the secret key is empty
    /// - [`ConfigError::InvalidSecretKey`] if it cannot be sent in a header
    /// - [`ConfigError::InvalidUrl`] if the base URL is not an http(s) URL
    /// - [`ConfigError::InvalidDuration`] if a duration is zero
    pub fn validate(&self) -> Result<(Url, HeaderValue), ConfigError> {
        if self.secret_key.trim().is_empty() {
            return Err(ConfigError::missing(
                field::SECRET_KEY,
                "Provide the secret key from the dashboard",
            ));
        }

        let authorization = HeaderValue::from_str(&format!("Bearer {}", self.secret_key))
            .map_err(|e| ConfigError::InvalidSecretKey {
                reason: e.to_string(),
            })?;

        let base_url = Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl {
                url: self.base_url.clone(),
                reason: "expected an http or https URL".to_string(),
            });
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::zero_duration(field::TIMEOUT));
        }
        if self.retry_delay.is_zero() {
            return Err(ConfigError::zero_duration(field::RETRY_DELAY));
        }

        Ok((base_url, authorization))
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("secret_key", &crate::transport::redact::REDACTED)
            .field(
                "webhook_secret",
                &self
                    .webhook_secret
                    .as_ref()
                    .map(|_| crate::transport::redact::REDACTED),
            )
            .field("logging", &self.logging)
            .field("debug", &self.debug)
            .field("retries", &self.retries)
            .field("retry_delay", &self.retry_delay)
            .field("timeout", &self.timeout)
            .field("base_url", &self.base_url)
            .finish()
    }
}
