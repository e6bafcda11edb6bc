//! The configured API transport: auth, logging, timeout, retries, cancellation.

use std::time::Duration;

use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use tokio_util::sync::CancellationToken;

use crate::time::{Sleeper, TokioSleeper};

use super::redact::{redact_body, redact_headers};
use super::{ApiRequest, HttpClient, HttpError, HttpRequest, HttpResponse, RetryPolicy, TransportError};

/// Target used for all transport diagnostics.
const LOG_TARGET: &str = "chapa::transport";

/// How much request/response detail the transport logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    /// Nothing is logged.
    #[default]
    Off,
    /// Method, URL, body and status.
    Summary,
    /// Everything in `Summary` plus headers, timeouts and retry decisions.
    Debug,
}

impl LogMode {
    /// Derives the mode from the client's `logging` and `debug` flags.
    #[must_use]
    pub const fn from_flags(logging: bool, debug: bool) -> Self {
        if debug {
            Self::Debug
        } else if logging {
            Self::Summary
        } else {
            Self::Off
        }
    }
}

/// HTTP transport shared by every API operation.
///
/// Every request gets a single `Authorization: Bearer <secret>` header and a
/// content type matching its body. Each attempt is bounded by the configured
/// timeout; transient failures (no response, or a 5xx status) are retried
/// according to the [`RetryPolicy`], waiting through the sleeper between
/// attempts.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `S`: The sleeper implementation for retry delays (defaults to [`TokioSleeper`])
#[derive(Debug)]
pub struct Transport<H, S = TokioSleeper> {
    client: H,
    sleeper: S,
    base_url: url::Url,
    authorization: HeaderValue,
    timeout: Duration,
    retry_policy: RetryPolicy,
    log_mode: LogMode,
}

impl<H> Transport<H, TokioSleeper> {
    /// Default per-attempt timeout (30 seconds).
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a transport with no retries, no logging and the default timeout.
    ///
    /// `authorization` is the full header value, e.g. `Bearer sk_test_...`.
    /// It is marked sensitive so `http` never prints it.
    #[must_use]
    pub fn new(client: H, base_url: url::Url, mut authorization: HeaderValue) -> Self {
        authorization.set_sensitive(true);
        Self {
            client,
            sleeper: TokioSleeper,
            base_url,
            authorization,
            timeout: Self::DEFAULT_TIMEOUT,
            retry_policy: RetryPolicy::default(),
            log_mode: LogMode::Off,
        }
    }
}

impl<H, S> Transport<H, S> {
    /// Sets a custom sleeper for retry delays.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> Transport<H, S2> {
        Transport {
            client: self.client,
            sleeper,
            base_url: self.base_url,
            authorization: self.authorization,
            timeout: self.timeout,
            retry_policy: self.retry_policy,
            log_mode: self.log_mode,
        }
    }

    /// Sets the per-attempt timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub const fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Sets the logging mode.
    #[must_use]
    pub const fn with_log_mode(mut self, mode: LogMode) -> Self {
        self.log_mode = mode;
        self
    }

    /// Returns the base URL requests are joined onto.
    #[must_use]
    pub const fn base_url(&self) -> &url::Url {
        &self.base_url
    }

    /// Returns the per-attempt timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the configured retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns the logging mode.
    #[must_use]
    pub const fn log_mode(&self) -> LogMode {
        self.log_mode
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn client(&self) -> &H {
        &self.client
    }

    /// Builds the concrete HTTP request for an API request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUrl`] if the URL cannot be built.
    pub fn build_request(&self, request: &ApiRequest) -> Result<HttpRequest, HttpError> {
        let url = request.url(&self.base_url).map_err(HttpError::InvalidUrl)?;

        let mut http_request = HttpRequest::new(request.method.clone(), url)
            .with_header(AUTHORIZATION, self.authorization.clone())
            .with_header(
                CONTENT_TYPE,
                HeaderValue::from_static(request.body.content_type()),
            );
        http_request.body = request.body.encode();

        Ok(http_request)
    }
}

impl<H: HttpClient, S: Sleeper> Transport<H, S> {
    /// Sends an API request, retrying transient failures.
    ///
    /// The cancellation token, when given, is observed during every attempt
    /// and every backoff wait.
    ///
    /// # Errors
    ///
    /// - [`TransportError::Status`] if the API answered with a non-2xx status
    ///   (after retries for 5xx)
    /// - [`TransportError::Http`] if no response was received after all
    ///   attempts, the request was cancelled, or the URL was invalid
    pub async fn send(
        &self,
        request: &ApiRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<HttpResponse, TransportError> {
        let http_request = self.build_request(request)?;
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            self.log_request(&http_request, attempts);

            let error = match self.attempt(&http_request, cancel).await {
                Ok(response) => {
                    self.log_response(&response);
                    return Ok(response);
                }
                Err(error) => error,
            };
            self.log_failure(&error);

            if !error.is_retryable() || !self.retry_policy.should_retry(attempts) {
                return Err(error);
            }

            let delay = self.retry_policy.delay_for_retry(attempts);
            if self.log_mode == LogMode::Debug {
                tracing::info!(
                    target: LOG_TARGET,
                    retry = attempts,
                    retries = self.retry_policy.retries,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "Retrying request"
                );
            }
            self.pause(delay, cancel).await?;
        }
    }

    /// Executes a single attempt under the per-attempt timeout.
    async fn attempt(
        &self,
        request: &HttpRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<HttpResponse, TransportError> {
        let exchange = tokio::time::timeout(self.timeout, self.client.request(request.clone()));

        let outcome = match cancel {
            Some(token) => tokio::select! {
                biased;
                () = token.cancelled() => return Err(HttpError::Cancelled.into()),
                outcome = exchange => outcome,
            },
            None => exchange.await,
        };

        let response = outcome.map_err(|_| HttpError::Timeout)??;
        if response.is_success() {
            Ok(response)
        } else {
            Err(TransportError::Status(response))
        }
    }

    /// Waits out a backoff delay unless cancelled first.
    async fn pause(
        &self,
        delay: Duration,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), TransportError> {
        match cancel {
            Some(token) => tokio::select! {
                biased;
                () = token.cancelled() => Err(HttpError::Cancelled.into()),
                () = self.sleeper.sleep(delay) => Ok(()),
            },
            None => {
                self.sleeper.sleep(delay).await;
                Ok(())
            }
        }
    }

    fn log_request(&self, request: &HttpRequest, attempt: u32) {
        let body = request
            .body
            .as_deref()
            .map(|b| redact_body(request.content_type(), b))
            .unwrap_or_default();

        match self.log_mode {
            LogMode::Off => {}
            LogMode::Summary => tracing::info!(
                target: LOG_TARGET,
                method = %request.method,
                url = %request.url,
                body = %body,
                "Chapa request"
            ),
            LogMode::Debug => tracing::info!(
                target: LOG_TARGET,
                method = %request.method,
                url = %request.url,
                headers = ?redact_headers(&request.headers),
                body = %body,
                timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
                attempt,
                "Chapa request"
            ),
        }
    }

    fn log_response(&self, response: &HttpResponse) {
        let content_type = response
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());

        match self.log_mode {
            LogMode::Off => {}
            LogMode::Summary => tracing::info!(
                target: LOG_TARGET,
                status = response.status.as_u16(),
                body = %redact_body(content_type, &response.body),
                "Chapa response"
            ),
            LogMode::Debug => tracing::info!(
                target: LOG_TARGET,
                status = response.status.as_u16(),
                reason = response.status.canonical_reason().unwrap_or(""),
                headers = ?redact_headers(&response.headers),
                body = %redact_body(content_type, &response.body),
                "Chapa response"
            ),
        }
    }

    fn log_failure(&self, error: &TransportError) {
        if self.log_mode == LogMode::Off {
            return;
        }

        match error {
            TransportError::Status(response) => {
                let content_type = response
                    .headers
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok());
                if self.log_mode == LogMode::Debug {
                    tracing::warn!(
                        target: LOG_TARGET,
                        status = response.status.as_u16(),
                        reason = response.status.canonical_reason().unwrap_or(""),
                        headers = ?redact_headers(&response.headers),
                        body = %redact_body(content_type, &response.body),
                        "Chapa response error"
                    );
                } else {
                    tracing::warn!(
                        target: LOG_TARGET,
                        status = response.status.as_u16(),
                        body = %redact_body(content_type, &response.body),
                        "Chapa response error"
                    );
                }
            }
            TransportError::Http(e) => {
                tracing::warn!(target: LOG_TARGET, error = %e, "Chapa request error");
            }
        }
    }
}

/// Extension trait for checking if an error is retryable.
///
/// Determines whether a failure is transient and warrants another attempt.
/// Used by [`Transport`] to decide whether to continue retrying.
pub trait IsRetryable {
    /// Returns true if the error is potentially transient and should be retried.
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for HttpError {
    fn is_retryable(&self) -> bool {
        match self {
            // Nothing came back; the next attempt may get through
            Self::Connection(_) | Self::Network(_) | Self::Timeout => true,
            // The caller asked to stop; URL errors are configuration issues
            Self::Cancelled | Self::InvalidUrl(_) => false,
        }
    }
}

impl IsRetryable for TransportError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_retryable(),
            // Only server errors are transient; 4xx means the request itself is wrong
            Self::Status(response) => response.status.is_server_error(),
        }
    }
}
