//! Retry policy configuration for transport operations.

use std::time::Duration;

/// Configuration for exponential backoff retry behavior.
///
/// Controls how many times a transient failure is retried and how long
/// to wait between attempts. The delay doubles with every retry.
///
/// # Defaults
///
/// - `retries`: 0 (a single attempt)
/// - `base_delay`: 1 second
///
/// # Example
///
/// ```
/// use chapa::transport::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new()
///     .with_retries(3)
///     .with_base_delay(Duration::from_millis(500));
///
/// assert_eq!(policy.delay_for_retry(1), Duration::from_millis(500));
/// assert_eq!(policy.delay_for_retry(3), Duration::from_millis(2000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Number of retries after the initial attempt.
    ///
    /// A value of 0 means only the initial attempt is made.
    pub retries: u32,

    /// Delay before the first retry.
    ///
    /// The delay before retry `n` is `base_delay * 2^(n-1)`.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Default number of retries.
    pub const DEFAULT_RETRIES: u32 = 0;

    /// Default base delay (1 second).
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

    /// Creates a new retry policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            retries: Self::DEFAULT_RETRIES,
            base_delay: Self::DEFAULT_BASE_DELAY,
        }
    }

    /// Sets the number of retries.
    #[must_use]
    pub const fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Sets the delay before the first retry.
    ///
    /// Zero delay is supported (useful for testing with [`InstantSleeper`])
    /// but not recommended for production as it creates a tight retry loop.
    ///
    /// [`InstantSleeper`]: crate::time::InstantSleeper
    #[must_use]
    pub const fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Total number of attempts this policy allows.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    /// Computes the delay before the given retry (1-indexed).
    ///
    /// `retry = 1` is the wait between the first and second attempt.
    /// Values of 0 are treated as 1. Saturates instead of overflowing.
    #[must_use]
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let exponent = retry.max(1) - 1;
        let factor = 2u32.checked_pow(exponent).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    /// Returns true if another attempt may follow `attempts` completed ones.
    ///
    /// # Arguments
    ///
    /// * `attempts` - Attempts made so far (1 after the initial attempt)
    #[must_use]
    pub const fn should_retry(&self, attempts: u32) -> bool {
        attempts <= self.retries
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}
