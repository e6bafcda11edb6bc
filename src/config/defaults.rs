//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default API base URL.
pub const BASE_URL: &str = "https://api.chapa.co/v1";

/// Default number of retries after the first attempt.
pub const RETRIES: u32 = 0;

/// Default base retry delay in milliseconds.
pub const RETRY_DELAY_MS: u64 = 1000;

/// Default per-attempt timeout in milliseconds.
pub const TIMEOUT_MS: u64 = 30_000;

/// Directory below the platform config directory holding the config file.
pub const CONFIG_DIR_NAME: &str = "chapa";

/// File name of the config file.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default base retry delay as Duration.
#[must_use]
pub const fn retry_delay() -> Duration {
    Duration::from_millis(RETRY_DELAY_MS)
}

/// Default per-attempt timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_millis(TIMEOUT_MS)
}
