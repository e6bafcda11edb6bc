//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Credentials and endpoint
    #[serde(default)]
    pub api: ApiSection,

    /// Request timeout configuration
    #[serde(default)]
    pub request: RequestSection,

    /// Retry policy configuration
    #[serde(default)]
    pub retry: RetrySection,

    /// Request logging configuration
    #[serde(default)]
    pub logging: LoggingSection,
}

/// API credentials and endpoint section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    /// API secret key
    pub secret_key: Option<String>,

    /// Secret used to verify webhook signatures
    pub webhook_secret: Option<String>,

    /// API base URL
    pub base_url: Option<String>,
}

/// Request configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestSection {
    /// Per-attempt timeout in milliseconds
    pub timeout_ms: Option<u64>,
}

/// Retry policy configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    /// Number of retries after the first attempt
    pub retries: Option<u32>,

    /// Base retry delay in milliseconds
    pub delay_ms: Option<u64>,
}

/// Request logging section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// Log request and response summaries
    #[serde(default)]
    pub requests: bool,

    /// Log headers, timeouts and retry decisions
    #[serde(default)]
    pub debug: bool,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# Chapa CLI Configuration File

[api]
# Secret key from the dashboard (required for API calls)
# Can also be set with --secret-key or the CHAPA_SECRET_KEY environment variable
# secret_key = "CHASECK_TEST-..."

# Secret used to verify webhook signatures
# Can also be set with --webhook-secret or CHAPA_WEBHOOK_SECRET
# webhook_secret = "..."

# API base URL (default: https://api.chapa.co/v1)
# base_url = "https://api.chapa.co/v1"

[request]
# Per-attempt timeout in milliseconds (default: 30000)
# timeout_ms = 30000

[retry]
# Retries for connection failures, timeouts and 5xx responses (default: 0)
# retries = 0

# Base retry delay in milliseconds, doubled on each retry (default: 1000)
# delay_ms = 1000

[logging]
# Log request and response summaries (secrets are redacted)
# requests = false

# Also log headers, timeouts and retry decisions
# debug = false
"#
    .to_string()
}
