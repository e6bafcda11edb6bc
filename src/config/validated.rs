//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the binary. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use super::cli::Cli;
use super::client::ClientConfig;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the binary.
///
/// The secret key stays optional here because some commands never talk to
/// the API; [`ValidatedConfig::client_config`] enforces it.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
#[derive(Clone)]
pub struct ValidatedConfig {
    /// API secret key
    pub secret_key: Option<String>,

    /// Secret used to verify webhook signatures
    pub webhook_secret: Option<String>,

    /// API base URL
    pub base_url: Url,

    /// Retries after the first attempt
    pub retries: u32,

    /// Base retry delay
    pub retry_delay: Duration,

    /// Per-attempt timeout
    pub timeout: Duration,

    /// Request summary logging
    pub log_requests: bool,

    /// Detailed request logging
    pub debug: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ base_url: {}, secret_key: {}, webhook_secret: {}, retries: {}, \
             retry_delay: {}ms, timeout: {}ms, log_requests: {}, debug: {} }}",
            self.base_url,
            presence(self.secret_key.as_ref()),
            presence(self.webhook_secret.as_ref()),
            self.retries,
            self.retry_delay.as_millis(),
            self.timeout.as_millis(),
            self.log_requests,
            self.debug,
        )
    }
}

impl fmt::Debug for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

const fn presence<T>(value: Option<&T>) -> &'static str {
    if value.is_some() { "set" } else { "unset" }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The base URL is invalid
    /// - Duration values are zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let api = toml.map(|t| &t.api);

        // Priority: CLI explicit (including env) > TOML
        let secret_key = cli
            .secret_key
            .clone()
            .or_else(|| api.and_then(|a| a.secret_key.clone()))
            .filter(|s| !s.trim().is_empty());

        let webhook_secret = cli
            .webhook_secret
            .clone()
            .or_else(|| api.and_then(|a| a.webhook_secret.clone()))
            .filter(|s| !s.is_empty());

        let base_url = Self::resolve_base_url(cli, toml)?;

        let retries = cli
            .retries
            .or_else(|| toml.and_then(|t| t.retry.retries))
            .unwrap_or(defaults::RETRIES);

        let retry_delay = Self::resolve_millis(
            cli.retry_delay,
            toml.and_then(|t| t.retry.delay_ms),
            defaults::RETRY_DELAY_MS,
            field::RETRY_DELAY,
        )?;

        let timeout = Self::resolve_millis(
            cli.timeout,
            toml.and_then(|t| t.request.timeout_ms),
            defaults::TIMEOUT_MS,
            field::TIMEOUT,
        )?;

        // Flags only enable: set in either source means on
        let log_requests = cli.log_requests || toml.is_some_and(|t| t.logging.requests);
        let debug = cli.debug || toml.is_some_and(|t| t.logging.debug);

        Ok(Self {
            secret_key,
            webhook_secret,
            base_url,
            retries,
            retry_delay,
            timeout,
            log_requests,
            debug,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// Uses `cli.config` if set, otherwise the default config file if it
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli
            .config
            .clone()
            .or_else(|| default_config_path().filter(|p| p.is_file()));

        let toml = match path {
            Some(ref path) => Some(TomlConfig::load(path)?),
            None => None,
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// Builds the client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if no secret key was given.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let secret_key = self.secret_key.as_deref().ok_or_else(|| {
            ConfigError::missing(
                field::SECRET_KEY,
                "Use --secret-key, set CHAPA_SECRET_KEY, or set api.secret_key in config file",
            )
        })?;

        let mut config = ClientConfig::new(secret_key)
            .with_base_url(self.base_url.as_str())
            .with_retries(self.retries)
            .with_retry_delay(self.retry_delay)
            .with_timeout(self.timeout)
            .with_logging(self.log_requests)
            .with_debug(self.debug);
        if let Some(ref secret) = self.webhook_secret {
            config = config.with_webhook_secret(secret.clone());
        }

        Ok(config)
    }

    fn resolve_base_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        let url_str = cli
            .base_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.api.base_url.as_deref()))
            .unwrap_or(defaults::BASE_URL);

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: "expected an http or https URL".to_string(),
            });
        }

        Ok(url)
    }

    fn resolve_millis(
        cli: Option<u64>,
        toml: Option<u64>,
        default: u64,
        field: &'static str,
    ) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let millis = cli.or(toml).unwrap_or(default);

        if millis == 0 {
            return Err(ConfigError::zero_duration(field));
        }

        Ok(Duration::from_millis(millis))
    }
}

/// Default config file location: `<config_dir>/chapa/config.toml`.
///
/// Returns `None` on platforms without a config directory.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| {
        dir.join(defaults::CONFIG_DIR_NAME)
            .join(defaults::CONFIG_FILE_NAME)
    })
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
