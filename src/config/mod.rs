//! Configuration layer.
//!
//! This module provides:
//! - Client configuration ([`ClientConfig`]), the only piece the library needs
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration for the binary ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! The binary resolves values with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - including `CHAPA_SECRET_KEY` and
//!    `CHAPA_WEBHOOK_SECRET` from the environment
//! 2. **TOML config file** - `--config`, or `<config_dir>/chapa/config.toml`
//!    when it exists
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! # Boolean Flag Semantics
//!
//! Boolean flags (`--log-requests`, `--debug`) use OR semantics:
//! if set `true` in either CLI or TOML, the result is `true`.

mod cli;
mod client;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command, InitializeArgs, VerifyWebhookArgs};
pub use client::ClientConfig;
pub use error::{ConfigError, field};
pub use toml::{ApiSection, LoggingSection, RequestSection, RetrySection, TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, default_config_path, write_default_config};
