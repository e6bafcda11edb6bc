//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Command-line client for the Chapa payment API.
///
/// Sends validated requests, prints the JSON response, and verifies webhook
/// signatures.
#[derive(Debug, Parser)]
#[command(name = "chapa")]
#[command(version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally boolean
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// API secret key
    #[arg(long = "secret-key", env = "CHAPA_SECRET_KEY", global = true, hide_env_values = true)]
    pub secret_key: Option<String>,

    /// Secret used to verify webhook signatures
    #[arg(
        long = "webhook-secret",
        env = "CHAPA_WEBHOOK_SECRET",
        global = true,
        hide_env_values = true
    )]
    pub webhook_secret: Option<String>,

    /// API base URL
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Number of retries for transient failures
    #[arg(long, global = true)]
    pub retries: Option<u32>,

    /// Base retry delay in milliseconds (doubles on each retry)
    #[arg(long = "retry-delay", value_name = "MS", global = true)]
    pub retry_delay: Option<u64>,

    /// Per-attempt timeout in milliseconds
    #[arg(long, value_name = "MS", global = true)]
    pub timeout: Option<u64>,

    /// Log request and response summaries
    #[arg(long = "log-requests", global = true)]
    pub log_requests: bool,

    /// Log headers, timeouts and retry decisions
    #[arg(long, global = true)]
    pub debug: bool,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for chapa
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "chapa.toml")]
        output: PathBuf,
    },

    /// Start a checkout and print the checkout URL response
    Initialize(InitializeArgs),

    /// Verify a transaction
    Verify {
        /// Transaction reference
        tx_ref: String,
    },

    /// List supported banks
    Banks,

    /// List transactions
    Transactions,

    /// List the events of a transaction
    Logs {
        /// Transaction reference id
        ref_id: String,
    },

    /// List transfers
    Transfers,

    /// Verify a transfer
    VerifyTransfer {
        /// Transfer reference
        tx_ref: String,
    },

    /// Refund a transaction
    Refund {
        /// Transaction reference
        tx_ref: String,

        /// Reason shown to the customer
        #[arg(long)]
        reason: Option<String>,

        /// Amount to refund (defaults to the full amount)
        #[arg(long)]
        amount: Option<String>,
    },

    /// Generate a transaction reference
    TxRef {
        /// Prefix placed before the random part
        #[arg(long)]
        prefix: Option<String>,

        /// Number of random characters
        #[arg(long)]
        size: Option<usize>,

        /// Print only the random part
        #[arg(long = "no-prefix")]
        no_prefix: bool,
    },

    /// Verify a webhook signature
    VerifyWebhook(VerifyWebhookArgs),
}

/// Arguments for the `initialize` subcommand.
#[derive(Debug, Args)]
pub struct InitializeArgs {
    /// Amount to charge
    #[arg(long)]
    pub amount: String,

    /// Currency code
    #[arg(long, default_value = "ETB")]
    pub currency: String,

    /// Transaction reference (generated when omitted)
    #[arg(long = "tx-ref")]
    pub tx_ref: Option<String>,

    /// Customer email
    #[arg(long)]
    pub email: Option<String>,

    /// Customer first name
    #[arg(long = "first-name")]
    pub first_name: Option<String>,

    /// Customer last name
    #[arg(long = "last-name")]
    pub last_name: Option<String>,

    /// Customer phone number (09XXXXXXXX or 07XXXXXXXX)
    #[arg(long = "phone-number")]
    pub phone_number: Option<String>,

    /// URL the API calls after payment
    #[arg(long = "callback-url")]
    pub callback_url: Option<String>,

    /// URL the customer returns to after payment
    #[arg(long = "return-url")]
    pub return_url: Option<String>,

    /// Use the mobile checkout endpoint
    #[arg(long)]
    pub mobile: bool,
}

/// Arguments for the `verify-webhook` subcommand.
///
/// Exactly one of `--payload` and `--payload-file` must be given.
#[derive(Debug, Args)]
pub struct VerifyWebhookArgs {
    /// Signature header value
    #[arg(long)]
    pub signature: String,

    /// Raw webhook body
    #[arg(
        long,
        required_unless_present = "payload_file",
        conflicts_with = "payload_file"
    )]
    pub payload: Option<String>,

    /// File holding the raw webhook body
    #[arg(long = "payload-file")]
    pub payload_file: Option<PathBuf>,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Parses CLI arguments from an iterator, returning clap's error.
    ///
    /// # Errors
    ///
    /// Returns the clap error for unknown or missing arguments.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }

    /// Returns true if the command works without an API secret key.
    #[must_use]
    pub const fn is_offline(&self) -> bool {
        matches!(
            self.command,
            Command::Init { .. } | Command::TxRef { .. } | Command::VerifyWebhook(_)
        )
    }
}
