//! Command execution.
//!
//! Turns a parsed subcommand into an API call (or a local computation),
//! and renders the result as pretty JSON.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use chapa::config::{Command, ConfigError, InitializeArgs, ValidatedConfig, VerifyWebhookArgs};
use chapa::options::{
    ApiResponse, GetTransactionLogsOptions, InitializeOptions, RefundOptions, VerifyOptions,
    VerifyTransferOptions,
};
use chapa::time::Sleeper;
use chapa::transport::HttpClient;
use chapa::{Chapa, ChapaError, GenTxRefOptions, WebhookPayload, gen_tx_ref, verify_signature};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The configuration is not usable for this command.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The API call failed.
    #[error("{}", .0.message())]
    Api(#[from] ChapaError),

    /// Failed to read a webhook payload file.
    #[error("Failed to read payload file '{}': {source}", path.display())]
    PayloadRead {
        /// Path to the payload file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to render the output.
    #[error("Failed to render output: {0}")]
    Render(#[source] serde_json::Error),
}

impl RunError {
    /// HTTP-style status of an API failure, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// How a successful command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command did what was asked.
    Done,
    /// A webhook signature did not match.
    SignatureMismatch,
}

/// Executes a command and prints its result to stdout.
///
/// API calls are cancelled when a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if the configuration lacks what the command needs, the
/// API call fails, or a payload file cannot be read.
pub async fn execute(command: &Command, config: &ValidatedConfig) -> Result<Outcome, RunError> {
    match command {
        Command::Init { .. } => Ok(Outcome::Done),
        Command::TxRef {
            prefix,
            size,
            no_prefix,
        } => {
            println!("{}", tx_ref(prefix.as_deref(), *size, *no_prefix));
            Ok(Outcome::Done)
        }
        Command::VerifyWebhook(args) => {
            let valid = check_webhook(args, config.webhook_secret.as_deref())?;
            println!("{}", render(&json!({ "valid": valid }))?);
            Ok(if valid {
                Outcome::Done
            } else {
                Outcome::SignatureMismatch
            })
        }
        _ => {
            let chapa = Chapa::new(config.client_config()?)?;

            let token = CancellationToken::new();
            let watcher = tokio::spawn(cancel_on_shutdown(token.clone()));

            let result = dispatch(&chapa, command, Some(&token)).await;
            watcher.abort();

            println!("{}", render(&result?)?);
            Ok(Outcome::Done)
        }
    }
}

/// Runs the API call a command stands for.
async fn dispatch<H: HttpClient, S: Sleeper>(
    chapa: &Chapa<H, S>,
    command: &Command,
    cancel: Option<&CancellationToken>,
) -> Result<ApiResponse, ChapaError> {
    match command {
        Command::Initialize(args) => {
            let options = initialize_options(args);
            if args.mobile {
                chapa.mobile_initialize(&options, cancel).await
            } else {
                chapa.initialize(&options, cancel).await
            }
        }
        Command::Verify { tx_ref } => {
            let options = VerifyOptions {
                tx_ref: tx_ref.clone(),
            };
            chapa.verify(&options, cancel).await
        }
        Command::Banks => chapa.get_banks(cancel).await,
        Command::Transactions => chapa.get_transactions(cancel).await,
        Command::Logs { ref_id } => {
            let options = GetTransactionLogsOptions {
                ref_id: ref_id.clone(),
            };
            chapa.get_transaction_logs(&options, cancel).await
        }
        Command::Transfers => chapa.get_transfers(cancel).await,
        Command::VerifyTransfer { tx_ref } => {
            let options = VerifyTransferOptions {
                tx_ref: tx_ref.clone(),
            };
            chapa.verify_transfer(&options, cancel).await
        }
        Command::Refund {
            tx_ref,
            reason,
            amount,
        } => {
            let options = RefundOptions {
                tx_ref: tx_ref.clone(),
                reason: reason.clone(),
                amount: amount.clone(),
                meta: None,
            };
            chapa.refund(&options, cancel).await
        }
        // Local commands never reach the API
        Command::Init { .. } | Command::TxRef { .. } | Command::VerifyWebhook(_) => {
            Ok(ApiResponse::default())
        }
    }
}

/// Builds initialize options, generating a reference when none was given.
fn initialize_options(args: &InitializeArgs) -> InitializeOptions {
    InitializeOptions {
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        email: args.email.clone(),
        phone_number: args.phone_number.clone(),
        currency: args.currency.clone(),
        amount: args.amount.clone(),
        tx_ref: args
            .tx_ref
            .clone()
            .unwrap_or_else(|| gen_tx_ref(&GenTxRefOptions::default())),
        callback_url: args.callback_url.clone(),
        return_url: args.return_url.clone(),
        ..InitializeOptions::default()
    }
}

fn tx_ref(prefix: Option<&str>, size: Option<usize>, no_prefix: bool) -> String {
    gen_tx_ref(&GenTxRefOptions {
        prefix: prefix.map(str::to_string),
        size,
        remove_prefix: no_prefix,
    })
}

/// Checks a webhook signature from the command line.
fn check_webhook(args: &VerifyWebhookArgs, secret: Option<&str>) -> Result<bool, RunError> {
    let secret = secret.ok_or(ChapaError::WebhookSecretMissing)?;

    let payload = match (&args.payload, &args.payload_file) {
        (Some(raw), _) => raw.clone(),
        (None, Some(path)) => {
            std::fs::read_to_string(path).map_err(|source| RunError::PayloadRead {
                path: path.clone(),
                source,
            })?
        }
        // clap requires one of the two
        (None, None) => String::new(),
    };

    Ok(verify_signature(
        &WebhookPayload::Raw(payload),
        args.signature.trim(),
        secret,
    ))
}

fn render(value: &impl Serialize) -> Result<String, RunError> {
    serde_json::to_string_pretty(value).map_err(RunError::Render)
}

/// Cancels `token` when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn cancel_on_shutdown(token: CancellationToken) {
    shutdown_signal().await;
    tracing::info!("Shutdown signal received, cancelling request...");
    token.cancel();
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
