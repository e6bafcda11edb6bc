//! The API client.

use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::config::{ClientConfig, ConfigError};
use crate::error::{ChapaError, PipelineFailure};
use crate::operation::Operation;
use crate::options::{
    ApiResponse, AuthorizeDirectChargeOptions, BulkTransferOptions, CreateSubaccountOptions,
    DirectChargeOptions, GetTransactionLogsOptions, InitializeOptions, RefundOptions,
    TransferOptions, VerifyOptions, VerifyTransferOptions,
};
use crate::reference::{GenTxRefOptions, gen_tx_ref};
use crate::time::{Sleeper, TokioSleeper};
use crate::transport::{HttpClient, HttpResponse, ReqwestClient, Transport};
use crate::validation::validate;
use crate::webhook::{WebhookPayload, verify_signature};

/// Client for the Chapa payment API.
///
/// Every call validates its options, sends one request (plus retries for
/// transient failures), and returns the decoded body or a [`ChapaError`].
/// Calls share no mutable state and may run concurrently.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation (defaults to [`ReqwestClient`])
/// - `S`: The sleeper used between retries (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```no_run
/// use chapa::{Chapa, ClientConfig};
/// use chapa::options::VerifyOptions;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let chapa = Chapa::new(ClientConfig::new("CHASECK_TEST-xxxx"))?;
/// let options = VerifyOptions { tx_ref: "TX-123".to_string() };
/// let response = chapa.verify(&options, None).await?;
/// println!("{:?}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Chapa<H = ReqwestClient, S = TokioSleeper> {
    transport: Transport<H, S>,
    webhook_secret: Option<String>,
}

impl Chapa<ReqwestClient, TokioSleeper> {
    /// Creates a client backed by reqwest.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the secret key is empty or cannot be sent
    /// as a header, the base URL is invalid, or a duration is zero.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let client = ReqwestClient::with_timeout(config.timeout());
        Self::with_client(config, client)
    }
}

impl<H> Chapa<H, TokioSleeper> {
    /// Creates a client using a custom HTTP client.
    ///
    /// # Errors
    ///
    /// Same as [`Chapa::new`].
    pub fn with_client(config: ClientConfig, client: H) -> Result<Self, ConfigError> {
        let (base_url, authorization) = config.validate()?;

        let transport = Transport::new(client, base_url, authorization)
            .with_timeout(config.timeout())
            .with_retry_policy(config.retry_policy())
            .with_log_mode(config.log_mode());

        Ok(Self {
            transport,
            webhook_secret: config.webhook_secret().map(str::to_string),
        })
    }
}

impl<H, S> Chapa<H, S> {
    /// Replaces the sleeper used between retries.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> Chapa<H, S2> {
        Chapa {
            transport: self.transport.with_sleeper(sleeper),
            webhook_secret: self.webhook_secret,
        }
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &Transport<H, S> {
        &self.transport
    }

    /// Checks a webhook signature against the configured webhook secret.
    ///
    /// # Errors
    ///
    /// Returns [`ChapaError::WebhookSecretMissing`] if no webhook secret was
    /// configured.
    pub fn verify_webhook(
        &self,
        payload: impl Into<WebhookPayload>,
        signature: &str,
    ) -> Result<bool, ChapaError> {
        let secret = self
            .webhook_secret
            .as_deref()
            .ok_or(ChapaError::WebhookSecretMissing)?;

        Ok(verify_signature(&payload.into(), signature, secret))
    }

    /// Generates a transaction reference.
    #[must_use]
    pub fn gen_tx_ref(&self, options: &GenTxRefOptions) -> String {
        gen_tx_ref(options)
    }
}

impl<H: HttpClient, S: Sleeper> Chapa<H, S> {
    /// Runs `operation` with raw JSON options.
    ///
    /// The options are validated before anything is sent; on failure no
    /// request is made.
    ///
    /// # Errors
    ///
    /// - [`ChapaError::Validation`] if the options break the schema
    /// - [`ChapaError::Remote`] if the API answers with an error status
    /// - [`ChapaError::Transport`] if no response arrives
    /// - [`ChapaError::Decode`] if a success body is not a JSON object
    pub async fn execute(
        &self,
        operation: Operation,
        options: Value,
        cancel: Option<&CancellationToken>,
    ) -> Result<ApiResponse, ChapaError> {
        let validated = validate(operation, &options).map_err(PipelineFailure::from)?;
        let request = operation.request(&validated);

        tracing::debug!(operation = %operation, "Dispatching API call");

        let response = self
            .transport
            .send(&request, cancel)
            .await
            .map_err(PipelineFailure::from)?;

        decode(&response)
    }

    async fn call<T: Serialize>(
        &self,
        operation: Operation,
        options: &T,
        cancel: Option<&CancellationToken>,
    ) -> Result<ApiResponse, ChapaError> {
        let options = serde_json::to_value(options).map_err(ChapaError::Encode)?;
        self.execute(operation, options, cancel).await
    }

    /// Starts a hosted checkout.
    ///
    /// # Errors
    ///
    /// See [`Chapa::execute`].
    pub async fn initialize(
        &self,
        options: &InitializeOptions,
        cancel: Option<&CancellationToken>,
    ) -> Result<ApiResponse, ChapaError> {
        self.call(Operation::Initialize, options, cancel).await
    }

    /// Starts a checkout for a mobile app.
    ///
    /// # Errors
    ///
    /// See [`Chapa::execute`].
    pub async fn mobile_initialize(
        &self,
        options: &InitializeOptions,
        cancel: Option<&CancellationToken>,
    ) -> Result<ApiResponse, ChapaError> {
        self.call(Operation::MobileInitialize, options, cancel).await
    }

    /// Checks the status of a transaction.
    ///
    /// # Errors
    ///
    /// See [`Chapa::execute`].
    pub async fn verify(
        &self,
        options: &VerifyOptions,
        cancel: Option<&CancellationToken>,
    ) -> Result<ApiResponse, ChapaError> {
        self.call(Operation::Verify, options, cancel).await
    }

    /// Lists supported banks.
    ///
    /// # Errors
    ///
    /// See [`Chapa::execute`].
    pub async fn get_banks(
        &self,
        cancel: Option<&CancellationToken>,
    ) -> Result<ApiResponse, ChapaError> {
        self.execute(Operation::GetBanks, Value::Null, cancel).await
    }

    /// Registers a split-payment subaccount.
    ///
    /// # Errors
    ///
    /// See [`Chapa::execute`].
    pub async fn create_subaccount(
        &self,
        options: &CreateSubaccountOptions,
        cancel: Option<&CancellationToken>,
    ) -> Result<ApiResponse, ChapaError> {
        self.call(Operation::CreateSubaccount, options, cancel).await
    }

    /// Charges a mobile-money wallet directly.
    ///
    /// # Errors
    ///
    /// See [`Chapa::execute`].
    pub async fn direct_charge(
        &self,
        options: &DirectChargeOptions,
        cancel: Option<&CancellationToken>,
    ) -> Result<ApiResponse, ChapaError> {
        self.call(Operation::DirectCharge, options, cancel).await
    }

    /// Confirms a pending direct charge.
    ///
    /// # Errors
    ///
    /// See [`Chapa::execute`].
    pub async fn authorize_direct_charge(
        &self,
        options: &AuthorizeDirectChargeOptions,
        cancel: Option<&CancellationToken>,
    ) -> Result<ApiResponse, ChapaError> {
        self.call(Operation::AuthorizeDirectCharge, options, cancel)
            .await
    }

    /// Pays out to a bank account.
    ///
    /// # Errors
    ///
    /// See [`Chapa::execute`].
    pub async fn transfer(
        &self,
        options: &TransferOptions,
        cancel: Option<&CancellationToken>,
    ) -> Result<ApiResponse, ChapaError> {
        self.call(Operation::Transfer, options, cancel).await
    }

    /// Pays out to several bank accounts.
    ///
    /// # Errors
    ///
    /// See [`Chapa::execute`].
    pub async fn bulk_transfer(
        &self,
        options: &BulkTransferOptions,
        cancel: Option<&CancellationToken>,
    ) -> Result<ApiResponse, ChapaError> {
        self.call(Operation::BulkTransfer, options, cancel).await
    }

    /// Checks the status of a transfer.
    ///
    /// # Errors
    ///
    /// See [`Chapa::execute`].
    pub async fn verify_transfer(
        &self,
        options: &VerifyTransferOptions,
        cancel: Option<&CancellationToken>,
    ) -> Result<ApiResponse, ChapaError> {
        self.call(Operation::VerifyTransfer, options, cancel).await
    }

    /// Lists transfers.
    ///
    /// # Errors
    ///
    /// See [`Chapa::execute`].
    pub async fn get_transfers(
        &self,
        cancel: Option<&CancellationToken>,
    ) -> Result<ApiResponse, ChapaError> {
        self.execute(Operation::GetTransfers, Value::Null, cancel)
            .await
    }

    /// Lists transactions.
    ///
    /// # Errors
    ///
    /// See [`Chapa::execute`].
    pub async fn get_transactions(
        &self,
        cancel: Option<&CancellationToken>,
    ) -> Result<ApiResponse, ChapaError> {
        self.execute(Operation::GetTransactions, Value::Null, cancel)
            .await
    }

    /// Lists the events recorded for a transaction.
    ///
    /// # Errors
    ///
    /// See [`Chapa::execute`].
    pub async fn get_transaction_logs(
        &self,
        options: &GetTransactionLogsOptions,
        cancel: Option<&CancellationToken>,
    ) -> Result<ApiResponse, ChapaError> {
        self.call(Operation::GetTransactionLogs, options, cancel)
            .await
    }

    /// Refunds a transaction, fully or partially.
    ///
    /// # Errors
    ///
    /// See [`Chapa::execute`].
    pub async fn refund(
        &self,
        options: &RefundOptions,
        cancel: Option<&CancellationToken>,
    ) -> Result<ApiResponse, ChapaError> {
        self.call(Operation::Refund, options, cancel).await
    }
}

/// Decodes a success body. An empty body is an empty response.
fn decode(response: &HttpResponse) -> Result<ApiResponse, ChapaError> {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ApiResponse::default());
    }
    serde_json::from_slice(&response.body).map_err(ChapaError::Decode)
}

#[cfg(test)]
#[path = "chapa_tests.rs"]
mod tests;
