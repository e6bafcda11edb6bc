//! Remote API operations and how each maps onto an HTTP request.

use std::fmt;

use serde_json::Value;

use crate::transport::{ApiRequest, RequestBody};

/// A remote API operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Start a hosted checkout.
    Initialize,
    /// Start a checkout from a mobile app.
    MobileInitialize,
    /// Check the status of a transaction.
    Verify,
    /// List supported banks.
    GetBanks,
    /// Register a split-payment subaccount.
    CreateSubaccount,
    /// Charge a mobile-money wallet directly.
    DirectCharge,
    /// Confirm a pending direct charge.
    AuthorizeDirectCharge,
    /// Pay out to a bank account.
    Transfer,
    /// Pay out to several bank accounts at once.
    BulkTransfer,
    /// Check the status of a transfer.
    VerifyTransfer,
    /// List transfers.
    GetTransfers,
    /// List transactions.
    GetTransactions,
    /// List the events recorded for a transaction.
    GetTransactionLogs,
    /// Refund a transaction.
    Refund,
}

impl Operation {
    /// Every operation, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::Initialize,
        Self::MobileInitialize,
        Self::Verify,
        Self::GetBanks,
        Self::CreateSubaccount,
        Self::DirectCharge,
        Self::AuthorizeDirectCharge,
        Self::Transfer,
        Self::BulkTransfer,
        Self::VerifyTransfer,
        Self::GetTransfers,
        Self::GetTransactions,
        Self::GetTransactionLogs,
        Self::Refund,
    ];

    /// Short name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::MobileInitialize => "mobile_initialize",
            Self::Verify => "verify",
            Self::GetBanks => "get_banks",
            Self::CreateSubaccount => "create_subaccount",
            Self::DirectCharge => "direct_charge",
            Self::AuthorizeDirectCharge => "authorize_direct_charge",
            Self::Transfer => "transfer",
            Self::BulkTransfer => "bulk_transfer",
            Self::VerifyTransfer => "verify_transfer",
            Self::GetTransfers => "get_transfers",
            Self::GetTransactions => "get_transactions",
            Self::GetTransactionLogs => "get_transaction_logs",
            Self::Refund => "refund",
        }
    }

    /// Builds the request for already validated options.
    ///
    /// Path parameters (`tx_ref`, `ref_id`) and the direct-charge `type`
    /// query parameter are read from `options`. Fields the schema marks as
    /// required are assumed present.
    #[must_use]
    pub fn request(self, options: &Value) -> ApiRequest {
        match self {
            Self::Initialize => json_post(["transaction", "initialize"], options),
            Self::MobileInitialize => json_post(["transaction", "mobile-initialize"], options),
            Self::Verify => {
                ApiRequest::get(["transaction", "verify", text(options, "tx_ref").as_str()])
            }
            Self::GetBanks => ApiRequest::get(["banks"]),
            Self::CreateSubaccount => json_post(["subaccount"], options),
            Self::DirectCharge => {
                json_post(["charges"], options).with_query("type", text(options, "type"))
            }
            Self::AuthorizeDirectCharge => {
                json_post(["validate"], options).with_query("type", text(options, "type"))
            }
            Self::Transfer => json_post(["transfers"], options),
            Self::BulkTransfer => json_post(["bulk-transfers"], options),
            Self::VerifyTransfer => {
                ApiRequest::get(["transfers", "verify", text(options, "tx_ref").as_str()])
            }
            Self::GetTransfers => ApiRequest::get(["transfers"]),
            Self::GetTransactions => ApiRequest::get(["transactions"]),
            Self::GetTransactionLogs => {
                ApiRequest::get(["transaction", "events", text(options, "ref_id").as_str()])
            }
            Self::Refund => ApiRequest::post(["refund", text(options, "tx_ref").as_str()])
                .with_body(RequestBody::Form(refund_form(options))),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn json_post<const N: usize>(segments: [&str; N], options: &Value) -> ApiRequest {
    ApiRequest::post(segments).with_body(RequestBody::Json(options.clone()))
}

fn text(options: &Value, key: &str) -> String {
    match options.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Refund form fields: `reason`, `amount` and `meta` as a JSON string,
/// each only when present.
fn refund_form(options: &Value) -> Vec<(String, String)> {
    ["reason", "amount", "meta"]
        .into_iter()
        .filter_map(|key| match options.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some((key.to_string(), s.clone())),
            Some(other) => Some((key.to_string(), other.to_string())),
        })
        .collect()
}

#[cfg(test)]
#[path = "operation_tests.rs"]
mod tests;
