//! Typed options for each API operation.
//!
//! Every record serializes to the JSON object the validator and the remote
//! API expect. Unset optional fields are omitted. Amounts are decimal
//! strings; `bank_code` and `split_value` are numbers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Hosted checkout page customization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// How a split payment divides the amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitType {
    /// `split_value` is a fraction of the amount.
    #[default]
    Percentage,
    /// `split_value` is a fixed amount.
    Flat,
}

/// A subaccount share of an initialized payment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubaccountSplit {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_type: Option<SplitType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_value: Option<f64>,
}

/// Options for `initialize` and `mobile_initialize`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InitializeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Local mobile number, `09XXXXXXXX` or `07XXXXXXXX`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub currency: String,
    pub amount: String,
    pub tx_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customization: Option<Customization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subaccounts: Option<Vec<SubaccountSplit>>,
    /// Free-form metadata echoed back by the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// Options for `verify`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyOptions {
    pub tx_ref: String,
}

/// Options for `verify_transfer`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyTransferOptions {
    pub tx_ref: String,
}

/// Options for `transfer`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOptions {
    pub account_name: String,
    pub account_number: String,
    pub amount: String,
    pub currency: String,
    pub reference: String,
    pub bank_code: u32,
}

/// One payout in a bulk transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkData {
    pub account_name: String,
    pub account_number: String,
    pub amount: String,
    pub reference: String,
    pub bank_code: u32,
}

/// Options for `bulk_transfer`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkTransferOptions {
    pub title: String,
    pub currency: String,
    /// At least one payout.
    pub bulk_data: Vec<BulkData>,
}

/// Options for `direct_charge`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectChargeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub mobile: String,
    pub currency: String,
    pub amount: String,
    pub tx_ref: String,
    /// Payment method, e.g. `telebirr`. Sent as the `type` query parameter.
    #[serde(rename = "type")]
    pub payment_method: String,
}

/// Options for `authorize_direct_charge`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizeDirectChargeOptions {
    pub reference: String,
    pub client: String,
    #[serde(rename = "type")]
    pub payment_method: String,
}

/// Options for `create_subaccount`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateSubaccountOptions {
    pub business_name: String,
    pub account_name: String,
    pub bank_code: u32,
    pub account_number: String,
    pub split_type: SplitType,
    pub split_value: f64,
}

/// Extra refund details, sent as a JSON string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Options for `refund`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundOptions {
    pub tx_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<RefundMeta>,
}

/// Options for `get_transaction_logs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTransactionLogsOptions {
    pub ref_id: String,
}

/// A decoded success response.
///
/// Keeps every top-level key of the body as the API sent it, so nothing is
/// lost or rejected for having an unexpected type. Use
/// [`ApiResponse::message_text`] and [`ApiResponse::status_text`] for the
/// usual string forms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiResponse {
    /// The `message` field, when it is a string.
    #[must_use]
    pub fn message_text(&self) -> Option<&str> {
        self.message.as_ref().and_then(Value::as_str)
    }

    /// The `status` field, when it is a string.
    #[must_use]
    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().and_then(Value::as_str)
    }
}
