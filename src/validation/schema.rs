//! Option schemas for every API operation.
//!
//! `bank_code` is numeric everywhere it appears (transfers, bulk transfers
//! and subaccounts).

use crate::operation::Operation;

use super::rules::{Field, Rule, SPLIT_TYPES};

const CUSTOMIZATION: &[Field] = &[
    Field::optional("title", Rule::Text),
    Field::optional("description", Rule::Text),
    Field::optional("logo", Rule::Text),
];

const SUBACCOUNT_SPLIT: &[Field] = &[
    Field::required("id", Rule::Text),
    Field::optional("split_type", Rule::OneOf(SPLIT_TYPES)),
    Field::optional("split_value", Rule::Number),
];

const INITIALIZE: &[Field] = &[
    Field::optional("first_name", Rule::Text),
    Field::optional("last_name", Rule::Text),
    Field::optional("email", Rule::Email),
    Field::optional("phone_number", Rule::Mobile),
    Field::required("currency", Rule::Text),
    Field::required("amount", Rule::Text),
    Field::required("tx_ref", Rule::Text),
    Field::optional("callback_url", Rule::Url),
    Field::optional("return_url", Rule::Url),
    Field::optional("customization", Rule::Object(CUSTOMIZATION)),
    Field::optional(
        "subaccounts",
        Rule::List {
            item: SUBACCOUNT_SPLIT,
            min: 0,
        },
    ),
    Field::optional("meta", Rule::Any),
];

const BY_TX_REF: &[Field] = &[Field::required("tx_ref", Rule::Text)];

const TRANSFER: &[Field] = &[
    Field::required("account_name", Rule::Text),
    Field::required("account_number", Rule::Text),
    Field::required("amount", Rule::Text),
    Field::required("currency", Rule::Text),
    Field::required("reference", Rule::Text),
    Field::required("bank_code", Rule::Number),
];

const BULK_ITEM: &[Field] = &[
    Field::required("account_name", Rule::Text),
    Field::required("account_number", Rule::Text),
    Field::required("amount", Rule::Text),
    Field::required("reference", Rule::Text),
    Field::required("bank_code", Rule::Number),
];

const BULK_TRANSFER: &[Field] = &[
    Field::required("title", Rule::Text),
    Field::required("currency", Rule::Text),
    Field::required(
        "bulk_data",
        Rule::List {
            item: BULK_ITEM,
            min: 1,
        },
    ),
];

const DIRECT_CHARGE: &[Field] = &[
    Field::optional("first_name", Rule::Text),
    Field::optional("last_name", Rule::Text),
    Field::optional("email", Rule::Email),
    Field::required("mobile", Rule::Mobile),
    Field::required("currency", Rule::Text),
    Field::required("amount", Rule::Text),
    Field::required("tx_ref", Rule::Text),
    Field::required("type", Rule::Text),
];

const AUTHORIZE_DIRECT_CHARGE: &[Field] = &[
    Field::required("reference", Rule::Text),
    Field::required("client", Rule::Text),
    Field::required("type", Rule::Text),
];

const CREATE_SUBACCOUNT: &[Field] = &[
    Field::required("business_name", Rule::Text),
    Field::required("account_name", Rule::Text),
    Field::required("bank_code", Rule::Number),
    Field::required("account_number", Rule::Text),
    Field::required("split_type", Rule::OneOf(SPLIT_TYPES)),
    Field::required("split_value", Rule::Number),
];

const REFUND_META: &[Field] = &[
    Field::optional("customer_id", Rule::Text),
    Field::optional("reference", Rule::Text),
];

const REFUND: &[Field] = &[
    Field::required("tx_ref", Rule::Text),
    Field::optional("reason", Rule::Text),
    Field::optional("amount", Rule::Text),
    Field::optional("meta", Rule::Object(REFUND_META)),
];

const TRANSACTION_LOGS: &[Field] = &[Field::required("ref_id", Rule::Text)];

/// Returns the schema for `operation`.
///
/// Listing operations take no options and have an empty schema.
#[must_use]
pub const fn schema(operation: Operation) -> &'static [Field] {
    match operation {
        Operation::Initialize | Operation::MobileInitialize => INITIALIZE,
        Operation::Verify | Operation::VerifyTransfer => BY_TX_REF,
        Operation::Transfer => TRANSFER,
        Operation::BulkTransfer => BULK_TRANSFER,
        Operation::DirectCharge => DIRECT_CHARGE,
        Operation::AuthorizeDirectCharge => AUTHORIZE_DIRECT_CHARGE,
        Operation::CreateSubaccount => CREATE_SUBACCOUNT,
        Operation::Refund => REFUND,
        Operation::GetTransactionLogs => TRANSACTION_LOGS,
        Operation::GetBanks | Operation::GetTransfers | Operation::GetTransactions => &[],
    }
}
