//! Request and response shapes of the node's `/v1/chain` HTTP API.
//! Unknown response fields are ignored so the types stay compatible across
//! node versions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    crypto::{Checksum256, PublicKey},
    name::Name,
    time::TimePointSec,
    transaction::Transaction,
};

/// Answer of `get_info`: everything a client needs to build and sign a
/// transaction for this particular chain.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainInfo {
    pub server_version: String,
    pub chain_id: Checksum256,
    pub head_block_num: u32,
    pub last_irreversible_block_num: u32,
    pub last_irreversible_block_id: Checksum256,
    pub head_block_id: Checksum256,
    pub head_block_time: TimePointSec,
    pub head_block_producer: Name,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_version_string: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PushTransactionResult {
    pub transaction_id: String,
    #[serde(default)]
    pub processed: Value,
}

#[derive(Serialize)]
pub struct GetRequiredKeysParams<'a> {
    pub transaction: &'a Transaction,
    pub available_keys: &'a [PublicKey],
}

#[derive(Clone, Debug, Deserialize)]
pub struct GetRequiredKeysResult {
    pub required_keys: Vec<PublicKey>,
}

#[derive(Serialize)]
pub struct GetAccountParams {
    pub account_name: Name,
}

/// Minimal slice of the `get_account` answer; the full reply carries much
/// more, all of it ignored here.
#[derive(Clone, Debug, Deserialize)]
pub struct AccountInfo {
    pub account_name: Name,
    pub head_block_num: u32,
    #[serde(default)]
    pub created: Option<TimePointSec>,
    #[serde(default)]
    pub privileged: bool,
    #[serde(default)]
    pub last_code_update: Option<TimePointSec>,
}

#[derive(Serialize)]
pub struct GetCurrencyBalanceParams<'a> {
    pub code: Name,
    pub account: Name,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<&'a str>,
}

/// The error envelope the node wraps every failure in.
#[derive(Clone, Debug, Deserialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
    pub error: ErrorInfo,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ErrorInfo {
    pub code: i64,
    pub name: String,
    pub what: String,
    #[serde(default)]
    pub details: Vec<ErrorDetail>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub line_number: u64,
    #[serde(default)]
    pub method: String,
}
