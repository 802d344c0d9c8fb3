use log::{debug, trace};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

use crate::{
    api::{
        AccountInfo, ChainInfo, ErrorResponse, GetAccountParams, GetCurrencyBalanceParams,
        GetRequiredKeysParams, GetRequiredKeysResult, PushTransactionResult,
    },
    asset::Asset,
    crypto::{KeyBag, PublicKey},
    name::Name,
    rpc::RpcError,
    transaction::{Action, PackedTransaction, Transaction, TransactionBuilder},
};

const GET_INFO: &str = "/v1/chain/get_info";
const PUSH_TRANSACTION: &str = "/v1/chain/push_transaction";
const GET_REQUIRED_KEYS: &str = "/v1/chain/get_required_keys";
const GET_ACCOUNT: &str = "/v1/chain/get_account";
const GET_CURRENCY_BALANCE: &str = "/v1/chain/get_currency_balance";

/// HTTP client for a node's `/v1/chain` API.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct ChainClient {
    inner: reqwest::Client,
    endpoint: String,
}

impl ChainClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        ChainClient {
            inner: reqwest::Client::new(),
            endpoint: normalize(endpoint.into()),
        }
    }

    /// Client with a per-request timeout; pushes that exceed it surface as
    /// retryable transport errors.
    pub fn with_timeout(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RpcError> {
        let inner = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(ChainClient {
            inner,
            endpoint: normalize(endpoint.into()),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn decode<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, RpcError> {
        let status = response.status();
        let body = response.bytes().await?;
        if status.is_success() {
            return Ok(serde_json::from_slice(&body)?);
        }
        match serde_json::from_slice::<ErrorResponse>(&body) {
            Ok(envelope) => Err(RpcError::Node(envelope)),
            Err(_) => Err(RpcError::UnexpectedStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            }),
        }
    }

    async fn call<P: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        params: &P,
    ) -> Result<R, RpcError> {
        trace!("POST {}{}", self.endpoint, path);
        let response = self
            .inner
            .post(format!("{}{}", self.endpoint, path))
            .json(params)
            .send()
            .await?;
        self.decode(response).await
    }

    async fn call_no_params<R: DeserializeOwned>(&self, path: &str) -> Result<R, RpcError> {
        trace!("POST {}{}", self.endpoint, path);
        let response = self
            .inner
            .post(format!("{}{}", self.endpoint, path))
            .send()
            .await?;
        self.decode(response).await
    }

    pub async fn get_info(&self) -> Result<ChainInfo, RpcError> {
        self.call_no_params(GET_INFO).await
    }

    pub async fn push_transaction(
        &self,
        packed: &PackedTransaction,
    ) -> Result<PushTransactionResult, RpcError> {
        self.call(PUSH_TRANSACTION, packed).await
    }

    pub async fn get_required_keys(
        &self,
        transaction: &Transaction,
        available_keys: &[PublicKey],
    ) -> Result<Vec<PublicKey>, RpcError> {
        let result: GetRequiredKeysResult = self
            .call(
                GET_REQUIRED_KEYS,
                &GetRequiredKeysParams {
                    transaction,
                    available_keys,
                },
            )
            .await?;
        Ok(result.required_keys)
    }

    pub async fn get_account(&self, account_name: Name) -> Result<AccountInfo, RpcError> {
        self.call(GET_ACCOUNT, &GetAccountParams { account_name })
            .await
    }

    /// Balances `account` holds in the token contract at `code`, optionally
    /// narrowed to one symbol.
    pub async fn get_currency_balance(
        &self,
        code: Name,
        account: Name,
        symbol: Option<&str>,
    ) -> Result<Vec<Asset>, RpcError> {
        self.call(
            GET_CURRENCY_BALANCE,
            &GetCurrencyBalanceParams {
                code,
                account,
                symbol,
            },
        )
        .await
    }

    /// One full submission round: fetch chain state, build the transaction,
    /// ask the node which keys it needs, sign with those, push.
    pub async fn transact(
        &self,
        keys: &KeyBag,
        actions: Vec<Action>,
    ) -> Result<PushTransactionResult, RpcError> {
        let info = self.get_info().await?;
        let transaction = TransactionBuilder::new().actions(actions).build(&info);

        let available = keys.public_keys();
        let required = self.get_required_keys(&transaction, &available).await?;
        debug!(
            "signing transaction {} with {} of {} available keys",
            transaction.id(),
            required.len(),
            available.len()
        );

        let signed = keys.sign_transaction(transaction, &info.chain_id, &required)?;
        self.push_transaction(&PackedTransaction::from(&signed)).await
    }
}

fn normalize(endpoint: String) -> String {
    endpoint.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_is_normalized() {
        let client = ChainClient::new("http://127.0.0.1:8888/");
        assert_eq!(client.endpoint(), "http://127.0.0.1:8888");

        let client = ChainClient::new("http://127.0.0.1:8888");
        assert_eq!(client.endpoint(), "http://127.0.0.1:8888");
    }

    #[tokio::test]
    async fn test_connection_errors_are_retryable() {
        // Nothing listens on this port; the failure must classify as
        // retryable transport trouble rather than a fatal node error
        let client = ChainClient::with_timeout(
            "http://127.0.0.1:9",
            Duration::from_millis(250),
        )
        .unwrap();
        let error = client.get_info().await.unwrap_err();
        assert!(error.is_retryable(), "got non-retryable error: {}", error);
    }
}
