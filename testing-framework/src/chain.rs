//! Transaction submission against a running node.

use antelope_common::{transaction::Action, ChainClient, KeyBag, RpcError};
use anyhow::{Context, Result};
use log::debug;

use crate::retry::{retry, MAX_PUSH_ATTEMPTS, RETRY_DELAY};

/// Build, sign and push a transaction carrying `actions`.
/// One shot, no retry. Returns the transaction id.
pub async fn push_actions(
    client: &ChainClient,
    keys: &KeyBag,
    actions: Vec<Action>,
) -> Result<String> {
    let result = client
        .transact(keys, actions)
        .await
        .context("error pushing transaction")?;
    debug!("pushed transaction {}", result.transaction_id);
    Ok(result.transaction_id)
}

/// Like [`push_actions`], but transient failures (transport timeouts,
/// deadline exceptions) are retried up to [`MAX_PUSH_ATTEMPTS`] times.
/// Deterministic rejections fail immediately.
pub async fn push_actions_with_retry(
    client: &ChainClient,
    keys: &KeyBag,
    actions: Vec<Action>,
) -> Result<String> {
    let result = retry(
        MAX_PUSH_ATTEMPTS,
        RETRY_DELAY,
        || client.transact(keys, actions.clone()),
        RpcError::is_retryable,
    )
    .await
    .context("error pushing transaction")?;
    debug!("pushed transaction {}", result.transaction_id);
    Ok(result.transaction_id)
}
