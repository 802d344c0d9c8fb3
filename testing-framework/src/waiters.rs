//! Polling primitives for asynchronous chain state.
//!
//! Prefer these over bare sleeps: they return as soon as the condition
//! holds and fail loudly when it never does.

use std::{future::Future, time::Duration};

use antelope_common::ChainClient;
use anyhow::{bail, Context, Result};
use tokio::time::Instant;

/// Poll `probe` every `interval` until it yields `Some(value)` or `timeout`
/// passes. A probe error aborts the wait immediately.
pub async fn wait_for<T, F, Fut>(interval: Duration, timeout: Duration, mut probe: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(value) = probe().await? {
            return Ok(value);
        }
        if Instant::now() >= deadline {
            bail!("condition not met within {:?}", timeout);
        }
        tokio::time::sleep(interval).await;
    }
}

/// Wait until the head block reaches at least `block_num`.
pub async fn wait_for_head_block(
    client: &ChainClient,
    block_num: u32,
    timeout: Duration,
) -> Result<u32> {
    wait_for(Duration::from_millis(250), timeout, || async {
        let info = client.get_info().await.context("failed to get chain info")?;
        Ok((info.head_block_num >= block_num).then_some(info.head_block_num))
    })
    .await
    .with_context(|| format!("head block never reached {}", block_num))
}

/// Wait until `block_num` is irreversible.
pub async fn wait_until_irreversible(
    client: &ChainClient,
    block_num: u32,
    timeout: Duration,
) -> Result<u32> {
    wait_for(Duration::from_millis(500), timeout, || async {
        let info = client.get_info().await.context("failed to get chain info")?;
        Ok((info.last_irreversible_block_num >= block_num)
            .then_some(info.last_irreversible_block_num))
    })
    .await
    .with_context(|| format!("block {} never became irreversible", block_num))
}
