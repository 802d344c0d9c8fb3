//! Assertion helpers over the node's RPC interface.
//!
//! These make tests read better and fail with the actual chain state in the
//! message.

use antelope_common::{Asset, ChainClient, Name};
use anyhow::{Context, Result};

/// Assert that `account` exists on chain.
pub async fn assert_account_exists(client: &ChainClient, account: Name) -> Result<()> {
    client
        .get_account(account)
        .await
        .with_context(|| format!("account {} does not exist", account))?;
    Ok(())
}

/// Assert that `account` holds exactly `expected` in the token contract at
/// `code`.
pub async fn assert_currency_balance(
    client: &ChainClient,
    code: Name,
    account: Name,
    expected: Asset,
) -> Result<()> {
    let symbol_code = expected.symbol.code();
    let balances = client
        .get_currency_balance(code, account, Some(&symbol_code))
        .await
        .with_context(|| format!("failed to get {} balance of {}", symbol_code, account))?;

    let actual = balances
        .first()
        .copied()
        .unwrap_or(Asset::new(0, expected.symbol));

    if actual != expected {
        anyhow::bail!(
            "balance mismatch for {}: expected {}, got {}",
            account,
            expected,
            actual
        );
    }
    Ok(())
}

/// Assert that the head block has reached at least `block_num`.
pub async fn assert_head_block_at_least(client: &ChainClient, block_num: u32) -> Result<()> {
    let info = client.get_info().await.context("failed to get chain info")?;
    if info.head_block_num < block_num {
        anyhow::bail!(
            "head block too low: expected at least {}, got {}",
            block_num,
            info.head_block_num
        );
    }
    Ok(())
}
