//! Contract deployment helpers.

use std::{fs, path::Path};

use antelope_common::{abi::AbiDef, serializer::Serializer, system, token, Asset, ChainClient, KeyBag, Name};
use anyhow::{Context, Result};
use log::info;

use crate::chain::push_actions_with_retry;

/// Deploy a contract to `account`: `setcode` with the wasm and `setabi`
/// with the binary-packed ABI, in a single transaction. Returns the
/// transaction id.
pub async fn set_contract(
    client: &ChainClient,
    keys: &KeyBag,
    account: Name,
    wasm_path: impl AsRef<Path>,
    abi_path: impl AsRef<Path>,
) -> Result<String> {
    let wasm_path = wasm_path.as_ref();
    let abi_path = abi_path.as_ref();

    let wasm = fs::read(wasm_path)
        .with_context(|| format!("unable to read wasm file {}", wasm_path.display()))?;
    let abi_json = fs::read_to_string(abi_path)
        .with_context(|| format!("unable to read abi file {}", abi_path.display()))?;
    let abi = AbiDef::from_json(&abi_json)
        .with_context(|| format!("invalid abi file {}", abi_path.display()))?;

    let transaction_id = push_actions_with_retry(
        client,
        keys,
        vec![
            system::set_code(account, wasm),
            system::set_abi(account, abi.to_bytes()),
        ],
    )
    .await
    .with_context(|| format!("error setting contract on {}", account))?;

    info!("deployed contract to {}", account);
    Ok(transaction_id)
}

/// Deploy the reference token contract from `contract_dir` (expects
/// `token.wasm` and `token.abi`) to `contract`, then create the token with
/// the given issuer and maximum supply. Returns the create transaction id.
pub async fn deploy_token_contract(
    client: &ChainClient,
    keys: &KeyBag,
    contract_dir: impl AsRef<Path>,
    contract: Name,
    issuer: Name,
    maximum_supply: Asset,
) -> Result<String> {
    let dir = contract_dir.as_ref();
    set_contract(
        client,
        keys,
        contract,
        dir.join("token.wasm"),
        dir.join("token.abi"),
    )
    .await?;

    let transaction_id = push_actions_with_retry(
        client,
        keys,
        vec![token::create(contract, issuer, maximum_supply)],
    )
    .await
    .with_context(|| format!("error creating token {}", maximum_supply.symbol.code()))?;

    info!(
        "created token {} on {} with issuer {}",
        maximum_supply, contract, issuer
    );
    Ok(transaction_id)
}
