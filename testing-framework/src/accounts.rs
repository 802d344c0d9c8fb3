//! Account creation helpers.
//!
//! Every account comes out with owner and active on the same key and with
//! the `eosio.code` permission already attached to active, so its contract
//! can immediately send inline actions.

use antelope_common::{
    config::{ACTIVE_PERMISSION, OWNER_PERMISSION, SYSTEM_ACCOUNT},
    system::{self, Authority},
    ChainClient, KeyBag, Name, PublicKey, SecretKey,
};
use anyhow::{Context, Result};
use log::info;

use crate::{chain::push_actions_with_retry, utilities::names::random_account_name};

/// Create `name` with both permissions on `key`, then attach the
/// `eosio.code` permission to active. The key must already be in the bag if
/// anything is to be signed for the account later.
pub async fn create_account(
    client: &ChainClient,
    keys: &KeyBag,
    name: Name,
    key: PublicKey,
) -> Result<Name> {
    push_actions_with_retry(
        client,
        keys,
        vec![system::new_account(SYSTEM_ACCOUNT, name, key)],
    )
    .await
    .with_context(|| format!("error creating account {}", name))?;

    push_actions_with_retry(
        client,
        keys,
        vec![system::update_auth(
            name,
            ACTIVE_PERMISSION,
            OWNER_PERMISSION,
            Authority::with_key_and_code_permission(key, name),
        )],
    )
    .await
    .with_context(|| format!("error attaching code permission to {}", name))?;

    info!("created account {}", name);
    Ok(name)
}

/// Create `name` on a freshly generated key; the key is imported into the
/// bag. Returns the new public key.
pub async fn create_account_with_random_key(
    client: &ChainClient,
    keys: &mut KeyBag,
    name: Name,
) -> Result<PublicKey> {
    let key = keys.add_key(SecretKey::generate());
    create_account(client, keys, name, key).await?;
    Ok(key)
}

/// Create `name` on the key behind `wif`, importing it into the bag first.
pub async fn create_account_from_wif(
    client: &ChainClient,
    keys: &mut KeyBag,
    name: Name,
    wif: &str,
) -> Result<Name> {
    let key = keys
        .import_private_key(wif)
        .context("private key is not in a valid format")?;
    create_account(client, keys, name, key).await
}

/// Create an account with a generated name on the given key.
pub async fn create_account_with_random_name(
    client: &ChainClient,
    keys: &KeyBag,
    key: PublicKey,
) -> Result<Name> {
    create_account(client, keys, random_account_name(), key).await
}

/// Create an account with a generated name on a generated key.
/// Returns the key and the name.
pub async fn create_random_account(
    client: &ChainClient,
    keys: &mut KeyBag,
) -> Result<(PublicKey, Name)> {
    let name = random_account_name();
    let key = create_account_with_random_key(client, keys, name).await?;
    Ok((key, name))
}

/// Create `count` random accounts sequentially, each with the code
/// permission attached.
pub async fn create_random_accounts(
    client: &ChainClient,
    keys: &mut KeyBag,
    count: usize,
) -> Result<Vec<Name>> {
    let mut accounts = Vec::with_capacity(count);
    for _ in 0..count {
        let (_, name) = create_random_account(client, keys).await?;
        accounts.push(name);
    }
    Ok(accounts)
}
