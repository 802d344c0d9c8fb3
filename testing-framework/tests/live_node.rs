// End-to-end tests against a real node. All of them need a `nodeos` binary
// on PATH and therefore run only on demand:
//
//   cargo test -p antelope-testing-framework -- --ignored

use std::time::Duration;

use antelope_testing_framework::prelude::*;

async fn start_node() -> (NodeProcess, ChainClient, KeyBag) {
    init_test_logging(log::LevelFilter::Debug);
    let node = NodeProcess::restart(NodeConfig::default())
        .await
        .expect("node failed to start");
    let client = node.client();

    let mut keys = KeyBag::new();
    keys.import_private_key(DEVELOPMENT_PRIVATE_KEY).unwrap();
    (node, client, keys)
}

#[tokio::test]
#[ignore = "needs a nodeos binary on PATH"]
async fn test_get_info_answers() {
    let (_node, client, _keys) = start_node().await;
    let info = client.get_info().await.unwrap();
    assert!(info.head_block_num > 0);
    assert_eq!(info.head_block_producer, SYSTEM_ACCOUNT);
}

#[tokio::test]
#[ignore = "needs a nodeos binary on PATH"]
async fn test_create_account_from_wif() {
    let (_node, client, mut keys) = start_node().await;

    let name = random_account_name();
    let created = create_account_from_wif(&client, &mut keys, name, DEVELOPMENT_PRIVATE_KEY)
        .await
        .unwrap();
    assert_eq!(created, name);
    assert_account_exists(&client, name).await.unwrap();
}

#[tokio::test]
#[ignore = "needs a nodeos binary on PATH"]
async fn test_create_account_with_random_key() {
    let (_node, client, mut keys) = start_node().await;

    let name = random_account_name();
    let key = create_account_with_random_key(&client, &mut keys, name)
        .await
        .unwrap();
    assert!(keys.contains(&key));
    assert_account_exists(&client, name).await.unwrap();
}

#[tokio::test]
#[ignore = "needs a nodeos binary on PATH"]
async fn test_create_random_accounts_batch() {
    let (_node, client, mut keys) = start_node().await;

    let accounts = create_random_accounts(&client, &mut keys, 3).await.unwrap();
    assert_eq!(accounts.len(), 3);
    for account in accounts {
        assert_account_exists(&client, account).await.unwrap();
    }
}

#[tokio::test]
#[ignore = "needs a nodeos binary on PATH and a compiled token contract in TOKEN_CONTRACT_DIR"]
async fn test_deploy_token_and_check_balance() {
    let contract_dir = match std::env::var("TOKEN_CONTRACT_DIR") {
        Ok(dir) => dir,
        Err(_) => panic!("set TOKEN_CONTRACT_DIR to a directory with token.wasm and token.abi"),
    };
    let (_node, client, mut keys) = start_node().await;

    let (_key, contract) = create_random_account(&client, &mut keys).await.unwrap();
    let (_key, issuer) = create_random_account(&client, &mut keys).await.unwrap();

    let maximum_supply: Asset = "1000000.0000 TEST".parse().unwrap();
    deploy_token_contract(&client, &keys, &contract_dir, contract, issuer, maximum_supply)
        .await
        .unwrap();

    let quantity: Asset = "100.0000 TEST".parse().unwrap();
    push_actions_with_retry(
        &client,
        &keys,
        vec![token::issue(contract, issuer, issuer, quantity, "genesis")],
    )
    .await
    .unwrap();

    wait_for_head_block(
        &client,
        client.get_info().await.unwrap().head_block_num + 1,
        Duration::from_secs(5),
    )
    .await
    .unwrap();

    assert_currency_balance(&client, contract, issuer, quantity)
        .await
        .unwrap();
}
