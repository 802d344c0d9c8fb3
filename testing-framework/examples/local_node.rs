// Spin up a throwaway node, create a couple of accounts and show their
// state. Needs `nodeos` on PATH.
//
// Run with:
//   cargo run --example local_node

use std::time::Duration;

use antelope_testing_framework::prelude::*;
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    init_test_logging(log::LevelFilter::Debug);

    let node = NodeProcess::restart(NodeConfig::default()).await?;
    let client = node.client();

    let info = client.get_info().await?;
    println!(
        "node ready: chain {} at head block {}",
        info.chain_id, info.head_block_num
    );

    let mut keys = KeyBag::new();
    keys.import_private_key(DEVELOPMENT_PRIVATE_KEY)?;

    let (key, account) = create_random_account(&client, &mut keys).await?;
    println!("created {} with key {}", account, key);

    let accounts = create_random_accounts(&client, &mut keys, 3).await?;
    for account in &accounts {
        assert_account_exists(&client, *account).await?;
        println!("created {}", account);
    }

    // Leave a little time for the accounts to make it into a block
    pause(Duration::from_secs(1), "Waiting for a block ...", "settling").await;

    let info = client.get_info().await?;
    println!("done at head block {}", info.head_block_num);
    Ok(())
}
