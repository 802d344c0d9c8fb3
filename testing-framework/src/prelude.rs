//! One-line import for tests: `use antelope_testing_framework::prelude::*;`

pub use antelope_common::{
    config::{
        ACTIVE_PERMISSION, DEFAULT_ENDPOINT, DEVELOPMENT_PRIVATE_KEY, DEVELOPMENT_PUBLIC_KEY,
        OWNER_PERMISSION, SYSTEM_ACCOUNT, TOKEN_ACCOUNT,
    },
    system, token, Action, Asset, ChainClient, KeyBag, KeyPair, Name, PermissionLevel, PublicKey,
    RpcError, SecretKey, Symbol,
};

pub use crate::{
    accounts::{
        create_account, create_account_from_wif, create_account_with_random_key,
        create_account_with_random_name, create_random_account, create_random_accounts,
    },
    assertions::{assert_account_exists, assert_currency_balance, assert_head_block_at_least},
    chain::{push_actions, push_actions_with_retry},
    contracts::{deploy_token_contract, set_contract},
    logging::init_test_logging,
    node::{terminate_existing, NodeConfig, NodeProcess},
    retry::{retry, MAX_PUSH_ATTEMPTS, RETRY_DELAY},
    utilities::{pause, random_account_name},
    waiters::{wait_for, wait_for_head_block, wait_until_irreversible},
};
