use crate::{api::ChainInfo, config::DEFAULT_EXPIRE_SECONDS, transaction::Action};

use super::{Transaction, TransactionHeader};

/// Builds a [`Transaction`] from a list of actions, filling the TaPoS
/// reference-block fields and the expiration from the node's `get_info`
/// answer.
#[derive(Clone, Debug)]
pub struct TransactionBuilder {
    actions: Vec<Action>,
    expire_seconds: u32,
    max_net_usage_words: u32,
    max_cpu_usage_ms: u8,
    delay_sec: u32,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        TransactionBuilder {
            actions: Vec::new(),
            expire_seconds: DEFAULT_EXPIRE_SECONDS,
            max_net_usage_words: 0,
            max_cpu_usage_ms: 0,
            delay_sec: 0,
        }
    }

    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn actions<I: IntoIterator<Item = Action>>(mut self, actions: I) -> Self {
        self.actions.extend(actions);
        self
    }

    /// Seconds the transaction stays valid past the referenced head block.
    pub fn expire_after(mut self, seconds: u32) -> Self {
        self.expire_seconds = seconds;
        self
    }

    pub fn max_net_usage_words(mut self, words: u32) -> Self {
        self.max_net_usage_words = words;
        self
    }

    pub fn max_cpu_usage_ms(mut self, ms: u8) -> Self {
        self.max_cpu_usage_ms = ms;
        self
    }

    pub fn delay_sec(mut self, seconds: u32) -> Self {
        self.delay_sec = seconds;
        self
    }

    pub fn build(self, info: &ChainInfo) -> Transaction {
        let head_block_id = info.head_block_id.as_bytes();
        // TaPoS: low 16 bits of the head block number, and bytes 8..12 of
        // its id interpreted little-endian
        let ref_block_num = (info.head_block_num & 0xffff) as u16;
        let ref_block_prefix = u32::from_le_bytes([
            head_block_id[8],
            head_block_id[9],
            head_block_id[10],
            head_block_id[11],
        ]);
        // Anchoring the expiration to the head block time keeps it valid
        // even when the test host clock drifts from the node
        let expiration = info.head_block_time.plus_seconds(self.expire_seconds);

        Transaction {
            header: TransactionHeader {
                expiration,
                ref_block_num,
                ref_block_prefix,
                max_net_usage_words: self.max_net_usage_words,
                max_cpu_usage_ms: self.max_cpu_usage_ms,
                delay_sec: self.delay_sec,
            },
            context_free_actions: Vec::new(),
            actions: self.actions,
            transaction_extensions: Vec::new(),
        }
    }
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        crypto::Checksum256,
        name::Name,
        time::TimePointSec,
        transaction::PermissionLevel,
    };

    fn sample_info() -> ChainInfo {
        let mut id = [0u8; 32];
        // Block number lives in the first four big-endian bytes
        id[0..4].copy_from_slice(&0x0001_e240u32.to_be_bytes());
        id[8..12].copy_from_slice(&[0x11, 0x22, 0x33, 0x44]);
        ChainInfo {
            server_version: "deadbeef".to_string(),
            chain_id: Checksum256::new([7u8; 32]),
            head_block_num: 123456,
            last_irreversible_block_num: 123400,
            last_irreversible_block_id: Checksum256::zero(),
            head_block_id: Checksum256::new(id),
            head_block_time: TimePointSec::from_unix_seconds(1_700_000_000),
            head_block_producer: Name::from_static("eosio"),
            server_version_string: None,
        }
    }

    fn sample_action() -> Action {
        Action {
            account: Name::from_static("eosio"),
            name: Name::from_static("newaccount"),
            authorization: vec![PermissionLevel::new(
                Name::from_static("eosio"),
                Name::from_static("active"),
            )],
            data: Vec::new(),
        }
    }

    #[test]
    fn test_tapos_fields() {
        let transaction = TransactionBuilder::new()
            .action(sample_action())
            .build(&sample_info());

        // 123456 & 0xffff
        assert_eq!(transaction.header.ref_block_num, 0xe240);
        assert_eq!(transaction.header.ref_block_prefix, 0x4433_2211);
    }

    #[test]
    fn test_expiration_follows_head_block_time() {
        let transaction = TransactionBuilder::new()
            .expire_after(90)
            .action(sample_action())
            .build(&sample_info());
        assert_eq!(
            transaction.header.expiration,
            TimePointSec::from_unix_seconds(1_700_000_000 + 90)
        );
    }

    #[test]
    fn test_defaults() {
        let transaction = TransactionBuilder::new()
            .actions(vec![sample_action(), sample_action()])
            .build(&sample_info());
        assert_eq!(transaction.actions.len(), 2);
        assert_eq!(transaction.header.max_net_usage_words, 0);
        assert_eq!(transaction.header.max_cpu_usage_ms, 0);
        assert_eq!(transaction.header.delay_sec, 0);
        assert!(transaction.context_free_actions.is_empty());
        assert!(transaction.transaction_extensions.is_empty());
    }
}
