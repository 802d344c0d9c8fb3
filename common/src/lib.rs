//! Chain primitives, signing and an HTTP API client for an Antelope node.
//!
//! This crate carries everything the testing framework needs to talk to a
//! locally running node: names, assets and timestamps with their wire
//! encodings, K1 keys and canonical signatures, transaction building with
//! TaPoS, typed system/token contract actions, ABI packing, and the
//! `/v1/chain` HTTP client.

pub mod abi;
pub mod api;
pub mod asset;
pub mod config;
pub mod crypto;
pub mod name;
pub mod rpc;
pub mod serializer;
pub mod system;
pub mod time;
pub mod token;
pub mod transaction;

pub use asset::{Asset, Symbol};
pub use crypto::{Checksum256, KeyBag, KeyPair, PublicKey, SecretKey, Signature};
pub use name::Name;
pub use rpc::{ChainClient, RpcError};
pub use time::TimePointSec;
pub use transaction::{Action, PermissionLevel, Transaction, TransactionBuilder};
