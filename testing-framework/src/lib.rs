//! # Antelope Testing Framework
//!
//! Helpers for exercising a locally running Antelope node from integration
//! tests: spawn and supervise the node process, create accounts, deploy
//! contracts, and push transactions with bounded retry.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use antelope_testing_framework::prelude::*;
//!
//! #[tokio::test]
//! async fn test_transfer() {
//!     let node = NodeProcess::restart(NodeConfig::default()).await.unwrap();
//!     let client = node.client();
//!
//!     let mut keys = KeyBag::new();
//!     keys.import_private_key(DEVELOPMENT_PRIVATE_KEY).unwrap();
//!
//!     let (_, account) = create_random_account(&client, &mut keys).await.unwrap();
//!     // Your test here...
//! }
//! ```
//!
//! ## Design notes
//!
//! - Every helper takes a [`ChainClient`](antelope_common::ChainClient) and a
//!   [`KeyBag`](antelope_common::KeyBag) explicitly; nothing global.
//! - Pushes classify node errors as retryable or fatal and give up after a
//!   fixed number of attempts.
//! - Tests that need a live `nodeos` binary live in `tests/` behind
//!   `#[ignore]`.

#![warn(clippy::all)]

pub mod accounts;
pub mod assertions;
pub mod chain;
pub mod contracts;
pub mod logging;
pub mod node;
pub mod retry;
pub mod waiters;

/// Shared utilities: generated account names and terminal progress display
pub mod utilities;

// Convenient re-exports for common usage
pub mod prelude;

/// Framework version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
