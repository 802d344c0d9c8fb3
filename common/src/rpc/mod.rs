mod client;
mod error;

pub use client::ChainClient;
pub use error::RpcError;
