use thiserror::Error;

use crate::{api::ErrorResponse, crypto::CryptoError};

// Node exceptions that are worth another attempt: the transaction itself is
// fine, the node just ran out of time for it
const RETRYABLE_ERROR_NAMES: &[&str] = &[
    "deadline_exception",
    "expired_tx_exception",
    "leeway_deadline_exception",
];

#[derive(Error, Debug)]
pub enum RpcError {
    #[error("http request failed: {}", _0)]
    Http(#[from] reqwest::Error),
    #[error("invalid response from node: {}", _0)]
    InvalidResponse(#[from] serde_json::Error),
    #[error("node error {} ({}): {}{}", .0.error.code, .0.error.name, .0.error.what, format_details(.0))]
    Node(ErrorResponse),
    #[error("endpoint returned status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error(transparent)]
    Signing(#[from] CryptoError),
}

fn format_details(response: &ErrorResponse) -> String {
    if response.error.details.is_empty() {
        String::new()
    } else {
        let messages: Vec<&str> = response
            .error
            .details
            .iter()
            .map(|detail| detail.message.as_str())
            .collect();
        format!(" [{}]", messages.join("; "))
    }
}

impl RpcError {
    /// The assertion name the node rejected with, if this is a node error.
    pub fn error_name(&self) -> Option<&str> {
        match self {
            RpcError::Node(response) => Some(response.error.name.as_str()),
            _ => None,
        }
    }

    /// The fixed classification behind the push retry loop: transport
    /// timeouts and connection failures may heal on their own, and so may
    /// the node's deadline family of exceptions. Everything else is
    /// deterministic and fatal.
    pub fn is_retryable(&self) -> bool {
        match self {
            RpcError::Http(error) => error.is_timeout() || error.is_connect(),
            RpcError::Node(response) => {
                RETRYABLE_ERROR_NAMES.contains(&response.error.name.as_str())
                    || response.error.what.contains("deadline exceeded")
            }
            _ => false,
        }
    }
}
