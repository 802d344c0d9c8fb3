use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Invalid WIF private key")]
    InvalidWif,
    #[error("Invalid base58 payload")]
    InvalidBase58,
    #[error("Checksum mismatch")]
    ChecksumMismatch,
    #[error("Invalid public key: {}", _0)]
    InvalidPublicKey(String),
    #[error("Invalid signature: {}", _0)]
    InvalidSignature(String),
    #[error("Signing failed: {}", _0)]
    SigningFailed(String),
    #[error("Could not produce a canonical signature")]
    NonCanonicalSignature,
    #[error("No key in the bag matches required key {}", _0)]
    KeyNotFound(String),
}
