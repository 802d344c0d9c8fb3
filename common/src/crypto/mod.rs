mod error;
mod hash;
mod key;
mod keybag;
mod signature;

pub use error::CryptoError;
pub use hash::{sha256, sha256d, Checksum256, HASH_SIZE};
pub use key::{KeyPair, PublicKey, SecretKey, PUBLIC_KEY_SIZE, SECRET_KEY_SIZE};
pub use keybag::KeyBag;
pub use signature::{Signature, SIGNATURE_SIZE};
