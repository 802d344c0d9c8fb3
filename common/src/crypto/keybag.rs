use log::debug;

use super::{
    error::CryptoError,
    hash::Checksum256,
    key::{KeyPair, PublicKey, SecretKey},
    signature::Signature,
};
use crate::transaction::{SignedTransaction, Transaction};

/// In-memory signer for tests: holds plaintext secret keys and signs
/// transaction digests with whichever of them the node reports as required.
#[derive(Clone, Debug, Default)]
pub struct KeyBag {
    keys: Vec<KeyPair>,
}

impl KeyBag {
    pub fn new() -> Self {
        KeyBag { keys: Vec::new() }
    }

    /// Import a WIF-encoded private key. Importing the same key twice is a
    /// no-op. Returns the derived public key.
    pub fn import_private_key(&mut self, wif: &str) -> Result<PublicKey, CryptoError> {
        let pair = KeyPair::from_wif(wif)?;
        let public = *pair.public();
        if !self.contains(&public) {
            debug!("imported key {}", public);
            self.keys.push(pair);
        }
        Ok(public)
    }

    /// Add an already-parsed secret key. Returns the derived public key.
    pub fn add_key(&mut self, secret: SecretKey) -> PublicKey {
        let pair = KeyPair::from_secret(secret);
        let public = *pair.public();
        if !self.contains(&public) {
            self.keys.push(pair);
        }
        public
    }

    pub fn contains(&self, key: &PublicKey) -> bool {
        self.keys.iter().any(|pair| pair.public() == key)
    }

    pub fn public_keys(&self) -> Vec<PublicKey> {
        self.keys.iter().map(|pair| *pair.public()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Sign a digest with each of the required keys, in the order requested.
    pub fn sign_digest(
        &self,
        digest: &Checksum256,
        required: &[PublicKey],
    ) -> Result<Vec<Signature>, CryptoError> {
        let mut signatures = Vec::with_capacity(required.len());
        for key in required {
            let pair = self
                .keys
                .iter()
                .find(|pair| pair.public() == key)
                .ok_or_else(|| CryptoError::KeyNotFound(key.to_string()))?;
            signatures.push(pair.secret().sign(digest)?);
        }
        Ok(signatures)
    }

    /// Sign a transaction for the given chain with the required keys.
    pub fn sign_transaction(
        &self,
        transaction: Transaction,
        chain_id: &Checksum256,
        required: &[PublicKey],
    ) -> Result<SignedTransaction, CryptoError> {
        let digest = transaction.signing_digest(chain_id);
        let signatures = self.sign_digest(&digest, required)?;
        Ok(SignedTransaction {
            transaction,
            signatures,
            context_free_data: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::hash::sha256;

    const DEV_WIF: &str = "5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD3";

    #[test]
    fn test_import_and_lookup() {
        let mut bag = KeyBag::new();
        assert!(bag.is_empty());

        let public = bag.import_private_key(DEV_WIF).unwrap();
        assert!(bag.contains(&public));
        assert_eq!(bag.public_keys(), vec![public]);

        // Importing again does not duplicate
        bag.import_private_key(DEV_WIF).unwrap();
        assert_eq!(bag.len(), 1);
    }

    #[test]
    fn test_sign_digest_with_required_keys() {
        let mut bag = KeyBag::new();
        let first = bag.add_key(SecretKey::generate());
        let second = bag.add_key(SecretKey::generate());

        let digest = sha256(b"payload");
        let signatures = bag.sign_digest(&digest, &[second, first]).unwrap();
        assert_eq!(signatures.len(), 2);
        assert_eq!(signatures[0].recover(&digest).unwrap(), second);
        assert_eq!(signatures[1].recover(&digest).unwrap(), first);
    }

    #[test]
    fn test_sign_digest_missing_key() {
        let bag = KeyBag::new();
        let stranger = SecretKey::generate().public_key();
        let digest = sha256(b"payload");
        assert!(matches!(
            bag.sign_digest(&digest, &[stranger]),
            Err(CryptoError::KeyNotFound(_))
        ));
    }
}
