use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, VerifyingKey};
use serde::{de::Error as SerdeError, Deserialize, Deserializer, Serialize};

use super::{
    error::CryptoError,
    hash::Checksum256,
    key::{ripemd160_checksum, PublicKey},
};
use crate::serializer::{Reader, ReaderError, Serializer, Writer};

pub const SIGNATURE_SIZE: usize = 65;

const SIGNATURE_PREFIX: &str = "SIG_K1_";
// Recovery flag base: 27 for an uncompressed key, +4 because ours are
// compressed
const RECOVERY_FLAG_BASE: u8 = 31;

/// Recoverable secp256k1 signature in the node's compact form:
/// `[recovery_flag, r, s]`, printed as `SIG_K1_...`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Signature([u8; SIGNATURE_SIZE]);

impl Signature {
    pub(crate) fn from_parts(recovery_id: u8, rs: &[u8]) -> Self {
        let mut bytes = [0u8; SIGNATURE_SIZE];
        bytes[0] = RECOVERY_FLAG_BASE + recovery_id;
        bytes[1..].copy_from_slice(rs);
        Signature(bytes)
    }

    pub fn from_bytes_65(bytes: [u8; SIGNATURE_SIZE]) -> Result<Self, CryptoError> {
        if bytes[0] < RECOVERY_FLAG_BASE || bytes[0] >= RECOVERY_FLAG_BASE + 4 {
            return Err(CryptoError::InvalidSignature(
                "unexpected recovery flag".to_string(),
            ));
        }
        Ok(Signature(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.0
    }

    pub fn recovery_id(&self) -> u8 {
        self.0[0] - RECOVERY_FLAG_BASE
    }

    /// The node only accepts signatures whose (r, s) encoding cannot be
    /// confused with a shorter one: top bit of each component clear and no
    /// redundant leading zero byte.
    pub fn is_canonical(&self) -> bool {
        let c = &self.0;
        c[1] & 0x80 == 0
            && !(c[1] == 0 && c[2] & 0x80 == 0)
            && c[33] & 0x80 == 0
            && !(c[33] == 0 && c[34] & 0x80 == 0)
    }

    /// Recover the public key that produced this signature over `digest`.
    pub fn recover(&self, digest: &Checksum256) -> Result<PublicKey, CryptoError> {
        let signature = EcdsaSignature::from_slice(&self.0[1..])
            .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
        let recovery_id = RecoveryId::from_byte(self.recovery_id())
            .ok_or_else(|| CryptoError::InvalidSignature("invalid recovery id".to_string()))?;
        let key = VerifyingKey::recover_from_prehash(digest.as_bytes(), &signature, recovery_id)
            .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
        Ok(PublicKey::from_verifying_key(&key))
    }

    pub fn verify(&self, digest: &Checksum256, public_key: &PublicKey) -> bool {
        match self.recover(digest) {
            Ok(recovered) => &recovered == public_key,
            Err(_) => false,
        }
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let checksum = ripemd160_checksum(&self.0, b"K1");
        let mut payload = Vec::with_capacity(SIGNATURE_SIZE + 4);
        payload.extend_from_slice(&self.0);
        payload.extend_from_slice(&checksum);
        write!(f, "{}{}", SIGNATURE_PREFIX, bs58::encode(payload).into_string())
    }
}

impl FromStr for Signature {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let encoded = s
            .strip_prefix(SIGNATURE_PREFIX)
            .ok_or_else(|| CryptoError::InvalidSignature("missing SIG_K1_ prefix".to_string()))?;
        let decoded = bs58::decode(encoded)
            .into_vec()
            .map_err(|_| CryptoError::InvalidBase58)?;
        if decoded.len() != SIGNATURE_SIZE + 4 {
            return Err(CryptoError::InvalidSignature(
                "unexpected payload length".to_string(),
            ));
        }
        let (bytes, checksum) = decoded.split_at(SIGNATURE_SIZE);
        if ripemd160_checksum(bytes, b"K1") != checksum {
            return Err(CryptoError::ChecksumMismatch);
        }
        let mut raw = [0u8; SIGNATURE_SIZE];
        raw.copy_from_slice(bytes);
        Signature::from_bytes_65(raw)
    }
}

impl Serialize for Signature {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(SerdeError::custom)
    }
}

impl Serializer for Signature {
    fn write(&self, writer: &mut Writer) {
        // K1 key type tag
        writer.write_u8(0);
        writer.write_bytes(&self.0);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        if reader.read_u8()? != 0 {
            return Err(ReaderError::InvalidValue("unsupported signature type"));
        }
        let mut bytes = [0u8; SIGNATURE_SIZE];
        bytes.copy_from_slice(reader.read_bytes(SIGNATURE_SIZE)?);
        Ok(Signature(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{hash::sha256, key::SecretKey};

    #[test]
    fn test_sign_recover_verify() {
        let secret = SecretKey::generate();
        let public = secret.public_key();
        let digest = sha256(b"some signing payload");

        let signature = secret.sign(&digest).unwrap();
        assert!(signature.is_canonical());
        assert_eq!(signature.recover(&digest).unwrap(), public);
        assert!(signature.verify(&digest, &public));

        let other_digest = sha256(b"a different payload");
        assert!(!signature.verify(&other_digest, &public));
    }

    #[test]
    fn test_signing_is_deterministic() {
        let secret = SecretKey::generate();
        let digest = sha256(b"deterministic");
        let a = secret.sign(&digest).unwrap();
        let b = secret.sign(&digest).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_string_roundtrip() {
        let secret = SecretKey::generate();
        let digest = sha256(b"text form");
        let signature = secret.sign(&digest).unwrap();

        let text = signature.to_string();
        assert!(text.starts_with("SIG_K1_"));
        let parsed: Signature = text.parse().unwrap();
        assert_eq!(parsed, signature);
    }

    #[test]
    fn test_rejects_tampered_text() {
        let secret = SecretKey::generate();
        let digest = sha256(b"tamper");
        let text = secret.sign(&digest).unwrap().to_string();

        assert!("SIG_K1_".parse::<Signature>().is_err());
        assert!(text.trim_start_matches("SIG_K1_").parse::<Signature>().is_err());

        // Flip one base58 character, the checksum has to catch it
        let mut chars: Vec<char> = text.chars().collect();
        let last = chars.len() - 1;
        chars[last] = if chars[last] == '1' { '2' } else { '1' };
        let tampered: String = chars.into_iter().collect();
        assert!(tampered.parse::<Signature>().is_err());
    }

    #[test]
    fn test_binary_roundtrip() {
        let secret = SecretKey::generate();
        let digest = sha256(b"binary form");
        let signature = secret.sign(&digest).unwrap();

        let bytes = signature.to_bytes();
        assert_eq!(bytes.len(), 1 + SIGNATURE_SIZE);
        assert_eq!(bytes[0], 0);
        assert_eq!(Signature::from_bytes(&bytes).unwrap(), signature);
    }
}
