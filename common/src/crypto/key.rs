use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use k256::{
    ecdsa::{hazmat::SignPrimitive, RecoveryId, SigningKey, VerifyingKey},
    elliptic_curve::sec1::ToEncodedPoint,
    FieldBytes,
};
use rand::rngs::OsRng;
use ripemd::Ripemd160;
use serde::{de::Error as SerdeError, Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};

use super::{error::CryptoError, hash::Checksum256, hash::sha256d, signature::Signature};
use crate::serializer::{Reader, ReaderError, Serializer, Writer};

pub const PUBLIC_KEY_SIZE: usize = 33;
pub const SECRET_KEY_SIZE: usize = 32;

const LEGACY_PUBLIC_KEY_PREFIX: &str = "EOS";
const K1_PUBLIC_KEY_PREFIX: &str = "PUB_K1_";
const WIF_VERSION: u8 = 0x80;

// The signer retries with fresh deterministic nonces until the signature is
// canonical; in practice one or two rounds are enough.
const MAX_SIGNING_ATTEMPTS: u32 = 100;

pub(crate) fn ripemd160_checksum(data: &[u8], suffix: &[u8]) -> [u8; 4] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.update(suffix);
    let digest = hasher.finalize();
    [digest[0], digest[1], digest[2], digest[3]]
}

/// Compressed secp256k1 public key, printed in the legacy `EOS...` form.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct PublicKey([u8; PUBLIC_KEY_SIZE]);

impl PublicKey {
    pub fn from_bytes_33(bytes: [u8; PUBLIC_KEY_SIZE]) -> Result<Self, CryptoError> {
        // Reject anything that is not a valid curve point
        VerifyingKey::from_sec1_bytes(&bytes)
            .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;
        Ok(PublicKey(bytes))
    }

    pub(crate) fn from_verifying_key(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(true);
        let mut bytes = [0u8; PUBLIC_KEY_SIZE];
        bytes.copy_from_slice(point.as_bytes());
        PublicKey(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.0
    }

    fn decode_base58(payload: &str, suffix: &[u8]) -> Result<Self, CryptoError> {
        let decoded = bs58::decode(payload)
            .into_vec()
            .map_err(|_| CryptoError::InvalidBase58)?;
        if decoded.len() != PUBLIC_KEY_SIZE + 4 {
            return Err(CryptoError::InvalidPublicKey(
                "unexpected payload length".to_string(),
            ));
        }
        let (bytes, checksum) = decoded.split_at(PUBLIC_KEY_SIZE);
        if ripemd160_checksum(bytes, suffix) != checksum {
            return Err(CryptoError::ChecksumMismatch);
        }
        let mut raw = [0u8; PUBLIC_KEY_SIZE];
        raw.copy_from_slice(bytes);
        PublicKey::from_bytes_33(raw)
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let checksum = ripemd160_checksum(&self.0, b"");
        let mut payload = Vec::with_capacity(PUBLIC_KEY_SIZE + 4);
        payload.extend_from_slice(&self.0);
        payload.extend_from_slice(&checksum);
        write!(
            f,
            "{}{}",
            LEGACY_PUBLIC_KEY_PREFIX,
            bs58::encode(payload).into_string()
        )
    }
}

impl FromStr for PublicKey {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(payload) = s.strip_prefix(K1_PUBLIC_KEY_PREFIX) {
            return Self::decode_base58(payload, b"K1");
        }
        if let Some(payload) = s.strip_prefix(LEGACY_PUBLIC_KEY_PREFIX) {
            return Self::decode_base58(payload, b"");
        }
        Err(CryptoError::InvalidPublicKey(format!(
            "unknown prefix in '{}'",
            s
        )))
    }
}

impl Serialize for PublicKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(SerdeError::custom)
    }
}

impl Serializer for PublicKey {
    fn write(&self, writer: &mut Writer) {
        // K1 key type tag
        writer.write_u8(0);
        writer.write_bytes(&self.0);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        if reader.read_u8()? != 0 {
            return Err(ReaderError::InvalidValue("unsupported public key type"));
        }
        let mut bytes = [0u8; PUBLIC_KEY_SIZE];
        bytes.copy_from_slice(reader.read_bytes(PUBLIC_KEY_SIZE)?);
        PublicKey::from_bytes_33(bytes)
            .map_err(|_| ReaderError::InvalidValue("not a valid curve point"))
    }
}

/// secp256k1 secret key, imported and exported in WIF.
pub struct SecretKey {
    inner: SigningKey,
}

impl SecretKey {
    pub fn generate() -> Self {
        SecretKey {
            inner: SigningKey::random(&mut OsRng),
        }
    }

    pub fn from_wif(wif: &str) -> Result<Self, CryptoError> {
        let decoded = bs58::decode(wif)
            .into_vec()
            .map_err(|_| CryptoError::InvalidBase58)?;
        if decoded.len() != 1 + SECRET_KEY_SIZE + 4 || decoded[0] != WIF_VERSION {
            return Err(CryptoError::InvalidWif);
        }
        let (payload, checksum) = decoded.split_at(1 + SECRET_KEY_SIZE);
        if &sha256d(payload).as_bytes()[..4] != checksum {
            return Err(CryptoError::ChecksumMismatch);
        }
        let inner = SigningKey::from_slice(&payload[1..]).map_err(|_| CryptoError::InvalidWif)?;
        Ok(SecretKey { inner })
    }

    pub fn to_wif(&self) -> String {
        let mut payload = Vec::with_capacity(1 + SECRET_KEY_SIZE + 4);
        payload.push(WIF_VERSION);
        payload.extend_from_slice(self.inner.to_bytes().as_slice());
        let checksum = sha256d(&payload);
        payload.extend_from_slice(&checksum.as_bytes()[..4]);
        bs58::encode(payload).into_string()
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_verifying_key(self.inner.verifying_key())
    }

    /// Sign a transaction digest, producing a canonical recoverable
    /// signature. Deterministic: the nonce is RFC6979 with a retry counter
    /// as extra entropy, bumped until the canonical form comes out.
    pub fn sign(&self, digest: &Checksum256) -> Result<Signature, CryptoError> {
        let z = FieldBytes::clone_from_slice(digest.as_bytes());
        let expected = self.inner.verifying_key();
        for counter in 0..MAX_SIGNING_ATTEMPTS {
            let extra_entropy = counter.to_le_bytes();
            let (signature, _) = self
                .inner
                .as_nonzero_scalar()
                .try_sign_prehashed_rfc6979::<Sha256>(&z, &extra_entropy)
                .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
            let signature = signature.normalize_s().unwrap_or(signature);
            let rs = signature.to_bytes();

            let candidate = Signature::from_parts(0, rs.as_slice());
            if !candidate.is_canonical() {
                continue;
            }

            for recovery in 0u8..=1 {
                if let Some(recovery_id) = RecoveryId::from_byte(recovery) {
                    let recovered = VerifyingKey::recover_from_prehash(
                        digest.as_bytes(),
                        &signature,
                        recovery_id,
                    );
                    if let Ok(recovered) = recovered {
                        if &recovered == expected {
                            return Ok(Signature::from_parts(recovery, rs.as_slice()));
                        }
                    }
                }
            }
        }
        Err(CryptoError::NonCanonicalSignature)
    }
}

impl Clone for SecretKey {
    fn clone(&self) -> Self {
        SecretKey {
            inner: self.inner.clone(),
        }
    }
}

// Never print key material
impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey({})", self.public_key())
    }
}

/// Secret key with its derived public key.
#[derive(Clone, Debug)]
pub struct KeyPair {
    secret: SecretKey,
    public: PublicKey,
}

impl KeyPair {
    pub fn generate() -> Self {
        Self::from_secret(SecretKey::generate())
    }

    pub fn from_secret(secret: SecretKey) -> Self {
        let public = secret.public_key();
        KeyPair { secret, public }
    }

    pub fn from_wif(wif: &str) -> Result<Self, CryptoError> {
        let secret = SecretKey::from_wif(wif)?;
        let public = secret.public_key();
        Ok(KeyPair { secret, public })
    }

    pub fn secret(&self) -> &SecretKey {
        &self.secret
    }

    pub fn public(&self) -> &PublicKey {
        &self.public
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The stock development key every tutorial chain ships with
    const DEV_WIF: &str = "5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD3";
    const DEV_PUBLIC: &str = "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV";

    #[test]
    fn test_wif_to_public_key_vector() {
        let secret = SecretKey::from_wif(DEV_WIF).unwrap();
        assert_eq!(secret.public_key().to_string(), DEV_PUBLIC);
    }

    #[test]
    fn test_second_known_pair() {
        let secret =
            SecretKey::from_wif("5KYZdUEo39z3FPrtuX2QbbwGnNP5zTd7yyr2SC1j299sBCnWjss").unwrap();
        assert_eq!(
            secret.public_key().to_string(),
            "EOS859gxfnXyUriMgUeThh1fWv3oqcpLFyHa3TfFYC4PK2HqhToVM"
        );
    }

    #[test]
    fn test_wif_roundtrip() {
        let secret = SecretKey::from_wif(DEV_WIF).unwrap();
        assert_eq!(secret.to_wif(), DEV_WIF);

        let fresh = SecretKey::generate();
        let restored = SecretKey::from_wif(&fresh.to_wif()).unwrap();
        assert_eq!(restored.public_key(), fresh.public_key());
    }

    #[test]
    fn test_wif_rejects_garbage() {
        assert!(SecretKey::from_wif("").is_err());
        assert!(SecretKey::from_wif("notbase58!!!").is_err());
        // Valid base58, wrong length
        assert!(SecretKey::from_wif("5KQwrP").is_err());
    }

    #[test]
    fn test_wif_rejects_bad_checksum() {
        let mut wif: Vec<char> = DEV_WIF.chars().collect();
        let last = wif.len() - 1;
        wif[last] = if wif[last] == '3' { '4' } else { '3' };
        let tampered: String = wif.into_iter().collect();
        assert!(matches!(
            SecretKey::from_wif(&tampered),
            Err(CryptoError::ChecksumMismatch) | Err(CryptoError::InvalidWif)
        ));
    }

    #[test]
    fn test_public_key_parse_display() {
        let public: PublicKey = DEV_PUBLIC.parse().unwrap();
        assert_eq!(public.to_string(), DEV_PUBLIC);
        assert!("XYZ123".parse::<PublicKey>().is_err());
    }

    #[test]
    fn test_public_key_binary_form() {
        let public: PublicKey = DEV_PUBLIC.parse().unwrap();
        let bytes = public.to_bytes();
        assert_eq!(bytes.len(), 1 + PUBLIC_KEY_SIZE);
        assert_eq!(bytes[0], 0);
        assert_eq!(PublicKey::from_bytes(&bytes).unwrap(), public);
    }

    #[test]
    fn test_keypair() {
        let pair = KeyPair::generate();
        assert_eq!(&pair.secret().public_key(), pair.public());

        let pair = KeyPair::from_wif(DEV_WIF).unwrap();
        assert_eq!(pair.public().to_string(), DEV_PUBLIC);
    }
}
