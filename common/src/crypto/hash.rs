use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::{de::Error as SerdeError, Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};

use crate::serializer::{Reader, ReaderError, Serializer, Writer};

pub const HASH_SIZE: usize = 32; // 32 bytes / 256 bits

/// SHA-256 digest: chain ids, block ids and transaction ids all share this
/// shape.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Checksum256([u8; HASH_SIZE]);

impl Checksum256 {
    pub const fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Checksum256(bytes)
    }

    pub const fn zero() -> Self {
        Checksum256([0; HASH_SIZE])
    }

    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    pub fn to_bytes(self) -> [u8; HASH_SIZE] {
        self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

// Hash a byte slice with SHA-256
pub fn sha256(data: &[u8]) -> Checksum256 {
    let digest: [u8; HASH_SIZE] = Sha256::digest(data).into();
    Checksum256(digest)
}

// Double SHA-256, used by the WIF key checksum
pub fn sha256d(data: &[u8]) -> Checksum256 {
    sha256(sha256(data).as_bytes())
}

impl Display for Checksum256 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Checksum256 {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|_| "Invalid hex string")?;
        let bytes: [u8; HASH_SIZE] = bytes.try_into().map_err(|_| "Invalid checksum length")?;
        Ok(Checksum256(bytes))
    }
}

impl Serialize for Checksum256 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Checksum256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(SerdeError::custom)
    }
}

impl Serializer for Checksum256 {
    fn write(&self, writer: &mut Writer) {
        writer.write_bytes(&self.0);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Checksum256(reader.read_bytes_32()?))
    }
}
