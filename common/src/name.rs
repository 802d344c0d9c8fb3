use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::{de::Error as SerdeError, Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::serializer::{Reader, ReaderError, Serializer, Writer};

// Base-32 alphabet used by the chain: index 0 is '.', then 1-5, then a-z
const CHARSET: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

pub const MAX_NAME_LENGTH: usize = 13;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("Account name is empty")]
    Empty,
    #[error("Account name is longer than {} characters", MAX_NAME_LENGTH)]
    TooLong,
    #[error("Invalid character '{}' in account name", _0)]
    InvalidChar(char),
    #[error("Character '{}' is not allowed in 13th position", _0)]
    InvalidSuffixChar(char),
}

/// On-chain account, action or permission name: up to 13 characters from
/// `.12345a-z`, packed big-endian into a `u64` (5 bits per character, the
/// 13th restricted to 4 bits).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Name(u64);

const fn char_to_symbol(c: u8) -> Option<u64> {
    match c {
        b'a'..=b'z' => Some((c - b'a') as u64 + 6),
        b'1'..=b'5' => Some((c - b'1') as u64 + 1),
        b'.' => Some(0),
        _ => None,
    }
}

const fn pack(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() || bytes.len() > MAX_NAME_LENGTH {
        return None;
    }
    let mut value: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let symbol = match char_to_symbol(bytes[i]) {
            Some(symbol) => symbol,
            None => return None,
        };
        if i < 12 {
            value |= (symbol & 0x1f) << (64 - 5 * (i + 1));
        } else {
            // 13th character only has 4 bits left
            if symbol > 0x0f {
                return None;
            }
            value |= symbol;
        }
        i += 1;
    }
    Some(value)
}

impl Name {
    pub const fn from_u64(value: u64) -> Self {
        Name(value)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Compile-time constructor for name literals.
    /// Panics during constant evaluation if the literal is not a valid name.
    pub const fn from_static(s: &str) -> Self {
        match pack(s.as_bytes()) {
            Some(value) => Name(value),
            None => panic!("invalid account name literal"),
        }
    }

    pub fn new(s: &str) -> Result<Self, NameError> {
        let bytes = s.as_bytes();
        if bytes.is_empty() {
            return Err(NameError::Empty);
        }
        if bytes.len() > MAX_NAME_LENGTH {
            return Err(NameError::TooLong);
        }
        for (i, &c) in bytes.iter().enumerate() {
            let symbol = char_to_symbol(c).ok_or(NameError::InvalidChar(c as char))?;
            if i == 12 && symbol > 0x0f {
                return Err(NameError::InvalidSuffixChar(c as char));
            }
        }
        // Validated above, pack cannot fail anymore
        pack(bytes).map(Name).ok_or(NameError::Empty)
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut chars = [b'.'; MAX_NAME_LENGTH];
        for (i, slot) in chars.iter_mut().enumerate() {
            let index = if i == 12 {
                (self.0 & 0x0f) as usize
            } else {
                ((self.0 >> (64 - 5 * (i + 1))) & 0x1f) as usize
            };
            *slot = CHARSET[index];
        }
        let mut end = MAX_NAME_LENGTH;
        while end > 0 && chars[end - 1] == b'.' {
            end -= 1;
        }
        // Charset is pure ASCII
        f.write_str(std::str::from_utf8(&chars[..end]).map_err(|_| fmt::Error)?)
    }
}

impl FromStr for Name {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Name::new(s)
    }
}

impl Serialize for Name {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Name::new(&s).map_err(SerdeError::custom)
    }
}

impl Serializer for Name {
    fn write(&self, writer: &mut Writer) {
        writer.write_u64(self.0);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Name(reader.read_u64()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_encoding() {
        // Value every chain tool agrees on for the system account
        assert_eq!(Name::new("eosio").unwrap().as_u64(), 6138663577826885632);
        assert_eq!(Name::from_static("eosio").as_u64(), 6138663577826885632);
    }

    #[test]
    fn test_roundtrip() {
        for name in [
            "eosio",
            "eosio.token",
            "eosio.code",
            "alice",
            "a",
            "zzzzzzzzzzzz",
            "111122223333",
            "abc.def.ghi",
        ] {
            let parsed = Name::new(name).unwrap();
            assert_eq!(parsed.to_string(), name);
            let reparsed = Name::new(&parsed.to_string()).unwrap();
            assert_eq!(parsed, reparsed);
        }
    }

    #[test]
    fn test_thirteen_chars() {
        // 13th char may only use the 4-bit range '.', '1'-'5', 'a'-'j'
        let name = Name::new("aaaaaaaaaaaaj").unwrap();
        assert_eq!(name.to_string(), "aaaaaaaaaaaaj");
        assert_eq!(
            Name::new("aaaaaaaaaaaaz"),
            Err(NameError::InvalidSuffixChar('z'))
        );
    }

    #[test]
    fn test_invalid_names() {
        assert_eq!(Name::new(""), Err(NameError::Empty));
        assert_eq!(Name::new("aaaaaaaaaaaaaa"), Err(NameError::TooLong));
        assert_eq!(Name::new("Alice"), Err(NameError::InvalidChar('A')));
        assert_eq!(Name::new("alice0"), Err(NameError::InvalidChar('0')));
        assert_eq!(Name::new("alice-1"), Err(NameError::InvalidChar('-')));
    }

    #[test]
    fn test_trailing_dots_are_trimmed() {
        assert_eq!(Name::new("alice").unwrap(), Name::new("alice").unwrap());
        // "alice" and "alice." pack to the same value, display is canonical
        assert_eq!(Name::new("alice.").unwrap().to_string(), "alice");
    }

    #[test]
    fn test_binary_form() {
        let name = Name::new("eosio").unwrap();
        assert_eq!(name.to_bytes(), 6138663577826885632u64.to_le_bytes());
        assert_eq!(Name::from_bytes(&name.to_bytes()).unwrap(), name);
    }

    #[test]
    fn test_serde_as_string() {
        let name = Name::new("eosio.token").unwrap();
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"eosio.token\"");
        let parsed: Name = serde_json::from_str("\"eosio.token\"").unwrap();
        assert_eq!(parsed, name);
    }
}
