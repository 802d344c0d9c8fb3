use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::{de::Error as SerdeError, Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::serializer::{Reader, ReaderError, Serializer, Writer};

pub const MAX_SYMBOL_CODE_LENGTH: usize = 7;
pub const MAX_PRECISION: u8 = 18;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("Symbol code must be 1 to {} uppercase letters", MAX_SYMBOL_CODE_LENGTH)]
    InvalidSymbolCode,
    #[error("Precision above the maximum of {}", MAX_PRECISION)]
    PrecisionTooLarge,
    #[error("Invalid asset format, expected '<amount> <symbol>'")]
    InvalidFormat,
    #[error("Invalid amount: {}", _0)]
    InvalidAmount(String),
}

/// Token symbol: precision in the low byte, up to 7 uppercase ASCII letters
/// in the bytes above it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Symbol(u64);

impl Symbol {
    pub fn new(precision: u8, code: &str) -> Result<Self, AssetError> {
        if precision > MAX_PRECISION {
            return Err(AssetError::PrecisionTooLarge);
        }
        let bytes = code.as_bytes();
        if bytes.is_empty() || bytes.len() > MAX_SYMBOL_CODE_LENGTH {
            return Err(AssetError::InvalidSymbolCode);
        }
        let mut value = precision as u64;
        for (i, &c) in bytes.iter().enumerate() {
            if !c.is_ascii_uppercase() {
                return Err(AssetError::InvalidSymbolCode);
            }
            value |= (c as u64) << (8 * (i + 1));
        }
        Ok(Symbol(value))
    }

    pub const fn from_u64(value: u64) -> Self {
        Symbol(value)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    pub const fn precision(&self) -> u8 {
        (self.0 & 0xff) as u8
    }

    pub fn code(&self) -> String {
        let mut code = String::with_capacity(MAX_SYMBOL_CODE_LENGTH);
        let mut value = self.0 >> 8;
        while value > 0 {
            code.push((value & 0xff) as u8 as char);
            value >>= 8;
        }
        code
    }

    // 10^precision, the sub-unit scale of one whole token
    pub fn unit(&self) -> i64 {
        10i64.pow(self.precision() as u32)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision(), self.code())
    }
}

impl FromStr for Symbol {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (precision, code) = s.split_once(',').ok_or(AssetError::InvalidFormat)?;
        let precision: u8 = precision.parse().map_err(|_| AssetError::InvalidFormat)?;
        Symbol::new(precision, code)
    }
}

impl Serializer for Symbol {
    fn write(&self, writer: &mut Writer) {
        writer.write_u64(self.0);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Symbol(reader.read_u64()?))
    }
}

/// A token amount in sub-units together with its symbol,
/// displayed the way the chain prints it: `"1.0000 TEST"`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Asset {
    pub amount: i64,
    pub symbol: Symbol,
}

impl Asset {
    pub const fn new(amount: i64, symbol: Symbol) -> Self {
        Asset { amount, symbol }
    }
}

impl Display for Asset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let unit = self.symbol.unit();
        let sign = if self.amount < 0 { "-" } else { "" };
        let magnitude = self.amount.unsigned_abs();
        let integral = magnitude / unit as u64;
        let precision = self.symbol.precision() as usize;
        if precision == 0 {
            write!(f, "{}{} {}", sign, integral, self.symbol.code())
        } else {
            let fractional = magnitude % unit as u64;
            write!(
                f,
                "{}{}.{:0width$} {}",
                sign,
                integral,
                fractional,
                self.symbol.code(),
                width = precision
            )
        }
    }
}

impl FromStr for Asset {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (amount_str, code) = s
            .trim()
            .split_once(' ')
            .ok_or(AssetError::InvalidFormat)?;
        let (negative, digits) = match amount_str.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, amount_str),
        };
        let (integral, fractional) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits, ""),
        };
        if integral.is_empty() || !integral.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AssetError::InvalidAmount(amount_str.to_string()));
        }
        if !fractional.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AssetError::InvalidAmount(amount_str.to_string()));
        }
        let precision = fractional.len();
        if precision > MAX_PRECISION as usize {
            return Err(AssetError::PrecisionTooLarge);
        }
        let symbol = Symbol::new(precision as u8, code)?;
        let combined = format!("{}{}", integral, fractional);
        let mut amount: i64 = combined
            .parse()
            .map_err(|_| AssetError::InvalidAmount(amount_str.to_string()))?;
        if negative {
            amount = -amount;
        }
        Ok(Asset { amount, symbol })
    }
}

impl Serialize for Asset {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Asset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Asset::from_str(&s).map_err(SerdeError::custom)
    }
}

impl Serializer for Asset {
    fn write(&self, writer: &mut Writer) {
        writer.write_i64(self.amount);
        self.symbol.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        let amount = reader.read_i64()?;
        let symbol = Symbol::read(reader)?;
        Ok(Asset { amount, symbol })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_symbol_value() {
        // "4,EOS" packs to the value every chain tool agrees on
        let symbol = Symbol::new(4, "EOS").unwrap();
        assert_eq!(symbol.as_u64(), 1397703940);
        assert_eq!(symbol.precision(), 4);
        assert_eq!(symbol.code(), "EOS");
    }

    #[test]
    fn test_symbol_parse_display() {
        let symbol: Symbol = "4,TEST".parse().unwrap();
        assert_eq!(symbol.to_string(), "4,TEST");
        assert!("4,test".parse::<Symbol>().is_err());
        assert!("4,TOOLONGXX".parse::<Symbol>().is_err());
        assert!("19,EOS".parse::<Symbol>().is_err());
    }

    #[test]
    fn test_asset_parse() {
        let asset: Asset = "1.0000 EOS".parse().unwrap();
        assert_eq!(asset.amount, 10000);
        assert_eq!(asset.symbol.precision(), 4);
        assert_eq!(asset.symbol.code(), "EOS");

        let asset: Asset = "-0.5000 EOS".parse().unwrap();
        assert_eq!(asset.amount, -5000);

        let asset: Asset = "100 WHOLE".parse().unwrap();
        assert_eq!(asset.amount, 100);
        assert_eq!(asset.symbol.precision(), 0);
    }

    #[test]
    fn test_asset_display() {
        let symbol = Symbol::new(4, "EOS").unwrap();
        assert_eq!(Asset::new(10000, symbol).to_string(), "1.0000 EOS");
        assert_eq!(Asset::new(123, symbol).to_string(), "0.0123 EOS");
        assert_eq!(Asset::new(-5000, symbol).to_string(), "-0.5000 EOS");

        let whole = Symbol::new(0, "WHOLE").unwrap();
        assert_eq!(Asset::new(7, whole).to_string(), "7 WHOLE");
    }

    #[test]
    fn test_asset_roundtrip() {
        for s in ["1.0000 EOS", "-12.345 ABC", "0.00000001 BTC", "42 NFT"] {
            let asset: Asset = s.parse().unwrap();
            assert_eq!(asset.to_string(), s);
            let decoded = Asset::from_bytes(&asset.to_bytes()).unwrap();
            assert_eq!(decoded, asset);
        }
    }

    #[test]
    fn test_asset_invalid() {
        assert!("1.0000".parse::<Asset>().is_err());
        assert!("1,0000 EOS".parse::<Asset>().is_err());
        assert!("abc EOS".parse::<Asset>().is_err());
        assert!(". EOS".parse::<Asset>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let asset: Asset = "1000000.0000 TEST".parse().unwrap();
        assert_eq!(
            serde_json::to_string(&asset).unwrap(),
            "\"1000000.0000 TEST\""
        );
        let parsed: Asset = serde_json::from_str("\"1000000.0000 TEST\"").unwrap();
        assert_eq!(parsed, asset);
    }
}
