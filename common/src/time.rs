use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
    time::{SystemTime, UNIX_EPOCH},
};

use chrono::{DateTime, NaiveDateTime};
use serde::{de::Error as SerdeError, Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::serializer::{Reader, ReaderError, Serializer, Writer};

// The node prints timestamps without a timezone suffix and with an optional
// fractional part, e.g. "2024-01-01T00:00:00.500"
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const TIME_FORMAT_PARSE: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("Invalid timestamp: {}", _0)]
    InvalidTimestamp(String),
    #[error("Timestamp is out of the representable range")]
    OutOfRange,
}

/// Seconds-precision UTC timestamp, the expiration type of a transaction
/// header.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct TimePointSec(u32);

impl TimePointSec {
    pub const fn from_unix_seconds(seconds: u32) -> Self {
        TimePointSec(seconds)
    }

    pub const fn as_unix_seconds(&self) -> u32 {
        self.0
    }

    // Non-deterministic, only for building expirations client side
    pub fn now() -> Self {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        TimePointSec(elapsed.as_secs() as u32)
    }

    pub fn plus_seconds(&self, seconds: u32) -> Self {
        TimePointSec(self.0.saturating_add(seconds))
    }
}

impl Display for TimePointSec {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match DateTime::from_timestamp(self.0 as i64, 0) {
            Some(datetime) => write!(f, "{}", datetime.format(TIME_FORMAT)),
            None => Err(fmt::Error),
        }
    }
}

impl FromStr for TimePointSec {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let datetime = NaiveDateTime::parse_from_str(s, TIME_FORMAT_PARSE)
            .map_err(|_| TimeError::InvalidTimestamp(s.to_string()))?;
        let seconds = datetime.and_utc().timestamp();
        u32::try_from(seconds)
            .map(TimePointSec)
            .map_err(|_| TimeError::OutOfRange)
    }
}

impl Serialize for TimePointSec {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimePointSec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(SerdeError::custom)
    }
}

impl Serializer for TimePointSec {
    fn write(&self, writer: &mut Writer) {
        writer.write_u32(self.0);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(TimePointSec(reader.read_u32()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let t = TimePointSec::from_unix_seconds(0);
        assert_eq!(t.to_string(), "1970-01-01T00:00:00");

        let t = TimePointSec::from_unix_seconds(1_700_000_000);
        assert_eq!(t.to_string(), "2023-11-14T22:13:20");
    }

    #[test]
    fn test_parse() {
        let t: TimePointSec = "2023-11-14T22:13:20".parse().unwrap();
        assert_eq!(t.as_unix_seconds(), 1_700_000_000);

        // Fractional part produced by the node is accepted and truncated
        let t: TimePointSec = "2023-11-14T22:13:20.500".parse().unwrap();
        assert_eq!(t.as_unix_seconds(), 1_700_000_000);

        assert!("not-a-timestamp".parse::<TimePointSec>().is_err());
    }

    #[test]
    fn test_roundtrip() {
        let t = TimePointSec::from_unix_seconds(1_700_000_000);
        let parsed: TimePointSec = t.to_string().parse().unwrap();
        assert_eq!(parsed, t);
        assert_eq!(TimePointSec::from_bytes(&t.to_bytes()).unwrap(), t);
    }

    #[test]
    fn test_plus_seconds() {
        let t = TimePointSec::from_unix_seconds(100);
        assert_eq!(t.plus_seconds(30).as_unix_seconds(), 130);
        assert_eq!(
            TimePointSec::from_unix_seconds(u32::MAX).plus_seconds(1),
            TimePointSec::from_unix_seconds(u32::MAX)
        );
    }

    #[test]
    fn test_serde() {
        let t = TimePointSec::from_unix_seconds(1_700_000_000);
        assert_eq!(
            serde_json::to_string(&t).unwrap(),
            "\"2023-11-14T22:13:20\""
        );
        let parsed: TimePointSec = serde_json::from_str("\"2023-11-14T22:13:20\"").unwrap();
        assert_eq!(parsed, t);
    }
}
