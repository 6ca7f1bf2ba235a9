//! Wire timestamp format (`yyyy-MM-ddTHH:mm:ss.SSS`, no zone).
//!
//! Millisecond values are written as exactly three fraction digits. Finer values
//! keep their full precision so a card decodes back to the value it was built with.
//!
//! Use with `#[serde(with = "timestamp")]` or `#[serde(with = "timestamp::option")]`.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serializer};

/// Format used when encoding millisecond-aligned values.
pub const ENCODE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";
/// Format used when encoding values with sub-millisecond digits.
pub const ENCODE_FORMAT_FINE: &str = "%Y-%m-%dT%H:%M:%S%.f";
/// Format used when decoding (fraction optional, any precision).
pub const DECODE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub fn format(ts: &NaiveDateTime) -> String {
    if ts.nanosecond() % 1_000_000 == 0 {
        ts.format(ENCODE_FORMAT).to_string()
    } else {
        ts.format(ENCODE_FORMAT_FINE).to_string()
    }
}

pub fn parse(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, DECODE_FORMAT)
}

pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format(ts))
}

pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(d)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

pub mod option {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &Option<NaiveDateTime>, s: S) -> Result<S::Ok, S::Error> {
        match ts {
            Some(ts) => s.serialize_str(&super::format(ts)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(raw) => super::parse(&raw).map(Some).map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}
