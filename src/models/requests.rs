//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use std::fmt;

use chrono::Duration;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::duration::parse_duration;

/// Request body for the SET operation (POST /set)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: Any JSON; only strings, arrays and objects are accepted by the cache
/// - `ttl`: Time to live, nanoseconds or a duration string such as `"1h"`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetRequest {
    pub key: String,
    pub value: serde_json::Value,
    #[serde(default)]
    pub ttl: Ttl,
}

// == TTL Field ==
/// Signed time to live as carried on the wire.
///
/// Deserializes from a number of nanoseconds or from a duration string;
/// always serializes as nanoseconds. A missing field means zero, which
/// expires the entry immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ttl(pub Duration);

impl From<Duration> for Ttl {
    fn from(duration: Duration) -> Self {
        Ttl(duration)
    }
}

impl Serialize for Ttl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Durations beyond ~292 years saturate.
        let nanos = self.0.num_nanoseconds().unwrap_or(if self.0 < Duration::zero() {
            i64::MIN
        } else {
            i64::MAX
        });
        serializer.serialize_i64(nanos)
    }
}

impl<'de> Deserialize<'de> for Ttl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TtlVisitor)
    }
}

struct TtlVisitor;

impl<'de> Visitor<'de> for TtlVisitor {
    type Value = Ttl;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number of nanoseconds or a duration string")
    }

    fn visit_i64<E: de::Error>(self, nanos: i64) -> Result<Ttl, E> {
        Ok(Ttl(Duration::nanoseconds(nanos)))
    }

    fn visit_u64<E: de::Error>(self, nanos: u64) -> Result<Ttl, E> {
        let nanos = i64::try_from(nanos).unwrap_or(i64::MAX);
        Ok(Ttl(Duration::nanoseconds(nanos)))
    }

    fn visit_f64<E: de::Error>(self, nanos: f64) -> Result<Ttl, E> {
        // Saturating float-to-int conversion.
        Ok(Ttl(Duration::nanoseconds(nanos as i64)))
    }

    fn visit_str<E: de::Error>(self, raw: &str) -> Result<Ttl, E> {
        parse_duration(raw).map(Ttl).map_err(E::custom)
    }
}
