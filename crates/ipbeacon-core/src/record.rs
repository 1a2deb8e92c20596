//! The single persisted entity and its stored JSON form.
//!
//! Stored layout: `{"ip": "<ip>", "ts": "<RFC 3339 instant>"}`.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BeaconError, Result};

/// Default key of the one slot holding the latest record.
pub const SLOT_KEY: &str = "latest";

/// Most recently reported address and the instant it was accepted.
///
/// `ip` is opaque: it is never validated as an IPv4/IPv6 literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpRecord {
    pub ip: String,
    #[serde(rename = "ts", with = "iso_millis")]
    pub recorded_at: DateTime<Utc>,
}

impl IpRecord {
    pub fn new(ip: impl Into<String>, recorded_at: DateTime<Utc>) -> Self {
        Self {
            ip: ip.into(),
            recorded_at,
        }
    }

    /// Serialize into the stored representation.
    pub fn encode(&self) -> Result<Bytes> {
        serde_json::to_vec(self)
            .map(Bytes::from)
            .map_err(|e| BeaconError::Corrupt(format!("encode failed: {e}")))
    }

    /// Parse a stored value. Extra fields are ignored.
    pub fn decode(raw: &[u8]) -> Result<Self> {
        serde_json::from_slice(raw).map_err(|e| BeaconError::Corrupt(format!("decode failed: {e}")))
    }
}

/// `ts` is written as UTC with millisecond precision and a `Z` suffix, and
/// read back from any RFC 3339 instant.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|e| de::Error::custom(format!("invalid ts {raw:?}: {e}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn encode_writes_millisecond_utc_ts() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let raw = IpRecord::new("1.2.3.4", at).encode().unwrap();
        assert_eq!(
            std::str::from_utf8(&raw).unwrap(),
            r#"{"ip":"1.2.3.4","ts":"2024-01-01T12:00:00.000Z"}"#
        );
    }

    #[test]
    fn decode_normalizes_offset_to_utc() {
        let rec = IpRecord::decode(br#"{"ip":"::1","ts":"2024-01-01T17:30:00+05:30"}"#).unwrap();
        assert_eq!(rec.recorded_at, Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn empty_ip_survives() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let rec = IpRecord::new("", at);
        let back = IpRecord::decode(&rec.encode().unwrap()).unwrap();
        assert_eq!(back.ip, "");
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = IpRecord::decode(b"not json").unwrap_err();
        assert!(matches!(err, BeaconError::Corrupt(_)));

        let err = IpRecord::decode(br#"{"ip":"1.2.3.4","ts":"yesterday"}"#).unwrap_err();
        assert!(matches!(err, BeaconError::Corrupt(_)));
    }
}
