//! # Temporal Types — UTC-Only Timestamps
//!
//! Defines `Timestamp`, a UTC-only timestamp truncated to seconds precision.
//!
//! ## Invariant
//!
//! Timestamps in the stack must be UTC with Z suffix for deterministic
//! canonicalization: a local-offset rendering of the same instant would
//! change the canonical bytes of a signed payload. Non-UTC inputs are
//! rejected at parse, not silently converted.
//!
//! On-chain records carry unix seconds (the original ledger stored a
//! `uint256` block timestamp); `as_unix()`/`from_unix()` bridge the two
//! representations without losing the UTC invariant.

use chrono::{DateTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A UTC-only timestamp, truncated to seconds precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// From a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// From unix seconds.
    ///
    /// # Errors
    ///
    /// Rejects values outside chrono's representable range.
    pub fn from_unix(secs: i64) -> Result<Self, ValidationError> {
        match Utc.timestamp_opt(secs, 0) {
            chrono::LocalResult::Single(dt) => Ok(Self(dt)),
            _ => Err(ValidationError::invalid(
                "timestamp",
                format!("unix seconds out of range: {secs}"),
            )),
        }
    }

    /// The timestamp as unix seconds.
    pub fn as_unix(&self) -> i64 {
        self.0.timestamp()
    }

    /// Parse from an RFC 3339 string, accepting only the `Z` suffix.
    ///
    /// Offsets like `+00:00` are rejected even though they denote the same
    /// instant — only one rendering may exist in canonical payloads.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if !s.ends_with('Z') {
            return Err(ValidationError::invalid(
                "timestamp",
                format!("must use Z suffix (UTC only), got {s:?}"),
            ));
        }
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| {
            ValidationError::invalid("timestamp", format!("invalid RFC 3339 {s:?}: {e}"))
        })?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Render as `YYYY-MM-DDTHH:MM:SSZ`.
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    /// The underlying `DateTime<Utc>`.
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_z_suffix() {
        let ts = Timestamp::parse("2026-02-19T12:00:00Z").unwrap();
        assert_eq!(ts.to_iso8601(), "2026-02-19T12:00:00Z");
    }

    #[test]
    fn parse_rejects_offsets() {
        assert!(Timestamp::parse("2026-02-19T12:00:00+00:00").is_err());
        assert!(Timestamp::parse("2026-02-19T12:00:00+05:30").is_err());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Timestamp::parse("not a timestamp Z").is_err());
    }

    #[test]
    fn unix_roundtrip() {
        let ts = Timestamp::parse("2026-02-19T12:00:00Z").unwrap();
        let back = Timestamp::from_unix(ts.as_unix()).unwrap();
        assert_eq!(ts, back);
    }

    #[test]
    fn now_has_no_subseconds() {
        let ts = Timestamp::now();
        assert_eq!(ts.as_datetime().nanosecond(), 0);
    }

    #[test]
    fn subseconds_truncated_on_parse() {
        let ts = Timestamp::parse("2026-02-19T12:00:00.999Z").unwrap();
        assert_eq!(ts.to_iso8601(), "2026-02-19T12:00:00Z");
    }

    #[test]
    fn from_unix_rejects_out_of_range() {
        assert!(Timestamp::from_unix(i64::MAX).is_err());
    }
}
