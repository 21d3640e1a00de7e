//! Tagged union over recognized date source shapes.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One raw date value, as received from the persistence layer.
///
/// Decoding never fails: shapes outside the known set land in `Other` and
/// normalize to absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDateSource", into = "RawDateSource")]
pub enum DateSource {
    /// Plain calendar date.
    Calendar(NaiveDate),
    /// Point in time from a native date value or a date-producing accessor.
    Instant(DateTime<Utc>),
    /// Timestamp object exposing `seconds`/`nanoseconds` (or the `_`-prefixed pair).
    Seconds { seconds: i64, nanos: u32 },
    /// Numeric epoch milliseconds.
    EpochMillis(i64),
    /// Any textual encoding.
    Text(String),
    /// Unrecognized JSON shape.
    Other(serde_json::Value),
}

impl DateSource {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Calendar date shortcut; returns `Other(null)` for invalid fields.
    pub fn ymd(year: i32, month: u32, day: u32) -> Self {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self::Calendar)
            .unwrap_or(Self::Other(serde_json::Value::Null))
    }

    /// Milliseconds since the epoch, used for recency ordering.
    ///
    /// Textual values order as `0`, like other untimed records.
    pub fn epoch_millis(&self) -> i64 {
        match self {
            Self::Calendar(date) => date
                .and_hms_opt(0, 0, 0)
                .map(|value| value.and_utc().timestamp_millis())
                .unwrap_or(0),
            Self::Instant(instant) => instant.timestamp_millis(),
            Self::Seconds { seconds, nanos } => seconds
                .saturating_mul(1000)
                .saturating_add(i64::from(*nanos / 1_000_000)),
            Self::EpochMillis(millis) => *millis,
            Self::Text(_) | Self::Other(_) => 0,
        }
    }
}

impl From<NaiveDate> for DateSource {
    fn from(value: NaiveDate) -> Self {
        Self::Calendar(value)
    }
}

impl From<DateTime<Utc>> for DateSource {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Instant(value)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawDateSource {
    Timestamp {
        seconds: i64,
        #[serde(default)]
        nanoseconds: u32,
    },
    LegacyTimestamp {
        #[serde(rename = "_seconds")]
        seconds: i64,
        #[serde(rename = "_nanoseconds", default)]
        nanoseconds: u32,
    },
    Integer(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

impl From<RawDateSource> for DateSource {
    fn from(value: RawDateSource) -> Self {
        match value {
            RawDateSource::Timestamp {
                seconds,
                nanoseconds,
            }
            | RawDateSource::LegacyTimestamp {
                seconds,
                nanoseconds,
            } => Self::Seconds {
                seconds,
                nanos: nanoseconds,
            },
            RawDateSource::Integer(millis) => Self::EpochMillis(millis),
            RawDateSource::Float(millis) if millis.is_finite() => {
                Self::EpochMillis(millis.trunc() as i64)
            }
            RawDateSource::Float(millis) => Self::Other(serde_json::json!(millis)),
            RawDateSource::Text(text) => Self::Text(text),
            RawDateSource::Other(other) => Self::Other(other),
        }
    }
}

impl From<DateSource> for RawDateSource {
    fn from(value: DateSource) -> Self {
        match value {
            DateSource::Calendar(date) => Self::Text(date.format("%Y-%m-%d").to_string()),
            DateSource::Instant(instant) => {
                Self::Text(instant.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            DateSource::Seconds { seconds, nanos } => Self::Timestamp {
                seconds,
                nanoseconds: nanos,
            },
            DateSource::EpochMillis(millis) => Self::Integer(millis),
            DateSource::Text(text) => Self::Text(text),
            DateSource::Other(other) => Self::Other(other),
        }
    }
}
