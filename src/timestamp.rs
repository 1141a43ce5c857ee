use chrono::{DateTime, Duration, FixedOffset, Utc};
use core::fmt;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Wire format for NTS dates: RFC 1123 with a numeric timezone offset,
/// e.g. `Mon, 02 Jan 2006 15:04:05 -0700`.
const FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Timestamp in Twilio's fixed date format.
///
/// Stores the offset exactly as received, so a value parsed from the wire
/// re-serializes to the same string. Comparisons are on the instant, not
/// the offset: `15:04:05 -0700` equals `22:04:05 +0000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    /// Create a timestamp from the current time (UTC offset).
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now().fixed_offset())
    }

    /// Parse a timestamp from the wire format.
    ///
    /// Anything that does not match the fixed format, including ISO 8601
    /// strings, fails with a parse error.
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_str(s, FORMAT).map(Self)
    }

    /// Convert to a UTC datetime.
    #[must_use]
    pub fn to_utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }

    /// Get the inner datetime with its original offset.
    #[must_use]
    pub fn inner(&self) -> DateTime<FixedOffset> {
        self.0
    }

    /// Shift forward by a number of seconds, saturating at chrono's range
    /// boundary instead of overflowing.
    #[must_use]
    pub(crate) fn add_seconds(self, secs: u32) -> Self {
        self.0
            .checked_add_signed(Duration::seconds(i64::from(secs)))
            .map_or(self, Self)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0.format(FORMAT))
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        /// Visitor that accepts only strings in the fixed wire format.
        struct TimestampVisitor;

        impl<'de> de::Visitor<'de> for TimestampVisitor {
            type Value = Timestamp;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an RFC 1123 date string with a numeric timezone offset")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Timestamp::parse(value)
                    .map_err(|err| E::custom(format!("invalid date {value:?}: {err}")))
            }
        }

        deserializer.deserialize_str(TimestampVisitor)
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self(dt)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.fixed_offset())
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.to_utc()
    }
}

impl From<Timestamp> for DateTime<FixedOffset> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}
