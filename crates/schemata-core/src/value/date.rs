use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

const NANOS_PER_MILLI: i128 = 1_000_000;

///
/// Date
///
/// Point in time as milliseconds since the Unix epoch, the wire
/// representation of `ValueKind::Date`.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct Date(i64);

impl Date {
    pub const EPOCH: Self = Self(0);

    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Current UTC time, truncated to milliseconds.
    #[must_use]
    pub fn now() -> Self {
        let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();

        Self(i64::try_from(nanos / NANOS_PER_MILLI).unwrap_or(i64::MAX))
    }

    /// Parse an RFC 3339 timestamp.
    pub fn parse_rfc3339(s: &str) -> Result<Self, time::error::Parse> {
        let parsed = OffsetDateTime::parse(s, &Rfc3339)?;

        Ok(Self(
            i64::try_from(parsed.unix_timestamp_nanos() / NANOS_PER_MILLI).unwrap_or(i64::MAX),
        ))
    }

    /// Render as RFC 3339, or `None` when outside the representable range.
    #[must_use]
    pub fn to_rfc3339(self) -> Option<String> {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(self.0) * NANOS_PER_MILLI)
            .ok()?
            .format(&Rfc3339)
            .ok()
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_rfc3339() {
            Some(text) => f.write_str(&text),
            None => write!(f, "{}ms", self.0),
        }
    }
}
