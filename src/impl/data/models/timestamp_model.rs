use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, SubsecRound as _, Utc};
use fractic_server_error::ServerError;
use serde::{Deserialize, Serialize};

use crate::errors::InvalidTimestamp;

/// RFC 3339 timestamp, as stored in record `created` / `updated` fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimestampModel(pub DateTime<Utc>);
impl FromStr for TimestampModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = DateTime::parse_from_rfc3339(s)
            .map_err(|e| InvalidTimestamp::with_debug(s, &e))?;
        Ok(TimestampModel(t.with_timezone(&Utc)))
    }
}
impl<'de> Deserialize<'de> for TimestampModel {
    fn deserialize<D>(deserializer: D) -> Result<TimestampModel, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TimestampModel::from_str(&s).map_err(serde::de::Error::custom)
    }
}
impl Serialize for TimestampModel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl TimestampModel {
    /// Current time at the precision that survives a round trip.
    pub(crate) fn now() -> Self {
        TimestampModel(Utc::now().trunc_subsecs(3))
    }
}
