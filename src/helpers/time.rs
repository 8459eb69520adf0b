use chrono::{DateTime, SecondsFormat, Utc};
use tokio::time::Instant;

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn get_instant() -> Instant {
    Instant::now()
}

/// RFC 3339, UTC, whole seconds (`2022-05-12T15:56:45Z`).
pub fn to_rfc3339_utc(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}
