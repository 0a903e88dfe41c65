use chrono::{DateTime, NaiveDateTime, ParseResult, Utc};
use serde::Deserialize;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an ISO-8601 instant. Values without an offset are taken as UTC.
pub fn parse_instant(s: &str) -> ParseResult<DateTime<Utc>> {
    let s = s.trim();
    let rfc3339 = DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc));
    if rfc3339.is_ok() {
        return rfc3339;
    }

    let mut last = rfc3339;
    for format in NAIVE_FORMATS {
        match NaiveDateTime::parse_from_str(s, format) {
            Ok(naive) => return Ok(naive.and_utc()),
            Err(e) => last = Err(e),
        }
    }
    last
}

pub fn deserialize_instant<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_instant(&s).map_err(serde::de::Error::custom)
}
