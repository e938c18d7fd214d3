// Module name shadows the `serde` crate; use `::serde` for the external crate.
use ::serde::{Deserialize, Deserializer, Serializer, de::Error as _};
use chrono::{NaiveDateTime, NaiveTime};

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const TIME_FORMAT: &str = "%H:%M";

/// Serialize a local `NaiveDateTime` as `YYYY-MM-DDTHH:MM:SS` (no offset, no fraction).
pub fn to_local_seconds<S>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.format(DATETIME_FORMAT).to_string())
}

/// Serialize a time of day as `HH:MM`.
pub fn to_hh_mm<S>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&t.format(TIME_FORMAT).to_string())
}

/// Parse a time of day written as `HH:MM` or `HH:MM:SS`.
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, TIME_FORMAT))
        .ok()
}

/// Deserialize a time of day accepting both `HH:MM` and `HH:MM:SS`.
pub fn time_of_day<'de, D>(d: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(d)?;
    parse_time_of_day(&raw)
        .ok_or_else(|| D::Error::custom(format!("invalid time of day '{raw}', expected HH:MM")))
}
