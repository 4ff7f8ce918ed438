//! UTC timestamps with second precision.
//!
//! Every instant that crosses the store or the request surface is written as
//! `YYYY-MM-DDTHH:MM:SSZ`. The fixed width keeps lexical order equal to
//! chronological order, which the history range scan relies on. Inputs with
//! an offset are converted to UTC and fractional seconds are truncated.

use super::error::{HoursError, Result};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, Utc};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Years that format as exactly four digits. Outside of them `%Y` gains a
/// sign and stored values stop sorting chronologically.
pub const MIN_YEAR: i32 = 0;
pub const MAX_YEAR: i32 = 9999;

/// Current time, truncated to whole seconds.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

pub fn format(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses an ISO-8601 timestamp.
///
/// Accepts RFC 3339 values with any offset, and naive `YYYY-MM-DDTHH:MM:SS`
/// (or with a space separator) which is taken to be UTC already.
pub fn parse(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();
    let parsed = match DateTime::parse_from_rfc3339(value) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(_) => ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
            .map(|naive| naive.and_utc()),
    };
    match parsed {
        Some(ts) if in_range(ts.year()) => Ok(ts.trunc_subsecs(0)),
        _ => Err(HoursError::InvalidTimestamp(value.to_string())),
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| HoursError::InvalidInput(format!("invalid date '{}', expected YYYY-MM-DD", value)))?;
    check_date(date)
}

fn in_range(year: i32) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year)
}

/// Rejects instants whose year cannot be stored.
pub fn check(ts: DateTime<Utc>) -> Result<DateTime<Utc>> {
    if in_range(ts.year()) {
        Ok(ts)
    } else {
        Err(HoursError::InvalidTimestamp(ts.to_rfc3339()))
    }
}

/// Rejects dates outside the storable years.
pub fn check_date(date: NaiveDate) -> Result<NaiveDate> {
    if in_range(date.year()) {
        Ok(date)
    } else {
        Err(HoursError::InvalidInput(format!("date {} is outside the years {:04}-{:04}", date, MIN_YEAR, MAX_YEAR)))
    }
}

/// 00:00:00 UTC of the given day.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::default()).and_utc()
}

/// 23:59:59 UTC of the given day.
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date) + Duration::seconds(86_399)
}

/// Whole seconds between two instants, floored. Negative spans count as zero.
pub fn seconds_between(start: &DateTime<Utc>, end: &DateTime<Utc>) -> u64 {
    (*end - *start).num_seconds().max(0) as u64
}

/// Serde adapter for `DateTime<Utc>` fields in the wire format.
pub mod serde_utc {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let value = String::deserialize(deserializer)?;
        super::parse(&value).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for optional timestamps. `null`, a missing field and an
/// empty string all mean "no value".
pub mod serde_utc_opt {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error> {
        match ts {
            Some(ts) => serializer.serialize_str(&super::format(ts)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(value) if !value.trim().is_empty() => super::parse(&value).map(Some).map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_truncates_fractional_seconds() {
        let ts = parse("2024-01-01T08:00:00.999Z").unwrap();
        assert_eq!(format(&ts), "2024-01-01T08:00:00Z");
    }

    #[test]
    fn parse_converts_offsets_to_utc() {
        let ts = parse("2024-01-01T10:30:15+02:00").unwrap();
        assert_eq!(format(&ts), "2024-01-01T08:30:15Z");
    }

    #[test]
    fn parse_accepts_naive_values_as_utc() {
        let ts = parse("2024-03-05 23:59:01").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 5, 23, 59, 1).unwrap());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(parse("yesterday"), Err(HoursError::InvalidTimestamp(_))));
    }

    #[test]
    fn parse_rejects_unsortable_years() {
        assert!(matches!(parse("+10000-01-01T00:00:00Z"), Err(HoursError::InvalidTimestamp(_))));
        assert!(matches!(parse("+10000-01-01T00:00:00"), Err(HoursError::InvalidTimestamp(_))));
        assert!(matches!(parse_date("+10000-01-01"), Err(HoursError::InvalidInput(_))));
        assert_eq!(format(&parse("9999-12-31T23:59:59Z").unwrap()), "9999-12-31T23:59:59Z");
    }

    #[test]
    fn check_bounds_years() {
        let far = NaiveDate::from_ymd_opt(10_000, 1, 1).unwrap();
        assert!(check_date(far).is_err());
        assert!(check(start_of_day(far)).is_err());
        assert!(check_date(NaiveDate::from_ymd_opt(-1, 12, 31).unwrap()).is_err());
        assert!(check_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).is_ok());
    }

    #[test]
    fn day_bounds_are_inclusive() {
        let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(format(&start_of_day(day)), "2024-02-29T00:00:00Z");
        assert_eq!(format(&end_of_day(day)), "2024-02-29T23:59:59Z");
    }

    #[test]
    fn seconds_between_floors_and_clamps() {
        let a = parse("2024-01-01T09:00:00Z").unwrap();
        let b = parse("2024-01-01T10:30:00Z").unwrap();
        assert_eq!(seconds_between(&a, &b), 5400);
        assert_eq!(seconds_between(&b, &a), 0);
    }
}
