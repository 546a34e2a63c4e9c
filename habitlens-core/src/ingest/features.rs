//! Feature derivation
//!
//! Turns a [`HabitRecord`] into a [`DerivedRecord`]. Each derived field is
//! computed on its own, so a bad wake time never hides the weekday and a
//! bad date never hides the wake hour.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::types::{DerivedRecord, HabitRecord};

/// Date formats tried in order.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d", // 2024-01-15
    "%Y/%m/%d", // 2024/01/15
    "%m/%d/%y", // 01/15/24 (before %Y, which would read "24" as year 24)
    "%m/%d/%Y", // 01/15/2024
    "%m-%d-%Y", // 01-15-2024
    "%d.%m.%Y", // 15.01.2024
];

/// Datetime formats whose date part is used.
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a calendar date, returning `None` when no known format matches.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Parse an "HH:MM" wake-up time into minutes since midnight.
///
/// Returns `None` unless the string has exactly one colon, both parts are
/// unsigned integers, the hour is below 24 and the minute below 60.
pub fn parse_wake_minutes(raw: &str) -> Option<u32> {
    let mut parts = raw.split(':');
    let (hour, minute) = match (parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(m), None) => (h.trim(), m.trim()),
        _ => return None,
    };

    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    if hour >= 24 || minute >= 60 {
        return None;
    }
    Some(hour * 60 + minute)
}

/// Wake-up time as fractional hours, rounded to 2 decimals.
pub fn wake_hour(minutes: u32) -> f64 {
    (f64::from(minutes) / 60.0 * 100.0).round() / 100.0
}

/// Compute all derived fields for one record.
pub fn derive(record: HabitRecord) -> DerivedRecord {
    let wake_minutes = record.wake_time.as_deref().and_then(parse_wake_minutes);
    if wake_minutes.is_none() {
        if let Some(raw) = record.wake_time.as_deref() {
            tracing::warn!(wake_time = raw, "Unparseable wake-up time, wake fields left empty");
        }
    }

    DerivedRecord {
        wake_minutes,
        wake_hour: wake_minutes.map(wake_hour),
        weekday: record.date.map(|d| d.weekday()),
        water_liters: record.water_intake_ml.map(|ml| ml / 1000.0),
        record,
    }
}
