//! Date-time helpers
//!
//! Date fields store ISO-8601 instants. The form edits them as local
//! `yyyy-MM-ddTHH:mm` strings (the `datetime-local` input format) and the
//! filter panel compares them as instants. Every helper has a `_in` variant
//! taking an explicit time zone; the plain variants use the local zone.

use chrono::{
    DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc,
};

/// Format of a `datetime-local` input value
pub const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Format used for table cells
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse an instant. Strings without an offset are read in `tz`.
pub fn parse_instant_in<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse an instant, reading offset-less strings as local time
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    parse_instant_in(value, &Local)
}

/// ISO instant -> `yyyy-MM-ddTHH:mm` in `tz`
pub fn to_datetime_local_in<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<String>
where
    Tz::Offset: std::fmt::Display,
{
    let instant = parse_instant_in(value, tz)?;
    Some(
        instant
            .with_timezone(tz)
            .format(DATETIME_LOCAL_FORMAT)
            .to_string(),
    )
}

/// ISO instant -> local `yyyy-MM-ddTHH:mm`
pub fn to_datetime_local(value: &str) -> Option<String> {
    to_datetime_local_in(value, &Local)
}

/// `yyyy-MM-ddTHH:mm` in `tz` -> ISO instant (UTC, millisecond precision)
pub fn from_datetime_local_in<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<String> {
    parse_instant_in(value, tz).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Local `yyyy-MM-ddTHH:mm` -> ISO instant
pub fn from_datetime_local(value: &str) -> Option<String> {
    from_datetime_local_in(value, &Local)
}

/// Cell text for a stored instant; unparseable values are shown as-is
pub fn display_instant_in<Tz: TimeZone>(value: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match parse_instant_in(value, tz) {
        Some(dt) => dt.with_timezone(tz).format(DISPLAY_FORMAT).to_string(),
        None => value.to_string(),
    }
}

pub fn display_instant(value: &str) -> String {
    display_instant_in(value, &Local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_instant_in("2024-03-01T10:30:00Z", &Utc).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-01T10:30:00+00:00");

        let offset = parse_instant_in("2024-03-01T12:30:00+02:00", &Utc).unwrap();
        assert_eq!(offset, dt);
    }

    #[test]
    fn test_parse_naive_uses_zone() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let dt = parse_instant_in("2024-03-01T12:30", &plus_two).unwrap();
        assert_eq!(dt, parse_instant_in("2024-03-01T10:30:00Z", &Utc).unwrap());

        let midnight = parse_instant_in("2024-03-01", &Utc).unwrap();
        assert_eq!(midnight.to_rfc3339(), "2024-03-01T00:00:00+00:00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_instant_in("", &Utc).is_none());
        assert!(parse_instant_in("yesterday", &Utc).is_none());
    }

    #[test]
    fn test_to_datetime_local() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            to_datetime_local_in("2024-03-01T10:30:45.123Z", &plus_two).as_deref(),
            Some("2024-03-01T12:30")
        );
    }

    #[test]
    fn test_from_datetime_local() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            from_datetime_local_in("2024-03-01T12:30", &plus_two).as_deref(),
            Some("2024-03-01T10:30:00.000Z")
        );
    }

    #[test]
    fn test_display_instant() {
        assert_eq!(
            display_instant_in("2024-03-01T10:30:00Z", &Utc),
            "2024-03-01 10:30"
        );
        assert_eq!(display_instant_in("not a date", &Utc), "not a date");
    }
}
