//! Date parsing and XML-schema formatting in the site timezone.
//!
//! Front matter dates come in many shapes. Accepted forms:
//!
//! - `2024-06-15` (midnight in the site timezone)
//! - `2024-06-15 14:30`, `2024-06-15 14:30:45`, `2024-06-15T14:30:45`
//! - any of the above followed by an offset: `2024-06-15 14:30:45 -0500`
//! - RFC 3339 (`2024-06-15T14:30:45Z`) and RFC 2822
//!
//! Values without an offset are interpreted in the configured IANA timezone
//! (UTC when unset or unknown). Values with an offset keep it.
//!
//! # Examples
//!
//! ```ignore
//! let s = to_xmlschema("2017-01-01", Some("America/New_York"));
//! assert_eq!(s.as_deref(), Some("2017-01-01T00:00:00-05:00"));
//! ```

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Output format, e.g. `2017-01-01T00:00:00-05:00`.
const XMLSCHEMA_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

const OFFSET_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%d %H:%M:%S %:z",
    "%Y-%m-%d %H:%M %z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Format `input` as an XML-schema timestamp.
///
/// Returns `None` when `input` is not a recognizable date.
pub fn to_xmlschema(input: &str, timezone: Option<&str>) -> Option<String> {
    parse_datetime(input, timezone).map(|dt| dt.format(XMLSCHEMA_FORMAT).to_string())
}

/// Parse a front matter date, resolving naive values in `timezone`.
pub fn parse_datetime(input: &str, timezone: Option<&str>) -> Option<DateTime<FixedOffset>> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt);
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    Some(localize(&naive, timezone))
}

/// Check whether `name` is a known IANA timezone.
pub fn is_known_timezone(name: &str) -> bool {
    name.parse::<Tz>().is_ok()
}

/// Attach the offset of `timezone` to a wall-clock time.
fn localize(naive: &NaiveDateTime, timezone: Option<&str>) -> DateTime<FixedOffset> {
    let Some(tz) = timezone.and_then(|name| name.parse::<Tz>().ok()) else {
        return Utc.from_utc_datetime(naive).fixed_offset();
    };

    // Ambiguous times take the earlier offset; skipped times (DST gaps)
    // are read as UTC and shifted into the zone.
    match tz.from_local_datetime(naive).earliest() {
        Some(dt) => dt.fixed_offset(),
        None => tz.from_utc_datetime(naive).fixed_offset(),
    }
}
