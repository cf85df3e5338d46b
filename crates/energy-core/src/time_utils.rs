use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

// ── Timestamp parsing ─────────────────────────────────────────────────────────

/// Accepted timestamp layouts, tried in order.
const FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Coerce a raw timestamp string to a calendar datetime.
///
/// Tries the layout list, then a bare date (interpreted as midnight), then
/// an RFC 3339 form with an explicit offset. All timestamps are treated as
/// already being in one canonical zone: a trailing `Z` is stripped and an
/// explicit offset keeps its wall-clock reading, never converted.
///
/// Returns `None` for empty strings and unrecognised layouts.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let raw = s.trim();
    if raw.is_empty() {
        return None;
    }

    let stripped = raw.strip_suffix('Z').unwrap_or(raw);
    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(stripped, fmt) {
            return Some(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(stripped, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    None
}

// ── Calendar-week bucketing ───────────────────────────────────────────────────

/// Monday-keyed calendar week bucket for `date`.
///
/// Weeks start on Monday; the bucket key is the Monday itself. This is the
/// canonical convention for the whole pipeline.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
