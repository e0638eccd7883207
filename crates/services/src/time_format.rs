//! Display formatting for backend timestamps.
//!
//! The backend sends either RFC 3339 strings or offset-less ISO-8601 local
//! times. Offset-less values are read as UTC.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}

/// `YYYY.MM.DD HH:MM`, or the input unchanged when it does not parse.
pub fn format_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%Y.%m.%d %H:%M").to_string(),
        None => raw.to_string(),
    }
}

/// Relative age ("5 minutes ago"); past 30 days, the plain date.
pub fn format_time_ago(raw: &str, now: DateTime<Utc>) -> String {
    let Some(dt) = parse_timestamp(raw) else {
        return raw.to_string();
    };
    let secs = (now - dt.with_timezone(&Utc)).num_seconds().max(0);

    if secs > 30 * DAY {
        dt.format("%Y.%m.%d").to_string()
    } else if secs > DAY {
        ago(secs / DAY, "day")
    } else if secs > HOUR {
        ago(secs / HOUR, "hour")
    } else if secs > MINUTE {
        ago(secs / MINUTE, "minute")
    } else {
        ago(secs, "second")
    }
}

fn ago(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn formats_naive_and_offset_timestamps() {
        assert_eq!(format_timestamp("2024-05-01T09:30:00"), "2024.05.01 09:30");
        assert_eq!(format_timestamp("2024-05-01T09:30:00.123456"), "2024.05.01 09:30");
        assert_eq!(format_timestamp("2024-05-01T09:30:00+09:00"), "2024.05.01 09:30");
    }

    #[test]
    fn unparseable_timestamp_is_shown_verbatim() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
        assert_eq!(format_time_ago("yesterday", now()), "yesterday");
    }

    #[test]
    fn time_ago_picks_the_largest_unit() {
        assert_eq!(format_time_ago("2024-05-10T11:59:30", now()), "30 seconds ago");
        assert_eq!(format_time_ago("2024-05-10T11:55:00", now()), "5 minutes ago");
        assert_eq!(format_time_ago("2024-05-10T09:00:00", now()), "3 hours ago");
        assert_eq!(format_time_ago("2024-05-08T12:00:00", now()), "2 days ago");
        assert_eq!(format_time_ago("2024-03-01T12:00:00", now()), "2024.03.01");
    }

    #[test]
    fn boundaries_round_down_to_the_smaller_unit() {
        // exactly one hour is still counted in minutes
        assert_eq!(format_time_ago("2024-05-10T11:00:00", now()), "60 minutes ago");
        assert_eq!(format_time_ago("2024-05-10T10:00:00", now()), "2 hours ago");
    }

    #[test]
    fn future_timestamps_clamp_to_zero() {
        assert_eq!(format_time_ago("2024-05-10T12:10:00", now()), "0 seconds ago");
    }
}
