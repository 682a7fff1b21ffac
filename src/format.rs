//! Display formatting for activity and race statistics
//!
//! Missing values render as `-`. Durations are rounded to whole seconds
//! before being split, so a value never shows `:60`.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Placeholder shown for missing values
pub const MISSING: &str = "-";

/// Meters as kilometers with at most one decimal: `10234.0` -> `"10.2"`, `5000.0` -> `"5"`
pub fn meters_to_km(meters: Option<f64>) -> String {
    match meters {
        Some(m) if m.is_finite() => one_decimal(m / 1000.0),
        _ => MISSING.to_string(),
    }
}

/// Seconds as `h:mm:ss`, or `m:ss` under an hour
pub fn seconds_to_hms(seconds: Option<f64>) -> String {
    let Some(total) = whole_seconds(seconds) else {
        return MISSING.to_string();
    };
    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

/// Seconds as `m:ss`, minutes not wrapped into hours
pub fn minutes_seconds(seconds: Option<f64>) -> String {
    match whole_seconds(seconds) {
        Some(total) => format!("{}:{:02}", total / 60, total % 60),
        None => MISSING.to_string(),
    }
}

/// Elevation gain rounded to whole meters
pub fn elevation(meters: Option<f64>) -> String {
    match meters {
        Some(m) if m.is_finite() => format!("{} m", m.round()),
        _ => MISSING.to_string(),
    }
}

/// Average pace as `m:ss/km`
///
/// Needs a positive distance and a non-zero moving time.
pub fn pace_per_km(distance_m: Option<f64>, moving_time_s: Option<f64>) -> String {
    match (distance_m, moving_time_s) {
        (Some(d), Some(t)) if d > 0.0 && t != 0.0 && t.is_finite() => {
            let per_km = t / (d / 1000.0);
            format!("{}/km", minutes_seconds(Some(per_km)))
        }
        _ => MISSING.to_string(),
    }
}

/// Average speed as `x.x km/h`
pub fn speed_kmh(distance_m: Option<f64>, moving_time_s: Option<f64>) -> String {
    match (distance_m, moving_time_s) {
        (Some(d), Some(t)) if d > 0.0 && t != 0.0 && t.is_finite() => {
            let kmh = (d / 1000.0) / (t / 3600.0);
            format!("{} km/h", one_decimal(kmh))
        }
        _ => MISSING.to_string(),
    }
}

/// English ordinal: `1st`, `2nd`, `3rd`, `11th`, `22nd`
pub fn ordinal(n: Option<i64>) -> String {
    let Some(n) = n else {
        return MISSING.to_string();
    };
    let v = n.unsigned_abs();
    let suffix = match (v % 10, v % 100) {
        (1, k) if k != 11 => "st",
        (2, k) if k != 12 => "nd",
        (3, k) if k != 13 => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// How long ago something ended, in the coarsest unit that fits
///
/// Under a minute reads `Just now`. Then minutes, hours under a day, days
/// under 30, months under 12, and years; each count is rounded. A count of
/// one reads `yesterday`, `last month`, or `last year` where English has a
/// word for it.
pub fn relative_time(ended: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed_ms = (now - ended).num_milliseconds() as f64;
    let minutes = (elapsed_ms / 60_000.0).round().max(0.0) as i64;
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return ago(minutes, "minute", None);
    }
    let hours = round_div(minutes, 60);
    if hours < 24 {
        return ago(hours, "hour", None);
    }
    let days = round_div(hours, 24);
    if days < 30 {
        return ago(days, "day", Some("yesterday"));
    }
    let months = round_div(days, 30);
    if months < 12 {
        return ago(months, "month", Some("last month"));
    }
    let years = round_div(months, 12);
    ago(years, "year", Some("last year"))
}

/// Parse an ISO 8601 timestamp; one without a UTC offset is read as UTC
pub fn parse_timestamp(iso: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn ago(count: i64, unit: &str, single: Option<&str>) -> String {
    match (count, single) {
        (1, Some(word)) => word.to_string(),
        (1, None) => format!("1 {} ago", unit),
        _ => format!("{} {}s ago", count, unit),
    }
}

/// `a / b` rounded half up
fn round_div(a: i64, b: i64) -> i64 {
    (a as f64 / b as f64).round() as i64
}

fn whole_seconds(seconds: Option<f64>) -> Option<u64> {
    match seconds {
        Some(s) if s.is_finite() && s >= 0.0 => Some(s.round() as u64),
        _ => None,
    }
}

/// Round to one decimal and print without a trailing `.0`
fn one_decimal(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    format!("{}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_meters_to_km() {
        assert_eq!(meters_to_km(Some(10234.0)), "10.2");
        assert_eq!(meters_to_km(Some(5000.0)), "5");
        assert_eq!(meters_to_km(Some(0.0)), "0");
        assert_eq!(meters_to_km(None), "-");
    }

    #[test]
    fn test_seconds_to_hms() {
        assert_eq!(seconds_to_hms(Some(3725.0)), "1:02:05");
        assert_eq!(seconds_to_hms(Some(605.0)), "10:05");
        assert_eq!(seconds_to_hms(Some(0.0)), "0:00");
        assert_eq!(seconds_to_hms(Some(59.6)), "1:00");
        assert_eq!(seconds_to_hms(None), "-");
    }

    #[test]
    fn test_minutes_seconds() {
        assert_eq!(minutes_seconds(Some(4000.0)), "66:40");
        assert_eq!(minutes_seconds(Some(61.0)), "1:01");
    }

    #[test]
    fn test_elevation() {
        assert_eq!(elevation(Some(123.6)), "124 m");
        assert_eq!(elevation(Some(0.0)), "0 m");
        assert_eq!(elevation(None), "-");
    }

    #[test]
    fn test_pace_per_km() {
        // 10 km in 45:00
        assert_eq!(pace_per_km(Some(10_000.0), Some(2700.0)), "4:30/km");
        assert_eq!(pace_per_km(Some(5000.0), Some(1234.0)), "4:07/km");
        assert_eq!(pace_per_km(Some(0.0), Some(1234.0)), "-");
        assert_eq!(pace_per_km(Some(5000.0), Some(0.0)), "-");
        assert_eq!(pace_per_km(None, Some(1234.0)), "-");
    }

    #[test]
    fn test_speed_kmh() {
        assert_eq!(speed_kmh(Some(30_000.0), Some(3600.0)), "30 km/h");
        assert_eq!(speed_kmh(Some(10_000.0), Some(2700.0)), "13.3 km/h");
        assert_eq!(speed_kmh(Some(10_000.0), None), "-");
    }

    #[test]
    fn test_ordinal() {
        let cases = [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (102, "102nd"),
            (111, "111th"),
            (0, "0th"),
        ];
        for (n, expected) in cases {
            assert_eq!(ordinal(Some(n)), expected);
        }
        assert_eq!(ordinal(None), "-");
    }

    #[test]
    fn test_relative_time_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let at = |d: Duration| relative_time(now - d, now);

        assert_eq!(at(Duration::seconds(20)), "Just now");
        assert_eq!(at(Duration::seconds(-300)), "Just now");
        assert_eq!(at(Duration::minutes(1)), "1 minute ago");
        assert_eq!(at(Duration::minutes(45)), "45 minutes ago");
        assert_eq!(at(Duration::minutes(60)), "1 hour ago");
        assert_eq!(at(Duration::hours(5)), "5 hours ago");
        assert_eq!(at(Duration::hours(30)), "yesterday");
        assert_eq!(at(Duration::days(3)), "3 days ago");
        assert_eq!(at(Duration::days(35)), "last month");
        assert_eq!(at(Duration::days(100)), "3 months ago");
        assert_eq!(at(Duration::days(400)), "last year");
        assert_eq!(at(Duration::days(365 * 3)), "3 years ago");
    }

    #[test]
    fn test_parse_timestamp() {
        let expected = Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-06-15T10:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-06-15T12:00:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-06-15T12:00:00+0200"), Some(expected));
        assert_eq!(parse_timestamp("2024-06-15T10:00:00"), Some(expected));
        assert_eq!(parse_timestamp("last tuesday"), None);
    }
}
