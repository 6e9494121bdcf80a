//! Provider-agnostic normalization rules: the icon lookup table and
//! timestamp-to-weekday formatting shared by every provider variant.

use chrono::{DateTime, Local, Utc};

use crate::error::{Error, Result};

/// Map a textual icon code to the widget's image file name.
///
/// The table is closed and case-sensitive; anything unrecognized (including
/// the empty string or a differently-cased code) falls back to `3200.png`.
pub fn icon_file(code: &str) -> &'static str {
    match code {
        "clear-day" => "32.png",
        "clear-night" => "31.png",
        "rain" => "12.png",
        "snow" => "14.png",
        "sleet" => "14.png",
        "wind" => "24.png",
        "fog" => "24.png",
        "cloudy" => "28.png",
        "partly-cloudy-day" => "30.png",
        "partly-cloudy-night" => "29.png",
        _ => "3200.png",
    }
}

/// Full English weekday name ("Monday" .. "Sunday") for a Unix timestamp,
/// evaluated in the local timezone.
pub fn weekday_name(timestamp: i64) -> Result<String> {
    Ok(local_datetime(timestamp)?.format("%A").to_string())
}

pub(crate) fn local_datetime(timestamp: i64) -> Result<DateTime<Local>> {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .map(|dt| dt.with_timezone(&Local))
        .ok_or_else(|| Error::Parse(format!("timestamp {timestamp} is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_table_matches_widget_assets() {
        assert_eq!(icon_file("clear-day"), "32.png");
        assert_eq!(icon_file("clear-night"), "31.png");
        assert_eq!(icon_file("rain"), "12.png");
        assert_eq!(icon_file("snow"), "14.png");
        assert_eq!(icon_file("sleet"), "14.png");
        assert_eq!(icon_file("wind"), "24.png");
        assert_eq!(icon_file("fog"), "24.png");
        assert_eq!(icon_file("cloudy"), "28.png");
        assert_eq!(icon_file("partly-cloudy-day"), "30.png");
        assert_eq!(icon_file("partly-cloudy-night"), "29.png");
    }

    #[test]
    fn unknown_icons_fall_back() {
        assert_eq!(icon_file("hail"), "3200.png");
        assert_eq!(icon_file(""), "3200.png");
        // lookup is case-sensitive, no normalization
        assert_eq!(icon_file("Rain"), "3200.png");
        assert_eq!(icon_file("CLEAR-DAY"), "3200.png");
    }

    #[test]
    fn weekday_name_is_a_weekday_and_deterministic() {
        const WEEKDAYS: [&str; 7] = [
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
            "Sunday",
        ];

        // 2021-03-08 12:00 UTC, midday so the local date matches UTC's in
        // any offset the test host is likely to run under.
        let ts = 1_615_204_800;
        let name = weekday_name(ts).unwrap();
        assert!(WEEKDAYS.contains(&name.as_str()), "got {name}");
        assert_eq!(name, weekday_name(ts).unwrap());
    }

    #[test]
    fn consecutive_days_advance_the_weekday() {
        let ts = 1_615_204_800;
        let a = weekday_name(ts).unwrap();
        let b = weekday_name(ts + 86_400).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn out_of_range_timestamp_is_a_parse_error() {
        let err = weekday_name(i64::MAX).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
