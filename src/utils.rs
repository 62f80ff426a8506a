use std::{fmt::Display, str::FromStr};

use chrono::{Days, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Deserializer, de};

use crate::{
    errors::TimelapseError,
    types::RunConfig,
};

/// Day Last.fm (then Audioscrobbler) started recording scrobbles.
pub const FIRST_SCROBBLE_DATE: (i32, u32, u32) = (2002, 3, 20);

/// Names longer than this are shortened before they become bar labels.
pub const MAX_NAME_LENGTH: usize = 30;

/// Shortens `name` to at most `max` characters worth of whole words plus `...`.
///
/// The cut keeps the first `max` characters and then drops everything after
/// the last space, so a word is never split. A head without any space
/// collapses to just the ellipsis.
pub fn truncate_name(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }

    let head: String = name.chars().take(max).collect();
    let mut words: Vec<&str> = head.split(' ').collect();
    words.pop();
    format!("{}...", words.join(" "))
}

/// Parses a `YYYY-MM-DD` date, ignoring surrounding whitespace.
///
/// # Errors
///
/// Returns [`TimelapseError::InvalidDate`] carrying the raw input when the
/// string is not a valid calendar date in that format.
///
/// # Example
///
/// ```
/// let date = parse_date("2024-02-29")?;
/// assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
pub fn parse_date(date: &str) -> Result<NaiveDate, TimelapseError> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|e| TimelapseError::InvalidDate {
        input: date.to_string(),
        reason: e.to_string(),
    })
}

fn local_timestamp(datetime: NaiveDateTime) -> i64 {
    match Local.from_local_datetime(&datetime).earliest() {
        Some(dt) => dt.timestamp(),
        None => datetime.and_utc().timestamp(),
    }
}

/// Converts a date range into the `(from, to)` Unix seconds sent to Last.fm.
///
/// Both bounds are local midnight at the start of their day, so scrobbles
/// made on `end` itself fall outside the window. A single-day range gives
/// `from == to`.
///
/// # Example
///
/// ```
/// let (from, to) = date_window(start, end);
/// assert!(from <= to);
/// ```
pub fn date_window(start: NaiveDate, end: NaiveDate) -> (i64, i64) {
    (
        local_timestamp(start.and_time(NaiveTime::MIN)),
        local_timestamp(end.and_time(NaiveTime::MIN)),
    )
}

/// Checks a run before anything is requested from the service.
pub fn validate_run(run: &RunConfig, today: NaiveDate) -> Result<(), TimelapseError> {
    if run.username.trim().is_empty() {
        return Err(TimelapseError::EmptyUsername);
    }

    let invalid = |reason: &str| TimelapseError::InvalidDateRange {
        start: run.start_date,
        end: run.end_date,
        reason: reason.to_string(),
    };

    if run.start_date > run.end_date {
        return Err(invalid("start date is after end date"));
    }

    let (year, month, day) = FIRST_SCROBBLE_DATE;
    if let Some(first) = NaiveDate::from_ymd_opt(year, month, day) {
        if run.start_date < first {
            return Err(invalid("start date is before Last.fm existed"));
        }
    }

    if run.end_date > today {
        return Err(invalid("end date is in the future"));
    }

    Ok(())
}

/// Share of the whole pipeline done after fetching `page` of `total_pages`.
///
/// Fetching is the first half of the work.
pub fn fetch_progress(page: u32, total_pages: u32) -> f64 {
    if total_pages == 0 {
        return 0.5;
    }
    (page as f64 / total_pages as f64).min(1.0) / 2.0
}

/// Title shown above the chart, e.g. `rj's scrobbles by albums`.
pub fn chart_title(run: &RunConfig) -> String {
    format!("{}'s scrobbles by {}", run.username, run.chart_type)
}

/// File name used when no output path is given.
///
/// # Returns
///
/// `{username}_{chart}_{start}_{end}.mp4`, dates formatted as `YYYY-MM-DD`.
pub fn default_output_name(run: &RunConfig) -> String {
    format!(
        "{user}_{chart}_{start}_{end}.mp4",
        user = run.username,
        chart = run.chart_type.as_str(),
        start = run.start_date.format("%Y-%m-%d"),
        end = run.end_date.format("%Y-%m-%d"),
    )
}

/// The last seven days up to and including `today`.
pub fn default_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let last_week = today.checked_sub_days(Days::new(7)).unwrap_or(today);
    (last_week, today)
}

/// Accepts `"42"` as well as `42`; Last.fm encodes most numbers as strings.
pub fn number_from_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Deserialize<'de>,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<N> {
        Number(N),
        Text(String),
    }

    match Raw::<T>::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse::<T>().map_err(de::Error::custom),
    }
}

/// Reads `date.uts`, which may arrive as a string or as a bare number.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

/// Last.fm returns a bare object instead of an array when a page holds one track.
pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<U> {
        Many(Vec<U>),
        One(U),
    }

    Ok(match OneOrMany::<T>::deserialize(deserializer)? {
        OneOrMany::Many(items) => items,
        OneOrMany::One(item) => vec![item],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecentTracksResponse;

    #[test]
    fn single_track_object_becomes_list() {
        let json = r##"{
            "recenttracks": {
                "track": {
                    "name": "Only One",
                    "artist": {"#text": "Solo"},
                    "album": {"#text": "Single"},
                    "date": {"uts": "1704067200", "#text": "01 Jan 2024, 00:00"}
                },
                "@attr": {"user": "rj", "page": "1", "totalPages": "1", "total": "1"}
            }
        }"##;

        let response: RecentTracksResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.recenttracks.track.len(), 1);
        assert_eq!(response.recenttracks.track[0].timestamp(), Some(1704067200));
        assert_eq!(response.recenttracks.attr.total_pages, 1);
    }

    #[test]
    fn numeric_attributes_accept_numbers_and_strings() {
        let json = r#"{
            "recenttracks": {
                "track": [],
                "@attr": {"page": 2, "totalPages": "7", "total": 1301}
            }
        }"#;

        let response: RecentTracksResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.recenttracks.attr.page, 2);
        assert_eq!(response.recenttracks.attr.total_pages, 7);
        assert_eq!(response.recenttracks.attr.total, 1301);
    }

    #[test]
    fn broken_number_is_rejected() {
        let json = r#"{"recenttracks": {"track": [], "@attr": {"page": "one", "totalPages": "1", "total": "0"}}}"#;
        assert!(serde_json::from_str::<RecentTracksResponse>(json).is_err());
    }

    #[test]
    fn fetch_progress_is_first_half() {
        assert_eq!(fetch_progress(1, 4), 0.125);
        assert_eq!(fetch_progress(4, 4), 0.5);
        assert_eq!(fetch_progress(1, 0), 0.5);
    }
}
