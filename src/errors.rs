use std::{fmt, io};

use chrono::NaiveDate;

/// Every way a timelapse run can fail.
///
/// All variants are terminal: the run stops and nothing partial is kept.
#[derive(Debug)]
pub enum TimelapseError {
    /// The username was empty or only whitespace.
    EmptyUsername,
    /// A date argument is not in `YYYY-MM-DD` form.
    InvalidDate { input: String, reason: String },
    /// The requested date range cannot be processed.
    InvalidDateRange {
        start: NaiveDate,
        end: NaiveDate,
        reason: String,
    },
    /// The service answered with a non-success status.
    RemoteRequestFailed { status: u16, body: String },
    /// The service reported more scrobbles than the pipeline accepts.
    VolumeExceeded { total: u64, limit: u64 },
    /// No scrobble with a usable timestamp fell into the range.
    NoDataInRange,
    /// A payload did not have the expected shape.
    MalformedResponse(String),
    /// A required configuration value is missing.
    MissingConfig(String),
    /// The external renderer could not produce a video.
    Render(String),
    Http(reqwest::Error),
    Io(io::Error),
    Serde(serde_json::Error),
    Csv(csv::Error),
}

impl fmt::Display for TimelapseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimelapseError::EmptyUsername => write!(f, "Username must not be empty"),
            TimelapseError::InvalidDate { input, reason } => {
                write!(f, "Invalid date '{}' (expected YYYY-MM-DD): {}", input, reason)
            }
            TimelapseError::InvalidDateRange { start, end, reason } => {
                write!(f, "Invalid date range {} - {}: {}", start, end, reason)
            }
            TimelapseError::RemoteRequestFailed { status, body } => {
                write!(f, "Last.fm request failed with status {}: {}", status, body)
            }
            TimelapseError::VolumeExceeded { total, limit } => {
                write!(f, "Too many scrobbles to process ({}/{})", total, limit)
            }
            TimelapseError::NoDataInRange => {
                write!(f, "No scrobbles found in the selected date range")
            }
            TimelapseError::MalformedResponse(msg) => write!(f, "Malformed response: {}", msg),
            TimelapseError::MissingConfig(key) => write!(f, "{} must be set", key),
            TimelapseError::Render(msg) => write!(f, "Rendering failed: {}", msg),
            TimelapseError::Http(e) => write!(f, "HTTP error: {}", e),
            TimelapseError::Io(e) => write!(f, "I/O error: {}", e),
            TimelapseError::Serde(e) => write!(f, "JSON error: {}", e),
            TimelapseError::Csv(e) => write!(f, "CSV error: {}", e),
        }
    }
}

impl std::error::Error for TimelapseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TimelapseError::Http(e) => Some(e),
            TimelapseError::Io(e) => Some(e),
            TimelapseError::Serde(e) => Some(e),
            TimelapseError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TimelapseError {
    fn from(err: reqwest::Error) -> Self {
        TimelapseError::Http(err)
    }
}

impl From<io::Error> for TimelapseError {
    fn from(err: io::Error) -> Self {
        TimelapseError::Io(err)
    }
}

impl From<serde_json::Error> for TimelapseError {
    fn from(err: serde_json::Error) -> Self {
        TimelapseError::Serde(err)
    }
}

impl From<csv::Error> for TimelapseError {
    fn from(err: csv::Error) -> Self {
        TimelapseError::Csv(err)
    }
}
