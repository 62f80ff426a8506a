//! Configuration management for the Last.fm timelapse generator.
//!
//! Settings come from environment variables, optionally seeded from a `.env`
//! file in the local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)
//!
//! The parameters of a single run (user, dates, chart type) can also be kept
//! in a JSON file, see [`RunConfigFile`].

use std::{
    env,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{errors::TimelapseError, types::ChartType};

pub const DEFAULT_API_URL: &str = "https://ws.audioscrobbler.com/2.0/";
pub const DEFAULT_RENDER_COMMAND: &str = "bar-chart-race-render";

/// Directory holding `.env`, `.env.example` and backups.
///
/// - Linux: `~/.local/share/lastfm-timelapse`
/// - macOS: `~/Library/Application Support/lastfm-timelapse`
/// - Windows: `%LOCALAPPDATA%/lastfm-timelapse`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("lastfm-timelapse");
    path
}

/// Loads environment variables from `.env` in the local data directory.
///
/// Creates the data directory when it is missing. A missing `.env` file is
/// not an error; values may come from the process environment alone.
/// Variables already set in the environment are never overwritten.
///
/// # Errors
///
/// Fails when the directory cannot be created or the file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| e.to_string())?;

    let path = dir.join(".env");
    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the Last.fm API key from `LASTFM_API_KEY`.
///
/// # Errors
///
/// [`TimelapseError::MissingConfig`] when the variable is unset or blank.
pub fn lastfm_api_key() -> Result<String, TimelapseError> {
    match env::var("LASTFM_API_KEY") {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(TimelapseError::MissingConfig("LASTFM_API_KEY".to_string())),
    }
}

/// Returns the Last.fm web service URL, `LASTFM_API_URL` or the public endpoint.
pub fn lastfm_api_url() -> String {
    env::var("LASTFM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Returns the external render command, `TIMELAPSE_RENDER_COMMAND` or the default.
pub fn render_command() -> String {
    env::var("TIMELAPSE_RENDER_COMMAND").unwrap_or_else(|_| DEFAULT_RENDER_COMMAND.to_string())
}

/// Run parameters read from a JSON file. Every field is optional so that
/// command line flags can fill in or override what the file leaves out.
///
/// ```json
/// {
///   "username": "rj",
///   "start_date": "2024-01-01",
///   "end_date": "2024-03-31",
///   "chart_type": "albums"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfigFile {
    pub username: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub chart_type: Option<ChartType>,
}

impl RunConfigFile {
    /// Reads a run file.
    ///
    /// # Errors
    ///
    /// Returns [`TimelapseError::Io`] for an unreadable file and
    /// [`TimelapseError::Serde`] for malformed JSON or dates.
    pub async fn load(path: &Path) -> Result<Self, TimelapseError> {
        let content = async_fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }
}
