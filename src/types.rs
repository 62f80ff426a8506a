use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::utils;

/// Which entity the bars of the chart represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[serde(alias = "Artists")]
    Artists,
    #[serde(alias = "Albums")]
    Albums,
    #[serde(alias = "Tracks")]
    Tracks,
}

impl ChartType {
    /// Lowercase name used in file names and titles.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Artists => "artists",
            ChartType::Albums => "albums",
            ChartType::Tracks => "tracks",
        }
    }
}

impl std::fmt::Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a single timelapse run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub username: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub chart_type: ChartType,
}

/// Body of a `user.getRecentTracks` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentTracksResponse {
    pub recenttracks: RecentTracks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentTracks {
    #[serde(default, deserialize_with = "utils::one_or_many")]
    pub track: Vec<RecentTrack>,
    #[serde(rename = "@attr")]
    pub attr: PageAttr,
}

/// Pagination metadata found under `@attr`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageAttr {
    #[serde(default)]
    pub user: String,
    #[serde(deserialize_with = "utils::number_from_string")]
    pub page: u32,
    #[serde(rename = "totalPages", deserialize_with = "utils::number_from_string")]
    pub total_pages: u32,
    #[serde(deserialize_with = "utils::number_from_string")]
    pub total: u64,
}

/// One track record. The currently playing track has no `date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentTrack {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artist: TextField,
    #[serde(default)]
    pub album: TextField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<TrackDate>,
    #[serde(rename = "@attr", default, skip_serializing_if = "Option::is_none")]
    pub attr: Option<TrackAttr>,
}

impl RecentTrack {
    /// Unix timestamp of the scrobble, `None` for a track that is still playing
    /// or carries a timestamp that does not parse.
    pub fn timestamp(&self) -> Option<i64> {
        self.date.as_ref()?.uts.trim().parse().ok()
    }
}

/// Last.fm wraps names in `{"#text": ...}`; extended responses use `name`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextField {
    #[serde(rename = "#text", alias = "name", default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackDate {
    #[serde(default, deserialize_with = "utils::string_or_number")]
    pub uts: String,
    #[serde(rename = "#text", default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackAttr {
    #[serde(default)]
    pub nowplaying: Option<String>,
}

/// Error body Last.fm sends alongside failing requests.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: u32,
    pub message: String,
}

/// One page of scrobbles as handed from the fetcher to the table builder.
#[derive(Debug, Clone)]
pub struct PageResult {
    pub payload: RecentTracksResponse,
    /// Set when the page was replayed instead of requested from the service.
    pub from_cache: bool,
}

impl PageResult {
    pub fn page(&self) -> u32 {
        self.payload.recenttracks.attr.page
    }

    pub fn total_pages(&self) -> u32 {
        self.payload.recenttracks.attr.total_pages
    }

    pub fn total(&self) -> u64 {
        self.payload.recenttracks.attr.total
    }

    pub fn tracks(&self) -> &[RecentTrack] {
        &self.payload.recenttracks.track
    }
}

/// A single play, labelled for the chart being built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrobbleEvent {
    pub entity_name: String,
    pub timestamp: Option<i64>,
}

/// One line of the standings printed by the `table` command.
#[derive(Tabled)]
pub struct StandingTableRow {
    pub rank: usize,
    pub name: String,
    pub plays: u64,
}
