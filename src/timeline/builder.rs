use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};

use super::{labels, matrix::DailyCountMatrix};
use crate::{
    errors::TimelapseError,
    types::{ChartType, PageResult, ScrobbleEvent},
};

/// Cumulative table of a run together with the widest label it contains.
#[derive(Debug, Clone)]
pub struct BuiltTable {
    pub matrix: DailyCountMatrix,
    /// Layout hint for the renderer, in characters.
    pub label_width: usize,
}

/// Flattens every page into labelled events, keeping page order.
pub fn scrobble_events(pages: &[PageResult], chart_type: ChartType) -> Vec<ScrobbleEvent> {
    pages
        .iter()
        .flat_map(|page| page.tracks())
        .map(|track| ScrobbleEvent {
            entity_name: labels::entity_label(track, chart_type),
            timestamp: track.timestamp(),
        })
        .collect()
}

/// Calendar day (UTC) of a Unix timestamp.
pub fn scrobble_date(timestamp: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.date_naive())
}

/// Counts plays per entity and day. Events without a usable timestamp,
/// such as the track currently playing, are skipped.
pub fn count_per_day(events: Vec<ScrobbleEvent>) -> BTreeMap<String, BTreeMap<NaiveDate, u64>> {
    let mut counts: BTreeMap<String, BTreeMap<NaiveDate, u64>> = BTreeMap::new();
    for event in events {
        let Some(date) = event.timestamp.and_then(scrobble_date) else {
            continue;
        };
        *counts
            .entry(event.entity_name)
            .or_default()
            .entry(date)
            .or_insert(0) += 1;
    }
    counts
}

/// Builds the dense cumulative table for `pages`.
///
/// Fails with [`TimelapseError::NoDataInRange`] when no event carries a
/// timestamp, rather than handing an empty table to the renderer.
pub fn build_table(pages: &[PageResult], chart_type: ChartType) -> Result<BuiltTable, TimelapseError> {
    let label_width = labels::label_width(pages.iter().flat_map(|p| p.tracks()), chart_type);

    let counts = count_per_day(scrobble_events(pages, chart_type));
    if counts.is_empty() {
        return Err(TimelapseError::NoDataInRange);
    }

    Ok(BuiltTable {
        matrix: DailyCountMatrix::from_daily_counts(&counts),
        label_width,
    })
}
