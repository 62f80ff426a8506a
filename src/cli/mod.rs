//! # CLI Module
//!
//! User-facing commands of the Last.fm timelapse generator.
//!
//! ## Commands
//!
//! - [`generate`] - Fetches scrobbles, builds the table and renders the video
//! - [`backup`] - Fetches scrobbles and stores the pages as a local JSON file
//! - [`table`] - Builds the table and prints the final standings
//!
//! ## Run Parameters
//!
//! Every command resolves a [`RunConfig`] the same way: values from an
//! optional JSON config file, overridden by command line flags, with the last
//! seven days and the artists chart as defaults. The result is validated
//! before anything is requested from Last.fm.
//!
//! ## Page Sources
//!
//! With `--backup <file>` pages are replayed from a file written by
//! [`backup`] instead of being requested live, so no API key is needed and no
//! politeness delay applies.
//!
//! ## Progress
//!
//! A single progress bar spans the whole run. Fetching fills the first half,
//! the remaining stages advance it in fifths.

mod backup;
mod generate;
mod table;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config::RunConfigFile,
    errors::TimelapseError,
    lastfm::{FetchOptions, HttpSource, fetch_pages},
    management::BackupManager,
    types::{ChartType, PageResult, RunConfig},
    utils,
};

pub use backup::backup;
pub use generate::generate;
pub use table::table;

const PROGRESS_SCALE: u64 = 1000;

/// Run parameters as given on the command line, before defaults and validation.
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    pub config: Option<PathBuf>,
    pub username: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub chart_type: Option<ChartType>,
    pub backup: Option<PathBuf>,
}

/// Merges config file, flags and defaults into a validated [`RunConfig`].
pub async fn resolve_run(args: &RunArgs, today: NaiveDate) -> Result<RunConfig, TimelapseError> {
    let file = match &args.config {
        Some(path) => RunConfigFile::load(path).await?,
        None => RunConfigFile::default(),
    };
    let (default_start, default_end) = utils::default_range(today);

    let start_date = match &args.from {
        Some(date) => utils::parse_date(date)?,
        None => file.start_date.unwrap_or(default_start),
    };
    let end_date = match &args.to {
        Some(date) => utils::parse_date(date)?,
        None => file.end_date.unwrap_or(default_end),
    };

    let run = RunConfig {
        username: args
            .username
            .clone()
            .or(file.username)
            .unwrap_or_default()
            .trim()
            .to_string(),
        start_date,
        end_date,
        chart_type: args
            .chart_type
            .or(file.chart_type)
            .unwrap_or(ChartType::Artists),
    };

    utils::validate_run(&run, today)?;
    Ok(run)
}

fn progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(PROGRESS_SCALE);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{bar:40.cyan/blue}] {percent:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .progress_chars("=> "),
    );
    pb
}

fn set_progress(pb: &ProgressBar, fraction: f64) {
    pb.set_position((fraction.clamp(0.0, 1.0) * PROGRESS_SCALE as f64).round() as u64);
}

/// Fetches the pages of `run`, from the backup file when one is given.
async fn collect_pages(
    run: &RunConfig,
    backup: Option<&Path>,
    pb: &ProgressBar,
) -> Result<Vec<PageResult>, TimelapseError> {
    let options = FetchOptions::default();
    let on_page = |fraction: f64| set_progress(pb, fraction);

    match backup {
        Some(path) => {
            let source = BackupManager::load(path).await?.into_source();
            fetch_pages(&source, run, &options, on_page).await
        }
        None => {
            let source = HttpSource::from_env()?;
            fetch_pages(&source, run, &options, on_page).await
        }
    }
}
