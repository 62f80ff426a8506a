//! Last.fm Timelapse Library
//!
//! This library turns a user's Last.fm listening history into the data of an
//! animated bar chart race. It fetches scrobbles page by page, builds a
//! cumulative play count table per artist, album or track, bounds it to the
//! leading entities of each day and hands it to an external renderer.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `errors` - The error type shared by every stage
//! - `lastfm` - Paginated retrieval of recent tracks
//! - `management` - Local JSON backups of fetched pages
//! - `render` - Renderer interface and the external command renderer
//! - `timeline` - Table building and pruning
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use lastfm_timelapse::{lastfm, timeline, types::ChartType};
//!
//! async fn run(run: &lastfm_timelapse::types::RunConfig) -> lastfm_timelapse::Res<()> {
//!     let source = lastfm::HttpSource::from_env()?;
//!     let pages = lastfm::fetch_pages(&source, run, &Default::default(), |_| {}).await?;
//!     let table = timeline::build_table(&pages, ChartType::Artists)?;
//!     let matrix = timeline::optimize_table(table.matrix);
//!     println!("{} days", matrix.dates().len());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod lastfm;
pub mod management;
pub mod render;
pub mod timeline;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the command layer, where errors from every stage meet. The
/// pipeline itself returns [`errors::TimelapseError`].
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching scrobbles for {}...", username);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Saved {}", path.display());
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// The process terminates with exit code 1 right after printing, so this is
/// only meant for the command layer where a run cannot continue.
///
/// # Example
///
/// ```
/// error!("Cannot load environment. Err: {}", e);
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Tie at rank 10, {} entities kept", count);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
