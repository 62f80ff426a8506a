//! # Last.fm Module
//!
//! Retrieval of a user's scrobbles from the Last.fm web service.
//!
//! ## Overview
//!
//! The only endpoint used is `user.getRecentTracks`, requested page by page
//! with the time window of the run:
//!
//! ```text
//! fetch_pages ──> PageSource::fetch_page (page 1..=totalPages)
//!                   ├── HttpSource    live, 250ms apart
//!                   └── BackupSource  replayed from a local file, no delay
//! ```
//!
//! ## Limits
//!
//! - At most 200 scrobbles per page
//! - Runs reporting more than 15000 scrobbles are refused after the first page
//! - Non-success responses end the run; there is no retry
//!
//! ## Response Quirks
//!
//! Last.fm encodes numbers as strings, sends a bare object instead of an
//! array for one-track pages and lists the currently playing track without a
//! timestamp. [`crate::types`] absorbs the first two, the table builder drops
//! the third.

pub mod fetch;
pub mod recent_tracks;

pub use fetch::FetchOptions;
pub use fetch::PageRequest;
pub use fetch::PageSource;
pub use fetch::fetch_pages;
pub use recent_tracks::HttpSource;
