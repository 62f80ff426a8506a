use std::time::Duration;

use tokio::time::sleep;

use crate::{
    errors::TimelapseError,
    types::{PageResult, RunConfig},
    utils,
};

/// Largest page Last.fm serves for recent tracks.
pub const PAGE_SIZE: u32 = 200;

/// Scrobble count above which a run is refused.
pub const MAX_SCROBBLES: u64 = 15000;

/// Pause between two live requests.
pub const POLITENESS_DELAY: Duration = Duration::from_millis(250);

/// Parameters of one `user.getRecentTracks` page request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub username: String,
    /// Unix seconds, local midnight of the first day.
    pub from: i64,
    /// Unix seconds, local midnight of the end date.
    pub to: i64,
    pub page: u32,
    pub limit: u32,
}

/// Anything that can answer page requests: the web service or a local backup.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult, TimelapseError>;
}

/// Limits applied while fetching. [`Default`] gives the service limits.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub page_size: u32,
    pub max_scrobbles: u64,
    pub politeness_delay: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            max_scrobbles: MAX_SCROBBLES,
            politeness_delay: POLITENESS_DELAY,
        }
    }
}

/// Retrieves every page of scrobbles for `run`.
///
/// Pages are requested one after another starting at page 1 until the page
/// number passes the reported page count. The first page decides whether the
/// run is too large: a reported total above `options.max_scrobbles` aborts
/// before any further request. Live pages are followed by
/// `options.politeness_delay`; replayed pages are not.
///
/// `progress` receives the share of the whole pipeline done after each page;
/// fetching accounts for the first half.
///
/// # Errors
///
/// Any error of the source ends the fetch, nothing is retried.
pub async fn fetch_pages<S, F>(
    source: &S,
    run: &RunConfig,
    options: &FetchOptions,
    mut progress: F,
) -> Result<Vec<PageResult>, TimelapseError>
where
    S: PageSource,
    F: FnMut(f64),
{
    let (from, to) = utils::date_window(run.start_date, run.end_date);
    let mut pages: Vec<PageResult> = Vec::new();
    let mut page: u32 = 1;

    loop {
        let request = PageRequest {
            username: run.username.clone(),
            from,
            to,
            page,
            limit: options.page_size,
        };
        let result = source.fetch_page(&request).await?;

        if pages.is_empty() && result.total() > options.max_scrobbles {
            return Err(TimelapseError::VolumeExceeded {
                total: result.total(),
                limit: options.max_scrobbles,
            });
        }

        let current = result.page().max(page);
        let total_pages = result.total_pages();
        let from_cache = result.from_cache;
        pages.push(result);

        progress(utils::fetch_progress(current, total_pages));

        page = current + 1;
        if page > total_pages {
            break;
        }

        if !from_cache && !options.politeness_delay.is_zero() {
            sleep(options.politeness_delay).await;
        }
    }

    Ok(pages)
}
