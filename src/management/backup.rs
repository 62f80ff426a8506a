use std::path::{Path, PathBuf};

use crate::{
    errors::TimelapseError,
    lastfm::{PageRequest, PageSource},
    types::{PageAttr, PageResult, RecentTrack, RecentTracks, RecentTracksResponse},
};

/// Pages of a previous fetch stored as a JSON file.
pub struct BackupManager {
    path: PathBuf,
    pages: Vec<RecentTracksResponse>,
}

impl BackupManager {
    /// Creates a manager for `path`, starting empty when `pages` is `None`.
    pub fn new(path: PathBuf, pages: Option<Vec<RecentTracksResponse>>) -> Self {
        Self {
            path,
            pages: pages.unwrap_or(Vec::new()),
        }
    }

    /// Wraps freshly fetched pages so they can be persisted to `path`.
    pub fn from_pages(path: PathBuf, pages: &[PageResult]) -> Self {
        Self::new(
            path,
            Some(pages.iter().map(|p| p.payload.clone()).collect()),
        )
    }

    /// Reads a backup previously written by [`BackupManager::persist`].
    ///
    /// # Errors
    ///
    /// Returns [`TimelapseError::Io`] when the file cannot be read and
    /// [`TimelapseError::Serde`] when it does not hold a list of pages.
    pub async fn load(path: &Path) -> Result<Self, TimelapseError> {
        let content = async_fs::read_to_string(path).await?;
        let pages: Vec<RecentTracksResponse> = serde_json::from_str(&content)?;
        Ok(Self {
            path: path.to_path_buf(),
            pages,
        })
    }

    /// Writes the pages to the backup path as pretty-printed JSON.
    ///
    /// Missing parent directories are created first. An existing file at the
    /// path is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`TimelapseError::Io`] when the directory or the file cannot
    /// be written.
    ///
    /// # Example
    ///
    /// ```
    /// let manager = BackupManager::from_pages(BackupManager::default_path("rj"), &pages);
    /// manager.persist().await?;
    /// ```
    pub async fn persist(&self) -> Result<(), TimelapseError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                async_fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(&self.pages)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    pub fn pages(&self) -> &[RecentTracksResponse] {
        &self.pages
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Turns the stored pages into a [`PageSource`] for replay.
    pub fn into_source(self) -> BackupSource {
        BackupSource { pages: self.pages }
    }

    /// `<data_local_dir>/lastfm-timelapse/backups/<username>.json`
    pub fn default_path(username: &str) -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(format!(
            "lastfm-timelapse/backups/{username}.json",
            username = username
        ));
        path
    }
}

/// Replays stored pages as if they came from the service.
///
/// Every page is flagged as cached. Tracks outside the requested window are
/// left out and the pagination attributes are rebuilt for the window.
pub struct BackupSource {
    pages: Vec<RecentTracksResponse>,
}

impl BackupSource {
    /// Replays `pages` in their stored order.
    pub fn new(pages: Vec<RecentTracksResponse>) -> Self {
        Self { pages }
    }
}

fn in_window(track: &RecentTrack, request: &PageRequest) -> bool {
    match track.timestamp() {
        Some(ts) => ts >= request.from && ts <= request.to,
        None => true,
    }
}

impl PageSource for BackupSource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult, TimelapseError> {
        let total = self
            .pages
            .iter()
            .flat_map(|p| p.recenttracks.track.iter())
            .filter(|t| t.timestamp().is_some() && in_window(t, request))
            .count() as u64;

        let index = request.page.saturating_sub(1) as usize;
        let track: Vec<RecentTrack> = self
            .pages
            .get(index)
            .map(|p| {
                p.recenttracks
                    .track
                    .iter()
                    .filter(|t| in_window(t, request))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        let user = self
            .pages
            .first()
            .map(|p| p.recenttracks.attr.user.clone())
            .unwrap_or_else(|| request.username.clone());

        Ok(PageResult {
            payload: RecentTracksResponse {
                recenttracks: RecentTracks {
                    track,
                    attr: PageAttr {
                        user,
                        page: request.page,
                        total_pages: self.pages.len() as u32,
                        total,
                    },
                },
            },
            from_cache: true,
        })
    }
}
