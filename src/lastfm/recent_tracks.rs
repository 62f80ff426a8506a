use reqwest::{Client, header::USER_AGENT};

use super::fetch::{PageRequest, PageSource};
use crate::{
    config,
    errors::TimelapseError,
    types::{ApiErrorBody, PageResult, RecentTracksResponse},
};

/// Live page source backed by the Last.fm web service.
pub struct HttpSource {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HttpSource {
    /// Creates a source for the web service at `api_url`.
    ///
    /// # Arguments
    ///
    /// * `api_url` - Base URL, usually `https://ws.audioscrobbler.com/2.0/`
    /// * `api_key` - Last.fm API key sent with every request
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
        }
    }

    /// Builds a source from `LASTFM_API_URL` and `LASTFM_API_KEY`.
    pub fn from_env() -> Result<Self, TimelapseError> {
        Ok(Self::new(config::lastfm_api_url(), config::lastfm_api_key()?))
    }
}

impl PageSource for HttpSource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult, TimelapseError> {
        let response = self
            .client
            .get(&self.api_url)
            .header(
                USER_AGENT,
                concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")),
            )
            .query(&[
                ("method", "user.getrecenttracks".to_string()),
                ("api_key", self.api_key.clone()),
                ("user", request.username.clone()),
                ("format", "json".to_string()),
                ("from", request.from.to_string()),
                ("to", request.to.to_string()),
                ("limit", request.limit.to_string()),
                ("page", request.page.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TimelapseError::RemoteRequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        parse_page(status.as_u16(), &body).map(|payload| PageResult {
            payload,
            from_cache: false,
        })
    }
}

/// Parses a page body, turning Last.fm error documents into request failures.
pub fn parse_page(status: u16, body: &str) -> Result<RecentTracksResponse, TimelapseError> {
    match serde_json::from_str::<RecentTracksResponse>(body) {
        Ok(payload) => Ok(payload),
        Err(err) => match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(api_error) => Err(TimelapseError::RemoteRequestFailed {
                status,
                body: format!("error {}: {}", api_error.error, api_error.message),
            }),
            Err(_) => Err(TimelapseError::MalformedResponse(err.to_string())),
        },
    }
}
