//! Video details client for the NBA stats API
//!
//! `VideoFetcher` wires the pieces together: it builds the full query for
//! the `videodetailsasset` endpoint, consults the on-disk response cache,
//! performs the HTTP GET when the cache cannot serve, and memoizes the
//! outcome per argument tuple. The stats API rejects unrecognized clients,
//! so the HTTP client carries a fixed set of browser-mimicking headers.

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use crate::cache::{CacheStore, MemoCache};
use crate::config::{ConfigError, VideoRequestConfig};
use crate::params::{ContextMeasure, ParamsError, VideoRequestParams};

/// Endpoint path for play-video metadata, under the stats base URL
const VIDEO_DETAILS_PATH: &str = "videodetailsasset";

/// Name of the shared cache document inside the cache directory
const CACHE_FILE_NAME: &str = "videos_url.json";

/// User agent presented to the stats API
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:134.0) Gecko/20100101 Firefox/134.0";

/// Errors that can occur while constructing the fetcher or fetching videos
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request configuration could not be built
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Query parameters could not be built
    #[error("invalid request parameters: {0}")]
    Params(#[from] ParamsError),

    /// HTTP request or JSON decoding failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Reading or writing the cache document failed
    #[error("cache I/O failed: {0}")]
    CacheIo(#[from] std::io::Error),
}

/// Exact argument tuple of one fetch call, used as the memoization key
type MemoKey = (String, ContextMeasure, Option<String>, Option<String>);

/// Client for fetching play-video metadata with two caching layers
///
/// Results are cached on disk (shared JSON document, TTL from the config)
/// and memoized in-process (bounded LRU, no expiry). A memoized result --
/// including a memoized failure -- is returned as-is for the process
/// lifetime; callers needing freshness must [`clear_memo`](Self::clear_memo)
/// first.
#[derive(Debug)]
pub struct VideoFetcher {
    /// HTTP client with browser-mimicking default headers
    http_client: Client,
    /// Static request configuration
    config: VideoRequestConfig,
    /// On-disk response cache
    store: CacheStore,
    /// In-process memoization keyed by argument tuple
    memo: MemoCache<MemoKey, Option<Value>>,
    /// Full endpoint URL (overridable for testing)
    video_url: String,
}

impl VideoFetcher {
    /// Creates a fetcher with the default configuration
    ///
    /// # Returns
    /// * `Ok(VideoFetcher)` ready to fetch
    /// * `Err(FetchError)` if the configuration or the HTTP client cannot be built
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(VideoRequestConfig::new()?)
    }

    /// Creates a fetcher over an explicit configuration
    pub fn with_config(config: VideoRequestConfig) -> Result<Self, FetchError> {
        let http_client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(browser_headers())
            .build()?;

        let store = CacheStore::new(config.cache_dir().join(CACHE_FILE_NAME));
        let video_url = format!("{}/{}", config.base_url(), VIDEO_DETAILS_PATH);

        Ok(Self {
            http_client,
            config,
            store,
            memo: MemoCache::default(),
            video_url,
        })
    }

    /// Overrides the endpoint URL (for testing against a local server)
    pub fn with_video_url(mut self, video_url: impl Into<String>) -> Self {
        self.video_url = video_url.into();
        self
    }

    /// Returns the configuration this fetcher was built with
    #[allow(dead_code)]
    pub fn config(&self) -> &VideoRequestConfig {
        &self.config
    }

    /// Fetches raw play-video metadata for a game
    ///
    /// Never fails from the caller's perspective: every internal error
    /// (non-numeric id, filesystem, network, JSON decoding) is logged and
    /// converted to `None`. `None` therefore means "no data" and
    /// "transient failure" indistinguishably.
    ///
    /// # Arguments
    /// * `game_id` - Game identifier recognized by the stats API
    /// * `context_measure` - Event category to filter videos by
    /// * `player_id` - Optional numeric player identifier
    /// * `team_id` - Optional numeric team identifier
    ///
    /// # Returns
    /// * `Some(Value)` - the decoded response body, unvalidated
    /// * `None` - on any failure, or as a memoized earlier failure
    pub async fn get_game_videos_raw(
        &self,
        game_id: &str,
        context_measure: ContextMeasure,
        player_id: Option<&str>,
        team_id: Option<&str>,
    ) -> Option<Value> {
        let memo_key = (
            game_id.to_string(),
            context_measure,
            player_id.map(str::to_string),
            team_id.map(str::to_string),
        );

        if let Some(memoized) = self.memo.get(&memo_key).await {
            debug!(game_id, %context_measure, "serving memoized result");
            return memoized;
        }

        let result = match self
            .try_fetch(game_id, context_measure, player_id, team_id)
            .await
        {
            Ok(body) => Some(body),
            Err(e) => {
                error!(
                    game_id,
                    %context_measure,
                    player_id,
                    team_id,
                    error = %e,
                    "failed to fetch game videos"
                );
                None
            }
        };

        self.memo.put(memo_key, result.clone()).await;
        result
    }

    /// Drops every memoized result, forcing the next call of each tuple
    /// back through the file cache (and the network if that has expired)
    pub async fn clear_memo(&self) {
        self.memo.clear().await;
    }

    /// One fetch attempt: parameters, file cache, then the network
    async fn try_fetch(
        &self,
        game_id: &str,
        context_measure: ContextMeasure,
        player_id: Option<&str>,
        team_id: Option<&str>,
    ) -> Result<Value, FetchError> {
        let mut params = VideoRequestParams::new(game_id, context_measure);
        if let Some(player_id) = player_id {
            params = params.with_player_id(player_id);
        }
        if let Some(team_id) = team_id {
            params = params.with_team_id(team_id);
        }
        let query = params.build()?;

        let cache_key = build_cache_key(game_id, player_id, team_id, context_measure);

        if let Some(cached) = self.store.read::<Value>(&cache_key, self.config.cache_ttl()) {
            if !cached.is_expired {
                debug!(key = %cache_key, "serving file-cached response");
                return Ok(cached.data);
            }
        }

        debug!(key = %cache_key, url = %self.video_url, "fetching from network");
        let body = self
            .http_client
            .get(&self.video_url)
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        self.store.write(&cache_key, &body)?;
        Ok(body)
    }
}

/// Builds the composite cache key: `_`-joined non-empty parts of
/// `["video", game_id, player_id, team_id, context_measure]`
fn build_cache_key(
    game_id: &str,
    player_id: Option<&str>,
    team_id: Option<&str>,
    context_measure: ContextMeasure,
) -> String {
    [
        Some("video"),
        Some(game_id),
        player_id,
        team_id,
        Some(context_measure.as_str()),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join("_")
}

/// Fixed headers mimicking a browser session on nba.com
///
/// `host`, `connection` and `accept-encoding` are left to reqwest.
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.5"),
    );
    headers.insert(header::DNT, HeaderValue::from_static("1"));
    headers.insert(
        header::ORIGIN,
        HeaderValue::from_static("https://www.nba.com"),
    );
    headers.insert(
        header::REFERER,
        HeaderValue::from_static("https://www.nba.com/"),
    );
    headers.insert("sec-fetch-dest", HeaderValue::from_static("empty"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("cors"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("same-site"));
    headers
}
