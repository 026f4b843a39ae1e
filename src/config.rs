//! Static request configuration for the video fetcher
//!
//! Holds the stats API base URL, the on-disk cache location, the cache TTL,
//! and the table mapping primary CDN prefixes to fallback hosts. Built once
//! when the fetcher is constructed and immutable afterwards; construction
//! fails fast on an unusable cache directory or a zero TTL.

use directories::ProjectDirs;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Base URL of the NBA stats API
const STATS_BASE_URL: &str = "https://stats.nba.com/stats";

/// How long a cached response stays fresh unless overridden
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Primary CDN prefix for static JSON assets
const PRIMARY_CDN_URL: &str = "https://cdn.nba.com/static/json";

/// S3-backed fallback for the primary CDN prefix
const FALLBACK_CDN_URL: &str = "https://nba-prod-us-east-1-mediaops-stats.s3.amazonaws.com/NBA";

/// Errors raised while building the request configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No platform cache directory could be determined (e.g. no home directory)
    #[error("could not determine a cache directory for this platform")]
    NoCacheDir,

    /// The cache directory could not be created
    #[error("failed to create cache directory {path}: {source}")]
    CreateCacheDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configured cache TTL is not a positive duration
    #[error("cache TTL must be a positive duration")]
    InvalidTtl,
}

/// Immutable configuration shared by every video request
#[derive(Debug, Clone)]
pub struct VideoRequestConfig {
    /// Base URL of the stats API
    base_url: String,
    /// Directory holding the cache document; exists once constructed
    cache_dir: PathBuf,
    /// Maximum age before a cached response is refetched
    cache_ttl: Duration,
    /// Primary CDN prefix -> fallback prefix, for transports that switch hosts
    fallback_urls: HashMap<String, String>,
}

impl VideoRequestConfig {
    /// Creates the default configuration with an XDG-compliant cache directory
    ///
    /// Uses `~/.cache/courtside/` on Linux, or the equivalent platform path.
    ///
    /// # Returns
    /// * `Ok(VideoRequestConfig)` with the cache directory created
    /// * `Err(ConfigError)` if no cache directory can be determined or created
    pub fn new() -> Result<Self, ConfigError> {
        let project_dirs = ProjectDirs::from("", "", "courtside").ok_or(ConfigError::NoCacheDir)?;
        Self::with_dir(project_dirs.cache_dir())
    }

    /// Creates a configuration rooted at an explicit cache directory
    ///
    /// Useful for testing or when a specific cache location is needed.
    /// The directory is created (recursively) if absent.
    pub fn with_dir(cache_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let cache_dir = cache_dir.into();
        fs::create_dir_all(&cache_dir).map_err(|source| ConfigError::CreateCacheDir {
            path: cache_dir.clone(),
            source,
        })?;

        Ok(Self {
            base_url: STATS_BASE_URL.to_string(),
            cache_dir,
            cache_ttl: DEFAULT_CACHE_TTL,
            fallback_urls: HashMap::from([(
                PRIMARY_CDN_URL.to_string(),
                FALLBACK_CDN_URL.to_string(),
            )]),
        })
    }

    /// Overrides the cache TTL
    ///
    /// # Returns
    /// * `Ok(VideoRequestConfig)` with the new TTL
    /// * `Err(ConfigError::InvalidTtl)` if the duration is zero
    pub fn with_ttl(mut self, cache_ttl: Duration) -> Result<Self, ConfigError> {
        if cache_ttl.is_zero() {
            return Err(ConfigError::InvalidTtl);
        }
        self.cache_ttl = cache_ttl;
        Ok(self)
    }

    /// Base URL of the stats API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Directory holding the cache document
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Maximum age before a cached response is refetched
    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    /// Mapping from primary CDN prefixes to their fallback hosts
    ///
    /// This crate only supplies the table; switching to a fallback when the
    /// primary host is unreachable is the transport's concern.
    pub fn fallback_urls(&self) -> &HashMap<String, String> {
        &self.fallback_urls
    }

    /// Looks up the fallback prefix for a primary CDN prefix
    #[allow(dead_code)]
    pub fn fallback_url_for(&self, primary: &str) -> Option<&str> {
        self.fallback_urls.get(primary).map(String::as_str)
    }
}
