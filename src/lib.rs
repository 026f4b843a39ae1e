//! Courtside - NBA play-video metadata client
//!
//! A thin client for the NBA stats `videodetailsasset` endpoint. It builds
//! the fixed-shape query the API requires, caches raw JSON responses in a
//! shared on-disk document with a time-based TTL, memoizes results
//! in-process in a bounded LRU cache, and fails soft: per-call errors are
//! logged and surface as `None`.
//!
//! ```no_run
//! use courtside::{ContextMeasure, VideoFetcher};
//!
//! # async fn example() {
//! let fetcher = VideoFetcher::new().expect("config");
//! let videos = fetcher
//!     .get_game_videos_raw("0022400001", ContextMeasure::Fg3m, Some("201939"), None)
//!     .await;
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod fetcher;
pub mod params;

pub use cache::{CacheStore, CachedData, MemoCache};
pub use config::{ConfigError, VideoRequestConfig};
pub use fetcher::{FetchError, VideoFetcher};
pub use params::{ContextMeasure, ParamsError, VideoRequestParams};
