//! Caching layers for API responses
//!
//! Two layers with different lifetimes: `CacheStore` persists responses in a
//! shared keyed JSON document on disk with read-time TTL checks, and
//! `MemoCache` memoizes fetch results in-process in a bounded LRU map with
//! no expiry beyond capacity eviction.

mod memo;
mod store;

pub use memo::{MemoCache, DEFAULT_MEMO_CAPACITY};
pub use store::{CacheStore, CachedData};
