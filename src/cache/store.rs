//! Keyed cache store backed by a single JSON document on disk
//!
//! Stores every entry in one shared file, mapping composite string keys to
//! payloads with their cache timestamps. Expiry is decided at read time
//! against a caller-supplied TTL, so one document can hold entries cached
//! at different moments. Writes replace the whole document atomically via
//! a temp file and rename; concurrent processes writing the same file are
//! last-write-wins.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// One keyed entry inside the cache document
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    /// The cached payload
    data: Value,
    /// When the payload was cached
    cached_at: DateTime<Utc>,
}

/// The on-disk document: composite key -> entry
type CacheDocument = HashMap<String, CacheEntry>;

/// Result of reading from the cache, including freshness metadata
#[derive(Debug)]
pub struct CachedData<T> {
    /// The cached payload
    pub data: T,
    /// When the payload was originally cached
    #[allow(dead_code)]
    pub cached_at: DateTime<Utc>,
    /// Whether the entry's age exceeds the TTL it was read with
    pub is_expired: bool,
}

/// Reads and writes keyed entries in a shared JSON cache file
///
/// Unlike a file-per-key layout, all entries live in one document so a
/// single path (e.g. `videos_url.json`) can cache many distinct requests.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Path of the cache document
    path: PathBuf,
}

impl CacheStore {
    /// Creates a store over the document at `path`
    ///
    /// The file and its parent directory are created lazily on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the backing document
    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the whole document, treating a missing or undecodable file as empty
    fn load(&self) -> CacheDocument {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return CacheDocument::new();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Persists the whole document atomically
    ///
    /// Writes to a sibling temp file and renames over the target so a
    /// crashed writer never leaves a truncated document behind.
    fn persist(&self, document: &CacheDocument) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(document)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)
    }

    /// Reads the entry under `key`, judging freshness against `ttl`
    ///
    /// Returns `None` if the document or the key is missing, or if the
    /// entry cannot be decoded as `T`. An entry older than `ttl` is still
    /// returned with `is_expired = true`; entries timestamped in the
    /// future (clock skew) count as fresh.
    ///
    /// # Arguments
    /// * `key` - The composite cache key to read
    /// * `ttl` - Maximum age before the entry counts as expired
    pub fn read<T: DeserializeOwned>(&self, key: &str, ttl: Duration) -> Option<CachedData<T>> {
        let mut document = self.load();
        let entry = document.remove(key)?;
        let data: T = serde_json::from_value(entry.data).ok()?;

        let age = Utc::now() - entry.cached_at;
        let is_expired = age.to_std().map(|age| age > ttl).unwrap_or(false);

        debug!(key, is_expired, "cache read");

        Some(CachedData {
            data,
            cached_at: entry.cached_at,
            is_expired,
        })
    }

    /// Writes or refreshes the entry under `key`, keeping all other entries
    ///
    /// # Arguments
    /// * `key` - The composite cache key to write under
    /// * `data` - The payload to cache (must implement Serialize)
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if directory creation, serialization, or file writing fails
    pub fn write<T: Serialize>(&self, key: &str, data: &T) -> std::io::Result<()> {
        let mut document = self.load();

        let data = serde_json::to_value(data)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        document.insert(
            key.to_string(),
            CacheEntry {
                data,
                cached_at: Utc::now(),
            },
        );

        debug!(key, "cache write");
        self.persist(&document)
    }

    /// Removes the entry under `key`, returning whether it existed
    pub fn remove(&self, key: &str) -> std::io::Result<bool> {
        let mut document = self.load();
        let existed = document.remove(key).is_some();
        if existed {
            self.persist(&document)?;
        }
        Ok(existed)
    }
}
