//! Time-boxed response cache for large, rarely changing requests.
//!
//! Entries are keyed by request URL and expire a fixed time after they were
//! created. Origin cache headers are never consulted. The client only routes
//! the store directory request through the cache.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::CacheError;

/// Sub-directory name the on-disk cache lives under.
pub const CACHE_NAMESPACE: &str = "officeworks";

pub const DEFAULT_TTL_DAYS: u32 = 7;

/// A store of response bodies keyed by URL.
///
/// Implementations must treat expired entries as absent.
pub trait ResponseCache: Send + Sync {
    fn get(&self, url: &str) -> Option<String>;

    /// Stores `body` for `url`, replacing any previous entry and restarting
    /// its expiry clock.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the entry cannot be persisted.
    fn put(&self, url: &str, body: &str) -> Result<(), CacheError>;
}

/// A cached response body plus the bookkeeping needed for expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedEntry {
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub body: String,
}

impl CachedEntry {
    #[must_use]
    pub fn new(url: &str, body: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            url: url.to_owned(),
            created_at,
            body: body.to_owned(),
        }
    }

    #[must_use]
    pub fn is_expired_at(&self, ttl: TimeDelta, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.created_at) >= ttl
    }
}

/// Stable file-name-safe key for a URL: lowercase hex SHA-256.
#[must_use]
pub fn cache_key(url: &str) -> String {
    format!("{:x}", Sha256::digest(url.as_bytes()))
}

fn ttl_from_days(days: u32) -> TimeDelta {
    TimeDelta::days(i64::from(days))
}

/// Persistent cache with one JSON file per entry under
/// `{root}/officeworks/{sha256(url)}.json`.
///
/// Unreadable, corrupt, or expired entries are misses. Expired files are
/// removed on read.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
    ttl: TimeDelta,
}

impl FileCache {
    #[must_use]
    pub fn new(root: &Path, ttl_days: u32) -> Self {
        Self {
            dir: root.join(CACHE_NAMESPACE),
            ttl: ttl_from_days(ttl_days),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        self.dir.join(format!("{}.json", cache_key(url)))
    }

    /// Looks up `url` as of `now`.
    #[must_use]
    pub fn get_at(&self, url: &str, now: DateTime<Utc>) -> Option<String> {
        let path = self.entry_path(url);
        let raw = fs::read_to_string(&path).ok()?;

        let entry = match serde_json::from_str::<CachedEntry>(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "ignoring corrupt cache entry"
                );
                return None;
            }
        };

        if entry.url != url {
            tracing::debug!(path = %path.display(), "cache key collision; treating as miss");
            return None;
        }

        if entry.is_expired_at(self.ttl, now) {
            tracing::debug!(url, created_at = %entry.created_at, "cache entry expired");
            if let Err(e) = fs::remove_file(&path) {
                tracing::debug!(
                    path = %path.display(),
                    error = %e,
                    "could not remove expired cache entry"
                );
            }
            return None;
        }

        Some(entry.body)
    }

    /// Writes an entry stamped with `created_at`.
    ///
    /// The file is written to a temporary sibling and renamed into place so a
    /// concurrent reader never observes a partial entry.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Io`] if the directory or file cannot be written.
    pub fn put_at(
        &self,
        url: &str,
        body: &str,
        created_at: DateTime<Utc>,
    ) -> Result<(), CacheError> {
        let io_err = |path: &Path, source: std::io::Error| CacheError::Io {
            path: path.display().to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(|e| io_err(&self.dir, e))?;

        let path = self.entry_path(url);
        let tmp = path.with_extension("json.tmp");
        let serialized = serde_json::to_string(&CachedEntry::new(url, body, created_at))?;

        fs::write(&tmp, serialized).map_err(|e| io_err(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| io_err(&path, e))?;
        Ok(())
    }
}

impl ResponseCache for FileCache {
    fn get(&self, url: &str) -> Option<String> {
        self.get_at(url, Utc::now())
    }

    fn put(&self, url: &str, body: &str) -> Result<(), CacheError> {
        self.put_at(url, body, Utc::now())
    }
}

/// Process-local cache, used by tests.
///
/// Expiry is checked against [`CachedEntry::created_at`] so tests can plant
/// entries at a chosen time through [`MemoryCache::insert_at`].
#[derive(Debug)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CachedEntry>>,
    ttl: TimeDelta,
}

impl MemoryCache {
    #[must_use]
    pub fn new(ttl_days: u32) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: ttl_from_days(ttl_days),
        }
    }

    /// Inserts an entry with an explicit creation time.
    pub fn insert_at(&self, url: &str, body: &str, created_at: DateTime<Utc>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.to_owned(), CachedEntry::new(url, body, created_at));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_DAYS)
    }
}

impl ResponseCache for MemoryCache {
    fn get(&self, url: &str) -> Option<String> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let expired = entries.get(url)?.is_expired_at(self.ttl, Utc::now());
        if expired {
            entries.remove(url);
            return None;
        }
        entries.get(url).map(|e| e.body.clone())
    }

    fn put(&self, url: &str, body: &str) -> Result<(), CacheError> {
        self.insert_at(url, body, Utc::now());
        Ok(())
    }
}

/// A cache that never stores anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl ResponseCache for NoCache {
    fn get(&self, _url: &str) -> Option<String> {
        None
    }

    fn put(&self, _url: &str, _body: &str) -> Result<(), CacheError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "cache_test.rs"]
mod tests;
