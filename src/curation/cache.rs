//! In-memory cache for curation lookups
//!
//! Remote lookups are comparatively expensive and curation data changes
//! rarely, so results are kept for a configured expiration window. Keys are
//! plain strings; keys derived from a VCS location are canonicalized first
//! so that equivalent spellings of the same repository share an entry.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::vcs;

/// Derives a cache key from a raw VCS location. Two locations naming the
/// same repository derive the same key.
pub fn vcs_key(raw_url: &str) -> String {
    format!("vcs:{}", vcs::normalize_vcs_url(raw_url))
}

struct CacheEntry<T> {
    stored_at: Instant,
    value: T,
}

/// String-keyed cache whose entries expire after a fixed window.
pub struct ExpiringCache<T> {
    entries: Mutex<HashMap<String, CacheEntry<T>>>,
    expiration: Duration,
}

impl<T: Clone> ExpiringCache<T> {
    pub fn new(expiration: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            expiration,
        }
    }

    /// Returns the cached value for `key`, or `None` when absent or
    /// expired. A poisoned lock reads as a miss.
    pub fn get(&self, key: &str) -> Option<T> {
        let entries = self.entries.lock().ok()?;
        let entry = entries.get(key)?;

        if entry.stored_at.elapsed() >= self.expiration {
            debug!("cache entry for {} expired", key);
            return None;
        }

        Some(entry.value.clone())
    }

    pub fn put(&self, key: &str, value: T) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                key.to_string(),
                CacheEntry {
                    stored_at: Instant::now(),
                    value,
                },
            );
        }
    }
}
