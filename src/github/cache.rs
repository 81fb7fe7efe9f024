//! Directory listing cache for fast folder re-expansion.
//!
//! Keeps contents API listings in memory so expanding the same folder twice
//! does not spend another call against a rate-limited remote API.
//! - Key: (owner, repository, normalized path)
//! - Bounded: least-recently-used entries are evicted past `capacity`
//! - Optional time-to-live: stale listings count as misses and are dropped
//! - Only successful listings are ever stored
//!
//! Used by: `RepoBrowser::list_directory()` in browser.rs

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use lru::LruCache;

use crate::models::{RepoRef, TreeEntry};

pub const DEFAULT_CAPACITY: usize = 512;

#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    /// Maximum number of cached listings. Zero disables the cache.
    pub capacity: usize,
    /// Listing lifetime. `None` keeps entries until evicted.
    pub ttl: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            ttl: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    owner: String,
    name: String,
    path: String,
}

impl CacheKey {
    fn new(repo: &RepoRef, path: &str) -> Self {
        Self {
            owner: repo.owner().to_string(),
            name: repo.name().to_string(),
            path: path.trim_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct CachedListing {
    entries: Vec<TreeEntry>,
    stored_at: Instant,
}

pub struct TreeCache {
    listings: Option<Mutex<LruCache<CacheKey, CachedListing>>>,
    ttl: Option<Duration>,
    hits: AtomicU64,
    misses: AtomicU64,
    created_at: Instant,
}

impl TreeCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            listings: NonZeroUsize::new(config.capacity).map(|cap| Mutex::new(LruCache::new(cap))),
            ttl: config.ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            created_at: Instant::now(),
        }
    }

    /// Look up a listing. `path` is expected to be normalized already.
    pub fn get(&self, repo: &RepoRef, path: &str) -> Option<Vec<TreeEntry>> {
        let mut listings = self.lock()?;
        let key = CacheKey::new(repo, path);

        let expired = match listings.get(&key) {
            Some(cached) => self.ttl.is_some_and(|ttl| cached.stored_at.elapsed() > ttl),
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                return None;
            }
        };

        if expired {
            listings.pop(&key);
            self.misses.fetch_add(1, Ordering::Relaxed);
            return None;
        }

        self.hits.fetch_add(1, Ordering::Relaxed);
        listings.get(&key).map(|cached| cached.entries.clone())
    }

    pub fn put(&self, repo: &RepoRef, path: &str, entries: Vec<TreeEntry>) {
        if let Some(mut listings) = self.lock() {
            listings.put(
                CacheKey::new(repo, path),
                CachedListing {
                    entries,
                    stored_at: Instant::now(),
                },
            );
        }
    }

    /// Get cache statistics for debugging
    pub fn stats(&self) -> CacheStats {
        let (entries, capacity) = match self.lock() {
            Some(listings) => (listings.len(), listings.cap().get()),
            None => (0, 0),
        };
        CacheStats {
            entries,
            capacity,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            age_secs: self.created_at.elapsed().as_secs(),
        }
    }

    /// A poisoned lock only means another request panicked mid-update; the
    /// listings themselves are plain data, so keep serving them.
    fn lock(&self) -> Option<MutexGuard<'_, LruCache<CacheKey, CachedListing>>> {
        self.listings
            .as_ref()
            .map(|m| m.lock().unwrap_or_else(|poisoned| poisoned.into_inner()))
    }
}

#[derive(Debug)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub age_secs: u64,
}
