//! Bounded store of rendered repositories
//!
//! Entries expire a fixed time after insertion and the least recently used
//! entry is evicted when the store is full. The cache is a plain value owned by
//! the caller; share it behind a lock if several request handlers need it.

use crate::config::CacheConfig;
use crate::repo::RepoId;
use crate::scanner::Stats;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A finished render kept for reuse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedRender {
    pub repo_url: String,
    pub commit: String,
    pub html: String,
    pub flattened: String,
    pub stats: Stats,
}

#[derive(Debug)]
struct Entry {
    value: Arc<CachedRender>,
    inserted_at: Instant,
    last_access: u64,
}

#[derive(Debug)]
pub struct RenderCache {
    entries: HashMap<String, Entry>,
    max_entries: usize,
    ttl: Duration,
    clock: u64,
}

impl RenderCache {
    /// `max_entries` is clamped to at least one
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries: max_entries.max(1),
            ttl,
            clock: 0,
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.max_entries, Duration::from_secs(config.ttl_secs))
    }

    pub fn get(&mut self, id: &RepoId) -> Option<Arc<CachedRender>> {
        self.get_at(id, Instant::now())
    }

    /// Look up an entry as of `now`; an expired entry is dropped and missed
    pub fn get_at(&mut self, id: &RepoId, now: Instant) -> Option<Arc<CachedRender>> {
        let key = id.cache_key();
        let expired = match self.entries.get(&key) {
            Some(entry) => self.is_expired(entry, now),
            None => return None,
        };
        if expired {
            tracing::debug!("Cache entry for {} expired", id);
            self.entries.remove(&key);
            return None;
        }

        self.clock += 1;
        let clock = self.clock;
        self.entries.get_mut(&key).map(|entry| {
            entry.last_access = clock;
            Arc::clone(&entry.value)
        })
    }

    pub fn insert(&mut self, id: &RepoId, value: CachedRender) -> Arc<CachedRender> {
        self.insert_at(id, value, Instant::now())
    }

    /// Store a render as of `now`, evicting expired entries first and then the
    /// least recently used one if the store is still full
    pub fn insert_at(&mut self, id: &RepoId, value: CachedRender, now: Instant) -> Arc<CachedRender> {
        let key = id.cache_key();
        self.purge_expired_at(now);

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.evict_least_recent();
        }

        self.clock += 1;
        let value = Arc::new(value);
        self.entries.insert(
            key,
            Entry {
                value: Arc::clone(&value),
                inserted_at: now,
                last_access: self.clock,
            },
        );
        value
    }

    pub fn remove(&mut self, id: &RepoId) -> Option<Arc<CachedRender>> {
        self.entries.remove(&id.cache_key()).map(|entry| entry.value)
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired_at(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.inserted_at) < ttl);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_expired(&self, entry: &Entry, now: Instant) -> bool {
        now.saturating_duration_since(entry.inserted_at) >= self.ttl
    }

    fn evict_least_recent(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_access)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            tracing::debug!("Evicting cached render {}", key);
            self.entries.remove(&key);
        }
    }
}
