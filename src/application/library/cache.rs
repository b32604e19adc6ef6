// SPDX-License-Identifier: MPL-2.0
//! Page cache for instant back-navigation.
//!
//! Fetched pages are kept by offset with LRU eviction so stepping back and
//! forth across a page edge does not hit the page source every time.
//! Edits are written through to cached copies.

use lru::LruCache;
use std::num::NonZeroUsize;

use crate::domain::library::LibraryItem;
use crate::domain::paging::{CacheCapacity, Page};

/// Statistics about page cache performance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of pages currently cached.
    pub page_count: usize,

    /// Number of lookups that found a page.
    pub hits: u64,

    /// Number of lookups that did not.
    pub misses: u64,

    /// Number of pages evicted due to the capacity limit.
    pub evictions: u64,

    /// Number of pages inserted.
    pub insertions: u64,
}

impl CacheStats {
    /// Returns the cache hit rate as a percentage (0.0 - 100.0).
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// LRU cache of fetched pages keyed by page offset.
#[derive(Debug)]
pub struct PageCache<T> {
    /// `None` when caching is disabled.
    cache: Option<LruCache<usize, Page<T>>>,
    stats: CacheStats,
}

impl<T: Clone> PageCache<T> {
    #[must_use]
    pub fn new(capacity: CacheCapacity) -> Self {
        Self {
            cache: NonZeroUsize::new(capacity.value()).map(LruCache::new),
            stats: CacheStats::default(),
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Returns a copy of the page at `offset`, marking it recently used.
    pub fn get(&mut self, offset: usize) -> Option<Page<T>> {
        let cache = self.cache.as_mut()?;
        match cache.get(&offset) {
            Some(page) => {
                self.stats.hits += 1;
                Some(page.clone())
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Stores a page, replacing any older copy at the same offset.
    pub fn insert(&mut self, page: Page<T>) {
        let Some(cache) = self.cache.as_mut() else {
            return;
        };

        let offset = page.offset();
        if let Some((evicted, _)) = cache.push(offset, page) {
            if evicted != offset {
                self.stats.evictions += 1;
            }
        }
        self.stats.insertions += 1;
        self.stats.page_count = cache.len();
    }

    /// Drops every cached page (the dataset changed).
    pub fn invalidate(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
        self.stats.page_count = 0;
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl<T: LibraryItem> PageCache<T> {
    /// Applies an edit to every cached copy of the item.
    pub fn apply_update(&mut self, id: &T::Id, patch: &T::Patch) {
        if let Some(cache) = self.cache.as_mut() {
            for (_, page) in cache.iter_mut() {
                page.apply_update(id, patch);
            }
        }
    }
}
