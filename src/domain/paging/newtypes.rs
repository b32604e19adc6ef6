// SPDX-License-Identifier: MPL-2.0
//! Paging newtypes.
//!
//! This module provides type-safe wrappers for paging values,
//! ensuring they are always within valid ranges.

use crate::config::{
    DEFAULT_PAGE_CACHE_PAGES, DEFAULT_PAGE_SIZE, MAX_PAGE_CACHE_PAGES, MAX_PAGE_SIZE,
    MIN_PAGE_CACHE_PAGES, MIN_PAGE_SIZE,
};

// =============================================================================
// PageSize
// =============================================================================

/// Number of items requested per page, guaranteed to be within 1–500.
///
/// The page size is fixed for the lifetime of a library session; page
/// offsets are always multiples of it.
///
/// # Example
///
/// ```
/// use paged_lightbox::domain::paging::PageSize;
///
/// let size = PageSize::new(24);
/// assert_eq!(size.value(), 24);
///
/// // Values outside range are clamped
/// assert_eq!(PageSize::new(0).value(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageSize(usize);

impl PageSize {
    /// Creates a new page size, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }

    /// Offset of the page that holds `global_index`.
    #[must_use]
    pub fn page_offset_for(self, global_index: usize) -> usize {
        (global_index / self.0) * self.0
    }

    /// Zero-based page number of the page that holds `global_index`.
    #[must_use]
    pub fn page_number_for(self, global_index: usize) -> usize {
        global_index / self.0
    }

    /// Number of pages needed to hold `total_count` items.
    #[must_use]
    pub fn page_count(self, total_count: usize) -> usize {
        total_count.div_ceil(self.0)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_PAGE_SIZE)
    }
}

// =============================================================================
// CacheCapacity
// =============================================================================

/// Number of pages kept in the page cache (0–32). Zero disables caching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheCapacity(usize);

impl CacheCapacity {
    /// Creates a new cache capacity, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(MIN_PAGE_CACHE_PAGES, MAX_PAGE_CACHE_PAGES))
    }

    /// A capacity that disables caching.
    #[must_use]
    pub fn disabled() -> Self {
        Self(0)
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }

    /// Returns true if caching is turned off.
    #[must_use]
    pub fn is_disabled(self) -> bool {
        self.0 == 0
    }
}

impl Default for CacheCapacity {
    fn default() -> Self {
        Self(DEFAULT_PAGE_CACHE_PAGES)
    }
}
