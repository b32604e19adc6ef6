// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Paging**: Number of items fetched per page
//! - **Page Cache**: How many fetched pages are kept for instant back-navigation
//! - **Event Log**: Capacity of the lightbox diagnostics ring buffer

// ==========================================================================
// Paging Defaults
// ==========================================================================

/// Default number of items per page (a 6x4 thumbnail grid).
pub const DEFAULT_PAGE_SIZE: usize = 24;

/// Minimum page size.
pub const MIN_PAGE_SIZE: usize = 1;

/// Maximum page size.
pub const MAX_PAGE_SIZE: usize = 500;

// ==========================================================================
// Page Cache Defaults
// ==========================================================================

/// Default number of pages kept in the LRU page cache.
pub const DEFAULT_PAGE_CACHE_PAGES: usize = 4;

/// Minimum page cache size (0 disables caching).
pub const MIN_PAGE_CACHE_PAGES: usize = 0;

/// Maximum page cache size.
pub const MAX_PAGE_CACHE_PAGES: usize = 32;

// ==========================================================================
// Event Log Defaults
// ==========================================================================

/// Default number of lightbox events retained in the event log.
pub const DEFAULT_EVENT_LOG_CAPACITY: usize = 256;

/// Minimum event log capacity.
pub const MIN_EVENT_LOG_CAPACITY: usize = 16;

/// Maximum event log capacity.
pub const MAX_EVENT_LOG_CAPACITY: usize = 4096;
