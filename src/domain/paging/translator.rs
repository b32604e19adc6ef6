// SPDX-License-Identifier: MPL-2.0
//! Conversions between dataset-global and page-local indices.
//!
//! A global index addresses an item in the whole dataset; a local index
//! addresses it inside the currently loaded page. The two differ by the
//! page offset. Both directions are pure.

use super::PageBounds;

/// Converts a global index to a page-local one.
///
/// Returns `None` when `global_index` precedes the page (`global < offset`),
/// which is one of the two ways an index can fall off the loaded page.
#[must_use]
pub fn to_local(global_index: usize, page_offset: usize) -> Option<usize> {
    global_index.checked_sub(page_offset)
}

/// Converts a page-local index to a global one.
#[must_use]
pub fn to_global(local_index: usize, page_offset: usize) -> usize {
    local_index + page_offset
}

/// Converts a global index to a local one, checking it actually resides on
/// the page described by `bounds`.
#[must_use]
pub fn to_local_in(global_index: usize, bounds: &PageBounds) -> Option<usize> {
    to_local(global_index, bounds.offset).filter(|&local| local < bounds.len)
}
