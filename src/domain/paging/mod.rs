// SPDX-License-Identifier: MPL-2.0
//! Paging types for the domain layer.
//!
//! - [`Page`] / [`PageBounds`]: one window of the dataset
//! - [`translator`]: global ↔ local index conversion
//! - [`PageSize`] / [`CacheCapacity`]: validated paging parameters

mod newtypes;
mod page;
pub mod translator;

pub use newtypes::{CacheCapacity, PageSize};
pub use page::{Page, PageBounds, UpdateOutcome};
pub use translator::{to_global, to_local, to_local_in};

/// Navigation direction inside the lightbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Index one step from `global_index` in this direction, or `None`
    /// when that would leave `[0, total_count)`.
    #[must_use]
    pub fn step(self, global_index: usize, total_count: usize) -> Option<usize> {
        match self {
            Direction::Forward => global_index
                .checked_add(1)
                .filter(|&next| next < total_count),
            Direction::Backward => global_index.checked_sub(1),
        }
    }

    /// Direction that leads from `from` to `to`.
    #[must_use]
    pub fn between(from: usize, to: usize) -> Self {
        if to < from {
            Direction::Backward
        } else {
            Direction::Forward
        }
    }
}
