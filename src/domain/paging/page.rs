// SPDX-License-Identifier: MPL-2.0
//! Page window types.

use crate::domain::library::LibraryItem;

// =============================================================================
// PageBounds
// =============================================================================

/// Where a page sits inside the dataset.
///
/// `len` is the number of items actually delivered, which is smaller than
/// the page size on the last page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageBounds {
    /// Global index of the first item on the page.
    pub offset: usize,
    /// Number of items on the page.
    pub len: usize,
    /// Number of items in the whole dataset when the page was fetched.
    pub total_count: usize,
}

impl PageBounds {
    #[must_use]
    pub fn new(offset: usize, len: usize, total_count: usize) -> Self {
        Self {
            offset,
            len,
            total_count,
        }
    }

    /// Global index one past the last item on the page.
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Returns `true` if `global_index` resides on this page.
    #[must_use]
    pub fn contains(&self, global_index: usize) -> bool {
        global_index >= self.offset && global_index < self.end()
    }

    /// Returns `true` if the page holds the dataset's last item.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.end() >= self.total_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

// =============================================================================
// Page
// =============================================================================

/// Result of applying an edit to a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The item at `local_index` was changed.
    Applied { local_index: usize },
    /// The item was found but already carried the patched values.
    Unchanged { local_index: usize },
    /// No item with that id is on the page.
    Stale,
}

impl UpdateOutcome {
    /// Returns `true` if the item was found on the page.
    #[must_use]
    pub fn is_found(&self) -> bool {
        !matches!(self, UpdateOutcome::Stale)
    }
}

/// One fetched page of items.
///
/// Pages are built by the host when a fetch completes and replaced wholesale
/// by the next fetch. The only in-place mutation is [`Page::apply_update`],
/// which never changes the length or order of the items.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    offset: usize,
    items: Vec<T>,
    total_count: usize,
}

impl<T> Page<T> {
    /// Creates a page. `total_count` is raised to cover the delivered items
    /// if the source under-reports it. An empty page past the end keeps the
    /// reported total.
    #[must_use]
    pub fn new(offset: usize, items: Vec<T>, total_count: usize) -> Self {
        let total_count = if items.is_empty() {
            total_count
        } else {
            total_count.max(offset + items.len())
        };
        Self {
            offset,
            items,
            total_count,
        }
    }

    /// An empty first page of an empty dataset.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            offset: 0,
            items: Vec::new(),
            total_count: 0,
        }
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Item at a page-local index.
    #[must_use]
    pub fn get(&self, local_index: usize) -> Option<&T> {
        self.items.get(local_index)
    }

    #[must_use]
    pub fn bounds(&self) -> PageBounds {
        PageBounds::new(self.offset, self.items.len(), self.total_count)
    }

    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T: LibraryItem> Page<T> {
    /// Local index of the item with `id`, if it is on this page.
    #[must_use]
    pub fn position_of(&self, id: &T::Id) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Merges `patch` into the item with `id`, keeping its position.
    pub fn apply_update(&mut self, id: &T::Id, patch: &T::Patch) -> UpdateOutcome {
        let Some(local_index) = self.position_of(id) else {
            return UpdateOutcome::Stale;
        };

        if self.items[local_index].apply_patch(patch) {
            UpdateOutcome::Applied { local_index }
        } else {
            UpdateOutcome::Unchanged { local_index }
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}
