// SPDX-License-Identifier: MPL-2.0
//! Render props for the grid and the lightbox.
//!
//! Both consumers are pure display surfaces: everything they need is in
//! these borrowed views, built fresh from the library on every render.

/// What the paginated grid renders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridView<'a, T> {
    pub items: &'a [T],
    /// Global index of `items[0]`.
    pub offset: usize,
    /// Zero-based page number.
    pub page_number: usize,
    pub page_count: usize,
    pub total_count: usize,
    /// A grid page fetch is in flight.
    pub is_loading: bool,
}

impl<T> GridView<'_, T> {
    #[must_use]
    pub fn has_previous_page(&self) -> bool {
        self.page_number > 0
    }

    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.page_number + 1 < self.page_count
    }
}

/// What the lightbox renders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightboxView<'a, T> {
    pub images: &'a [T],
    /// Index into `images` of the item on screen. `None` while a fetch is
    /// bringing back a page that `images` does not hold; render a
    /// placeholder.
    pub initial_index: Option<usize>,
    pub is_open: bool,
    /// A page-boundary fetch is in flight; the current image stays up.
    pub is_loading: bool,
    /// Global index being viewed (or requested), for the position counter.
    pub global_index: Option<usize>,
    pub total_count: usize,
}

impl<'a, T> LightboxView<'a, T> {
    /// The item on screen.
    #[must_use]
    pub fn current(&self) -> Option<&'a T> {
        if self.is_open {
            self.initial_index.and_then(|index| self.images.get(index))
        } else {
            None
        }
    }

    /// One-based "position / total" counter text.
    #[must_use]
    pub fn position_label(&self) -> Option<String> {
        self.global_index
            .filter(|_| self.is_open)
            .map(|index| format!("{} / {}", index + 1, self.total_count))
    }
}
