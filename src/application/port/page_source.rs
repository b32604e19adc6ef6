// SPDX-License-Identifier: MPL-2.0
//! Page fetching port definition.
//!
//! This module defines the [`PageSource`] trait the library host calls
//! whenever the grid paginates or the lightbox crosses a page boundary.

use futures_util::future::BoxFuture;

use crate::domain::library::LibraryItem;
use crate::domain::paging::Page;
use crate::error::FetchError;

/// Future resolving to one fetched page.
pub type PageFuture<T> = BoxFuture<'static, Result<Page<T>, FetchError>>;

/// Port for fetching library pages.
///
/// Implementations must not assume their futures are polled to completion:
/// hosts may drop a future whose result is no longer wanted. Equally, a
/// future that does complete may have its result discarded.
///
/// # Example
///
/// ```ignore
/// use paged_lightbox::application::port::PageSource;
///
/// async fn first_page<S: PageSource>(source: &S) {
///     match source.fetch_page(0, 24).await {
///         Ok(page) => println!("{} of {} items", page.len(), page.total_count()),
///         Err(e) => eprintln!("Failed to fetch: {e}"),
///     }
/// }
/// ```
pub trait PageSource {
    /// Item type stored in pages.
    type Item: LibraryItem + Send + 'static;

    /// Fetches the items in `[offset, offset + size)` along with the current
    /// dataset size.
    ///
    /// # Errors
    ///
    /// The future resolves to a [`FetchError`] if the backend cannot deliver
    /// the page.
    fn fetch_page(&self, offset: usize, size: usize) -> PageFuture<Self::Item>;
}
