// SPDX-License-Identifier: MPL-2.0
//! In-memory page source.
//!
//! Serves pages out of a `Vec<MediaItem>` filtered by a [`FilterSet`], with
//! optional latency and injected failures so hosts can exercise slow and
//! flaky backends without a server.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{Days, NaiveDate};
use tracing::{debug, trace};

use crate::application::port::{PageFuture, PageSource};
use crate::domain::filter::FilterSet;
use crate::domain::library::{LibraryItem, MediaId, MediaItem, MediaKind, MediaPatch, Rating};
use crate::domain::paging::Page;
use crate::error::{Error, FetchError, Result};

#[derive(Debug, Default)]
struct State {
    items: Vec<MediaItem>,
    filters: FilterSet,
    /// Fail every n-th request (1-based). `None` disables.
    fail_every: Option<u64>,
    /// Number of upcoming requests to fail outright.
    fail_next: u32,
    requests: u64,
}

impl State {
    fn matching(&self) -> impl Iterator<Item = &MediaItem> {
        self.items.iter().filter(|item| self.filters.matches(item))
    }

    fn page(&self, offset: usize, size: usize) -> Page<MediaItem> {
        let total_count = self.matching().count();
        let items = self.matching().skip(offset).take(size).cloned().collect();
        Page::new(offset, items, total_count)
    }

    /// Counts the request and decides whether it should fail.
    fn should_fail(&mut self) -> Option<u64> {
        self.requests += 1;
        let request = self.requests;

        if self.fail_next > 0 {
            self.fail_next -= 1;
            return Some(request);
        }
        match self.fail_every {
            Some(every) if every > 0 && request % every == 0 => Some(request),
            _ => None,
        }
    }
}

/// Page source backed by a shared in-memory item list.
///
/// Clones share the same dataset, so a host can keep one clone to edit or
/// shrink the data while the library owns another.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    state: Arc<Mutex<State>>,
    latency: Option<Duration>,
}

impl InMemorySource {
    #[must_use]
    pub fn new(items: Vec<MediaItem>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                items,
                ..State::default()
            })),
            latency: None,
        }
    }

    /// Builds a synthetic library of `count` items with varied kinds,
    /// ratings, tags and capture dates.
    #[must_use]
    pub fn generate(count: usize) -> Self {
        Self::new((0..count).map(synthetic_item).collect())
    }

    /// Delays every page by `latency` before it resolves.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency).filter(|d| !d.is_zero());
        self
    }

    /// Fails every `every`-th request. Zero disables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Poisoned`] if the shared state is poisoned.
    pub fn fail_every(&self, every: u64) -> Result<()> {
        self.lock()?.fail_every = Some(every).filter(|&n| n > 0);
        Ok(())
    }

    /// Fails the next `count` requests.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Poisoned`] if the shared state is poisoned.
    pub fn fail_next(&self, count: u32) -> Result<()> {
        self.lock()?.fail_next = count;
        Ok(())
    }

    /// Replaces the active filters.
    ///
    /// # Errors
    ///
    /// Returns the first invalid filter payload, or [`Error::Poisoned`].
    /// The previous filters stay active in both cases.
    pub fn set_filters(&self, filters: FilterSet) -> Result<()> {
        filters.validate()?;
        let mut state = self.lock()?;
        debug!(active = filters.active_count(), "filters replaced");
        state.filters = filters;
        Ok(())
    }

    #[must_use]
    pub fn filters(&self) -> FilterSet {
        self.read().filters.clone()
    }

    /// Number of items passing the current filters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().matching().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of page requests received so far.
    #[must_use]
    pub fn requests(&self) -> u64 {
        self.read().requests
    }

    /// # Errors
    ///
    /// Returns [`Error::Poisoned`] if the shared state is poisoned.
    pub fn push(&self, item: MediaItem) -> Result<()> {
        self.lock()?.items.push(item);
        Ok(())
    }

    /// Deletes an item, shifting every later index down by one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Poisoned`] if the shared state is poisoned.
    pub fn remove(&self, id: &MediaId) -> Result<Option<MediaItem>> {
        let mut state = self.lock()?;
        let position = state.items.iter().position(|item| item.id == *id);
        Ok(position.map(|position| state.items.remove(position)))
    }

    /// Keeps only the first `len` items.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Poisoned`] if the shared state is poisoned.
    pub fn truncate(&self, len: usize) -> Result<()> {
        self.lock()?.items.truncate(len);
        Ok(())
    }

    /// Applies a patch to the stored item. Returns whether anything changed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Poisoned`] if the shared state is poisoned.
    pub fn update(&self, id: &MediaId, patch: &MediaPatch) -> Result<bool> {
        let mut state = self.lock()?;
        Ok(state
            .items
            .iter_mut()
            .find(|item| item.id == *id)
            .is_some_and(|item| item.apply_patch(patch)))
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| Error::Poisoned("in-memory source".to_string()))
    }

    /// Read access for reporting. A poisoned lock still yields the last
    /// written state.
    fn read(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PageSource for InMemorySource {
    type Item = MediaItem;

    fn fetch_page(&self, offset: usize, size: usize) -> PageFuture<MediaItem> {
        let state = Arc::clone(&self.state);
        let latency = self.latency;

        Box::pin(async move {
            let failed = state
                .lock()
                .map_err(|_| FetchError::Rejected("Lock poisoned".to_string()))?
                .should_fail();
            if let Some(request) = failed {
                debug!(request, offset, "injected fetch failure");
                return Err(FetchError::Network(format!(
                    "injected failure on request {request}"
                )));
            }

            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }

            // Read after the delay so the page reflects the dataset at
            // completion time.
            let page = state
                .lock()
                .map_err(|_| FetchError::Rejected("Lock poisoned".to_string()))?
                .page(offset, size);
            trace!(offset, size, len = page.len(), total = page.total_count(), "page served");
            Ok::<_, FetchError>(page)
        })
    }
}

fn synthetic_item(index: usize) -> MediaItem {
    const TAGS: [&str; 5] = ["family", "travel", "work", "pets", "nature"];

    let kind = match index % 7 {
        0 => MediaKind::Video,
        3 => MediaKind::AnimatedImage,
        _ => MediaKind::Image,
    };
    let extension = match kind {
        MediaKind::Video => "mp4",
        MediaKind::AnimatedImage => "gif",
        MediaKind::Image => "jpg",
    };
    let mut item = MediaItem::new(index as u64, format!("IMG_{index:04}.{extension}"))
        .with_kind(kind)
        .with_tags([TAGS[index % TAGS.len()]])
        .with_favorite(index % 5 == 0);

    #[allow(clippy::cast_possible_truncation)]
    let stars = (index % 6) as u8;
    if stars > 0 {
        item = item.with_rating(Rating::new(stars));
    }
    if let Some(date) = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|start| start.checked_add_days(Days::new(index as u64)))
    {
        item = item.with_captured_on(date);
    }
    item
}
