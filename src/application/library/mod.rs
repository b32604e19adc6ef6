// SPDX-License-Identifier: MPL-2.0
//! The paged library host.
//!
//! [`PagedLibrary`] plays the part of the paginated grid: it owns the
//! current page, one [`LightboxController`], a page cache and an event log,
//! and turns user intents and fetch completions into state changes.
//!
//! It follows the update-loop shape of an iced application: every input is
//! a [`Message`], and [`PagedLibrary::update`] returns at most one
//! [`FetchTask`] for the caller to run. Running the task yields the
//! [`Message::PageFetched`] to feed back in.
//!
//! ```ignore
//! let mut library = PagedLibrary::new(source, &config);
//! let mut task = library.update(Message::GoToPage(0));
//! while let Some(fetch) = task {
//!     let message = fetch.run().await;
//!     task = library.update(message);
//! }
//! ```

mod cache;
mod view;

pub use cache::{CacheStats, PageCache};
pub use view::{GridView, LightboxView};

use std::fmt;

use tracing::{debug, trace, warn};

use super::lightbox::{
    FetchRequest, FetchResolution, FetchTicket, LightboxController, LightboxSnapshot, Transition,
};
use super::port::{PageFuture, PageSource};
use crate::config::Config;
use crate::diagnostics::{EventLog, LightboxEvent};
use crate::domain::library::LibraryItem;
use crate::domain::paging::{Page, PageSize, UpdateOutcome};
use crate::error::FetchError;

// =============================================================================
// Messages and tasks
// =============================================================================

/// Who asked for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOrigin {
    /// A lightbox page-boundary crossing.
    Lightbox(FetchTicket),
    /// Grid pagination or refresh. Only the latest generation is applied.
    Grid { generation: u64 },
}

/// Inputs to the library.
#[derive(Debug)]
pub enum Message<T: LibraryItem> {
    /// Grid click on the item at a page-local index.
    OpenAt(usize),
    Next,
    Prev,
    Close,
    /// Grid pagination to a zero-based page number.
    GoToPage(usize),
    /// Re-fetch the current page (the dataset changed).
    Refresh,
    /// Close the viewer, drop the cache and go back to the first page
    /// (filters changed).
    Reset,
    /// An edit made from inside the lightbox.
    ItemUpdated { id: T::Id, patch: T::Patch },
    /// A fetch completed.
    PageFetched {
        origin: FetchOrigin,
        result: Result<Page<T>, FetchError>,
    },
}

/// A page fetch the caller must run.
pub struct FetchTask<T> {
    origin: FetchOrigin,
    offset: usize,
    size: usize,
    future: PageFuture<T>,
}

impl<T: LibraryItem> FetchTask<T> {
    #[must_use]
    pub fn origin(&self) -> FetchOrigin {
        self.origin
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Awaits the fetch and wraps the result as the message to feed back.
    pub async fn run(self) -> Message<T> {
        let result = self.future.await;
        Message::PageFetched {
            origin: self.origin,
            result,
        }
    }
}

impl<T> fmt::Debug for FetchTask<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchTask")
            .field("origin", &self.origin)
            .field("offset", &self.offset)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// PagedLibrary
// =============================================================================

/// Grid-side host coordinating pages, the lightbox and edits.
pub struct PagedLibrary<S: PageSource> {
    source: S,
    page: Page<S::Item>,
    page_size: PageSize,
    controller: LightboxController,
    cache: PageCache<S::Item>,
    events: EventLog,
    grid_generation: u64,
    grid_loading: bool,
    last_error: Option<FetchError>,
}

impl<S: PageSource> PagedLibrary<S> {
    /// Creates a library with nothing loaded yet. Send
    /// [`Message::GoToPage`]`(0)` to load the first page.
    #[must_use]
    pub fn new(source: S, config: &Config) -> Self {
        Self::with_page(source, config, Page::empty())
    }

    /// Creates a library around an already fetched page. The page is
    /// cached like any fetched one.
    #[must_use]
    pub fn with_page(source: S, config: &Config, page: Page<S::Item>) -> Self {
        let page_size = config.page_size();
        let mut cache = PageCache::new(config.page_cache_capacity());
        // An empty placeholder must not answer the first real load.
        if page.total_count() > 0 {
            cache.insert(page.clone());
        }
        Self {
            controller: LightboxController::new(page_size, page.bounds()),
            cache,
            events: EventLog::new(config.event_log_capacity()),
            source,
            page,
            page_size,
            grid_generation: 0,
            grid_loading: false,
            last_error: None,
        }
    }

    #[must_use]
    pub fn page(&self) -> &Page<S::Item> {
        &self.page
    }

    #[must_use]
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    #[must_use]
    pub fn controller(&self) -> &LightboxController {
        &self.controller
    }

    #[must_use]
    pub fn snapshot(&self) -> LightboxSnapshot {
        self.controller.snapshot()
    }

    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The most recent fetch error, for the host's error display.
    #[must_use]
    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    /// Takes the most recent fetch error, clearing it.
    pub fn take_error(&mut self) -> Option<FetchError> {
        self.last_error.take()
    }

    #[must_use]
    pub fn grid_view(&self) -> GridView<'_, S::Item> {
        let offset = self.page.offset();
        let total_count = self.page.total_count();
        GridView {
            items: self.page.items(),
            offset,
            page_number: self.page_size.page_number_for(offset),
            page_count: self.page_size.page_count(total_count),
            total_count,
            is_loading: self.grid_loading,
        }
    }

    #[must_use]
    pub fn lightbox_view(&self) -> LightboxView<'_, S::Item> {
        let snapshot = self.controller.snapshot();
        LightboxView {
            images: self.page.items(),
            initial_index: snapshot.displayed_local_index,
            is_open: snapshot.is_open,
            is_loading: snapshot.is_page_transitioning,
            global_index: snapshot.global_index,
            total_count: self.page.total_count(),
        }
    }

    /// Applies an in-viewer edit to the displayed page and every cached
    /// copy. Indices are never affected.
    pub fn on_item_updated(
        &mut self,
        id: &<S::Item as LibraryItem>::Id,
        patch: &<S::Item as LibraryItem>::Patch,
    ) -> UpdateOutcome {
        self.cache.apply_update(id, patch);
        let outcome = self.page.apply_update(id, patch);

        if outcome == UpdateOutcome::Stale {
            debug!(?id, "edit for item not on the loaded page ignored");
            self.events.record(LightboxEvent::StaleUpdate);
        }
        outcome
    }

    /// Handles one input, returning the fetch to run next, if any.
    pub fn update(&mut self, message: Message<S::Item>) -> Option<FetchTask<S::Item>> {
        match message {
            Message::OpenAt(local_index) => {
                let transition = self.controller.open_lightbox(local_index);
                self.after_transition(transition)
            }
            Message::Next => {
                let transition = self.controller.next();
                self.after_transition(transition)
            }
            Message::Prev => {
                let transition = self.controller.prev();
                self.after_transition(transition)
            }
            Message::Close => {
                let transition = self.controller.close_lightbox();
                self.after_transition(transition)
            }
            Message::GoToPage(page_number) => {
                let last_page = self
                    .page_size
                    .page_count(self.page.total_count())
                    .saturating_sub(1);
                // Before the first load the total is unknown, so don't clamp.
                let page_number = if self.page.total_count() == 0 {
                    page_number
                } else {
                    page_number.min(last_page)
                };
                self.go_to_offset(page_number * self.page_size.value())
            }
            Message::Refresh => {
                self.cache.invalidate();
                self.go_to_offset(self.page.offset())
            }
            Message::Reset => {
                self.cache.invalidate();
                let transition = self.controller.close_lightbox();
                self.record_transition(&transition);
                self.go_to_offset(0)
            }
            Message::ItemUpdated { id, patch } => {
                self.on_item_updated(&id, &patch);
                None
            }
            Message::PageFetched {
                origin: FetchOrigin::Lightbox(ticket),
                result,
            } => self.lightbox_page_fetched(ticket, result),
            Message::PageFetched {
                origin: FetchOrigin::Grid { generation },
                result,
            } => self.grid_page_fetched(generation, result),
        }
    }

    // =========================================================================
    // Lightbox fetches
    // =========================================================================

    fn after_transition(&mut self, transition: Transition) -> Option<FetchTask<S::Item>> {
        self.record_transition(&transition);
        transition
            .fetch_request()
            .and_then(|request| self.start_lightbox_fetch(request))
    }

    fn start_lightbox_fetch(&mut self, request: FetchRequest) -> Option<FetchTask<S::Item>> {
        if let Some(page) = self.cache.get(request.offset) {
            debug!(offset = request.offset, "boundary page served from cache");
            return self.apply_lightbox_page(request.ticket, page);
        }

        Some(FetchTask {
            origin: FetchOrigin::Lightbox(request.ticket),
            offset: request.offset,
            size: request.size,
            future: self.source.fetch_page(request.offset, request.size),
        })
    }

    fn lightbox_page_fetched(
        &mut self,
        ticket: FetchTicket,
        result: Result<Page<S::Item>, FetchError>,
    ) -> Option<FetchTask<S::Item>> {
        match result {
            Ok(page) => {
                self.note_dataset_size(page.total_count());
                self.cache.insert(page.clone());
                self.apply_lightbox_page(ticket, page)
            }
            Err(error) => {
                let resolution = self.controller.reject_fetch(ticket, error);
                self.record_resolution(&resolution, ticket, None);
                self.remember_error(resolution);
                None
            }
        }
    }

    fn apply_lightbox_page(
        &mut self,
        ticket: FetchTicket,
        page: Page<S::Item>,
    ) -> Option<FetchTask<S::Item>> {
        let resolution = self.controller.resolve_fetch(ticket, page.bounds());
        self.record_resolution(&resolution, ticket, Some(page.offset()));

        match resolution {
            FetchResolution::Applied { .. } | FetchResolution::ClosedEmpty => {
                self.page = page;
                self.last_error = None;
                None
            }
            FetchResolution::Refetch(request) => self.start_lightbox_fetch(request),
            // The loaded page still holds items that no longer exist.
            FetchResolution::Settled { .. } => {
                self.cache.invalidate();
                self.go_to_offset(self.page.offset())
            }
            FetchResolution::Discarded => None,
            resolution @ (FetchResolution::Reverted { .. } | FetchResolution::Aborted { .. }) => {
                self.remember_error(resolution);
                None
            }
        }
    }

    fn remember_error(&mut self, resolution: FetchResolution) {
        match resolution {
            FetchResolution::Reverted { error, .. } | FetchResolution::Aborted { error } => {
                self.last_error = Some(error);
            }
            _ => {}
        }
    }

    // =========================================================================
    // Grid fetches
    // =========================================================================

    fn go_to_offset(&mut self, offset: usize) -> Option<FetchTask<S::Item>> {
        self.grid_generation += 1;
        let generation = self.grid_generation;

        if let Some(page) = self.cache.get(offset) {
            self.grid_loading = false;
            return self.install_grid_page(page);
        }

        self.grid_loading = true;
        let size = self.page_size.value();
        Some(FetchTask {
            origin: FetchOrigin::Grid { generation },
            offset,
            size,
            future: self.source.fetch_page(offset, size),
        })
    }

    fn grid_page_fetched(
        &mut self,
        generation: u64,
        result: Result<Page<S::Item>, FetchError>,
    ) -> Option<FetchTask<S::Item>> {
        if generation != self.grid_generation {
            trace!(generation, "superseded grid page discarded");
            if let Ok(page) = result {
                self.cache.insert(page);
            }
            return None;
        }
        self.grid_loading = false;

        match result {
            Ok(page) => {
                self.note_dataset_size(page.total_count());
                self.cache.insert(page.clone());
                self.install_grid_page(page)
            }
            Err(error) => {
                warn!(%error, "grid page fetch failed");
                self.last_error = Some(error);
                None
            }
        }
    }

    fn install_grid_page(&mut self, page: Page<S::Item>) -> Option<FetchTask<S::Item>> {
        let bounds = page.bounds();
        self.page = page;
        self.last_error = None;
        let transition = self.controller.sync_page(bounds);
        self.after_transition(transition)
    }

    /// Cached pages describe an older dataset once the total changes.
    fn note_dataset_size(&mut self, total_count: usize) {
        if total_count != self.page.total_count() && self.page.total_count() != 0 {
            debug!(
                old = self.page.total_count(),
                new = total_count,
                "dataset size changed, dropping cached pages"
            );
            self.cache.invalidate();
        }
    }

    // =========================================================================
    // Event log
    // =========================================================================

    fn record_transition(&mut self, transition: &Transition) {
        let event = match *transition {
            Transition::Opened { global_index, .. } => LightboxEvent::Opened { global_index },
            Transition::Moved { from, to, .. } => LightboxEvent::Navigated { from, to },
            Transition::BoundaryCrossing(request) => boundary_event(&request),
            Transition::Coalesced {
                target_global_index,
                request,
            } => LightboxEvent::Coalesced {
                target_global_index,
                refetch: request.is_some(),
            },
            Transition::Resynced {
                global_index,
                clamped_from: Some(requested),
                ..
            } => LightboxEvent::Clamped {
                requested,
                clamped_to: global_index,
                total_count: self.page.total_count(),
            },
            Transition::Closed { had_pending_fetch } => {
                LightboxEvent::Closed { had_pending_fetch }
            }
            Transition::Resynced { .. } | Transition::Ignored(_) => return,
        };
        self.events.record(event);
    }

    fn record_resolution(
        &mut self,
        resolution: &FetchResolution,
        ticket: FetchTicket,
        page_offset: Option<usize>,
    ) {
        match resolution {
            FetchResolution::Applied {
                global_index,
                clamped_from,
                ..
            } => {
                if let Some(requested) = *clamped_from {
                    self.events.record(LightboxEvent::Clamped {
                        requested,
                        clamped_to: *global_index,
                        total_count: self.controller.window().total_count,
                    });
                }
                self.events.record(LightboxEvent::FetchApplied {
                    page_offset: page_offset.unwrap_or(ticket.offset()),
                    global_index: *global_index,
                });
            }
            FetchResolution::Settled {
                global_index,
                clamped_from,
                ..
            } => self.events.record(LightboxEvent::Clamped {
                requested: *clamped_from,
                clamped_to: *global_index,
                total_count: self.controller.window().total_count,
            }),
            FetchResolution::Refetch(request) => self.events.record(boundary_event(request)),
            FetchResolution::ClosedEmpty => self.events.record(LightboxEvent::Closed {
                had_pending_fetch: true,
            }),
            FetchResolution::Discarded => self.events.record(LightboxEvent::FetchDiscarded {
                generation: ticket.generation(),
            }),
            FetchResolution::Reverted {
                global_index,
                error,
            } => self.events.record(LightboxEvent::FetchFailed {
                reverted_to: Some(*global_index),
                i18n_key: error.i18n_key().to_string(),
            }),
            FetchResolution::Aborted { error } => self.events.record(LightboxEvent::FetchFailed {
                reverted_to: None,
                i18n_key: error.i18n_key().to_string(),
            }),
        }
    }
}

fn boundary_event(request: &FetchRequest) -> LightboxEvent {
    LightboxEvent::BoundaryCrossed {
        target_global_index: request.target_global_index,
        direction: request.direction,
        page_offset: request.offset,
        generation: request.ticket.generation(),
    }
}
