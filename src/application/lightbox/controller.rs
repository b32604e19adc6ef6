// SPDX-License-Identifier: MPL-2.0
//! The lightbox index coordinator.
//!
//! [`LightboxController`] keeps the open global index consistent with the
//! page the host currently has loaded. Moves that stay on the page are
//! synchronous; moves that leave it produce a [`FetchRequest`] and park the
//! controller in `OpenPendingFetch` until the host reports back.
//!
//! Every issued request carries a [`FetchTicket`] stamped with a generation
//! counter. Coalescing, closing and re-opening bump the generation, so a
//! completion for a superseded request is recognised and dropped instead of
//! being applied to a viewer that has moved on.

use tracing::{debug, trace, warn};

use super::state::{
    FetchRequest, FetchResolution, FetchTicket, IgnoreReason, LightboxSnapshot, LightboxState,
    Transition,
};
use crate::domain::paging::{to_global, to_local_in, Direction, PageBounds, PageSize};
use crate::error::FetchError;

/// State machine driving a paginated lightbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxController {
    state: LightboxState,
    window: PageBounds,
    page_size: PageSize,
    generation: u64,
}

impl LightboxController {
    /// Creates a closed controller over the page described by `window`.
    #[must_use]
    pub fn new(page_size: PageSize, window: PageBounds) -> Self {
        Self {
            state: LightboxState::Closed,
            window,
            page_size,
            generation: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> LightboxState {
        self.state
    }

    /// Bounds of the page the controller resolves indices against.
    #[must_use]
    pub fn window(&self) -> PageBounds {
        self.window
    }

    #[must_use]
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    #[must_use]
    pub fn is_page_transitioning(&self) -> bool {
        self.state.is_page_transitioning()
    }

    /// Ticket of the request whose completion would currently be applied.
    #[must_use]
    pub fn live_ticket(&self) -> Option<FetchTicket> {
        match self.state {
            LightboxState::OpenPendingFetch { ticket, .. } => Some(ticket),
            _ => None,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> LightboxSnapshot {
        let global_index = self.state.global_index();
        let local_index = global_index.and_then(|g| to_local_in(g, &self.window));
        let displayed_local_index = match self.state {
            LightboxState::OpenPendingFetch { origin, .. } => to_local_in(origin, &self.window),
            _ => local_index,
        };

        LightboxSnapshot {
            is_open: self.state.is_open(),
            global_index,
            local_index,
            displayed_local_index,
            is_page_transitioning: self.state.is_page_transitioning(),
        }
    }

    // =========================================================================
    // User inputs
    // =========================================================================

    /// Opens the viewer on the item the grid shows at `local_index`.
    ///
    /// Re-opening while open jumps to the new index and abandons any
    /// pending fetch.
    pub fn open_lightbox(&mut self, local_index: usize) -> Transition {
        if local_index >= self.window.len {
            return Transition::Ignored(IgnoreReason::OutOfPage { local_index });
        }

        self.abandon_pending();
        let global_index = to_global(local_index, self.window.offset);
        self.state = LightboxState::Open { global_index };
        debug!(global_index, local_index, "lightbox opened");

        Transition::Opened {
            global_index,
            local_index,
        }
    }

    /// Closes the viewer. Always accepted; a fetch in flight is left to
    /// complete and its result will be discarded.
    pub fn close_lightbox(&mut self) -> Transition {
        if !self.state.is_open() {
            return Transition::Ignored(IgnoreReason::NotOpen);
        }

        let had_pending_fetch = self.abandon_pending();
        self.state = LightboxState::Closed;
        debug!(had_pending_fetch, "lightbox closed");

        Transition::Closed { had_pending_fetch }
    }

    pub fn next(&mut self) -> Transition {
        self.navigate(Direction::Forward)
    }

    pub fn prev(&mut self) -> Transition {
        self.navigate(Direction::Backward)
    }

    fn navigate(&mut self, direction: Direction) -> Transition {
        match self.state {
            LightboxState::Closed => Transition::Ignored(IgnoreReason::NotOpen),
            LightboxState::Open { global_index } => {
                let Some(target) = direction.step(global_index, self.window.total_count) else {
                    return Transition::Ignored(edge_reason(direction));
                };

                if let Some(local_index) = to_local_in(target, &self.window) {
                    self.state = LightboxState::Open {
                        global_index: target,
                    };
                    trace!(from = global_index, to = target, "moved within page");
                    return Transition::Moved {
                        from: global_index,
                        to: target,
                        local_index,
                    };
                }

                let request = self.begin_fetch(global_index, target, direction);
                debug!(
                    target,
                    ?direction,
                    offset = request.offset,
                    "page boundary crossed"
                );
                Transition::BoundaryCrossing(request)
            }
            LightboxState::OpenPendingFetch {
                origin,
                target,
                ticket,
                ..
            } => {
                let Some(next_target) = direction.step(target, self.window.total_count) else {
                    return Transition::Ignored(edge_reason(direction));
                };

                // Back on the loaded page: no fetch needed any more.
                if let Some(local_index) = to_local_in(next_target, &self.window) {
                    self.abandon_pending();
                    self.state = LightboxState::Open {
                        global_index: next_target,
                    };
                    debug!(next_target, "pending fetch abandoned, target is on loaded page");
                    return Transition::Moved {
                        from: origin,
                        to: next_target,
                        local_index,
                    };
                }

                if self.page_size.page_offset_for(next_target) == ticket.offset() {
                    self.state = LightboxState::OpenPendingFetch {
                        origin,
                        target: next_target,
                        direction,
                        ticket,
                    };
                    trace!(next_target, "retargeted pending fetch");
                    return Transition::Coalesced {
                        target_global_index: next_target,
                        request: None,
                    };
                }

                let request = self.begin_fetch(origin, next_target, direction);
                debug!(
                    next_target,
                    offset = request.offset,
                    "pending fetch superseded"
                );
                Transition::Coalesced {
                    target_global_index: next_target,
                    request: Some(request),
                }
            }
        }
    }

    // =========================================================================
    // Host callbacks
    // =========================================================================

    /// Reports a fetched page for `ticket`.
    ///
    /// The host installs the page as its current page only when
    /// [`FetchResolution::installs_page`] is true.
    pub fn resolve_fetch(&mut self, ticket: FetchTicket, page: PageBounds) -> FetchResolution {
        let Some((origin, target, direction)) = self.pending_for(ticket) else {
            trace!(generation = ticket.generation(), "stale fetch result discarded");
            return FetchResolution::Discarded;
        };

        if page.total_count == 0 {
            self.window = page;
            self.state = LightboxState::Closed;
            warn!("dataset is empty, closing lightbox");
            return FetchResolution::ClosedEmpty;
        }

        let clamped = target.min(page.total_count - 1);
        let clamped_from = (clamped != target).then_some(target);
        if clamped_from.is_some() {
            warn!(
                requested = target,
                clamped_to = clamped,
                total_count = page.total_count,
                "dataset shrank under the lightbox"
            );
        }

        if let Some(local_index) = to_local_in(clamped, &page) {
            self.window = page;
            self.state = LightboxState::Open {
                global_index: clamped,
            };
            debug!(global_index = clamped, offset = page.offset, "fetched page applied");
            return FetchResolution::Applied {
                global_index: clamped,
                local_index,
                clamped_from,
            };
        }

        if clamped_from.is_some() {
            self.shrink_window(page.total_count);

            if let Some(local_index) = to_local_in(clamped, &self.window) {
                self.state = LightboxState::Open {
                    global_index: clamped,
                };
                return FetchResolution::Settled {
                    global_index: clamped,
                    local_index,
                    clamped_from: target,
                };
            }

            let request = self.begin_fetch(origin, clamped, Direction::between(target, clamped));
            return FetchResolution::Refetch(request);
        }

        let error = FetchError::Rejected(format!(
            "page at offset {} does not contain index {}",
            page.offset, target
        ));
        warn!(%error, ?direction, "fetched page does not match request");
        self.revert(origin, error)
    }

    /// Reports that the fetch for `ticket` failed. The viewer returns to the
    /// index it showed before the crossing; nothing is retried.
    pub fn reject_fetch(&mut self, ticket: FetchTicket, error: FetchError) -> FetchResolution {
        let Some((origin, _, _)) = self.pending_for(ticket) else {
            trace!(generation = ticket.generation(), "stale fetch failure discarded");
            return FetchResolution::Discarded;
        };

        warn!(%error, origin, "page fetch failed, reverting");
        self.revert(origin, error)
    }

    /// Tells the controller the host replaced its current page outside a
    /// boundary fetch (grid pagination, refresh after a deletion).
    ///
    /// If the open index no longer resolves against the new page, a fetch
    /// for the page holding it is requested. A failed fetch then falls back
    /// onto the new page.
    pub fn sync_page(&mut self, page: PageBounds) -> Transition {
        self.window = page;

        let (global_index, origin, pending_ticket) = match self.state {
            LightboxState::Closed => return Transition::Ignored(IgnoreReason::NotOpen),
            LightboxState::Open { global_index } => (global_index, global_index, None),
            LightboxState::OpenPendingFetch {
                origin,
                target,
                ticket,
                ..
            } => (target, origin, Some(ticket)),
        };

        if page.total_count == 0 {
            let had_pending_fetch = self.abandon_pending();
            self.state = LightboxState::Closed;
            return Transition::Closed { had_pending_fetch };
        }

        let clamped = global_index.min(page.total_count - 1);
        let clamped_from = (clamped != global_index).then_some(global_index);

        if let Some(local_index) = to_local_in(clamped, &page) {
            self.abandon_pending();
            self.state = LightboxState::Open {
                global_index: clamped,
            };
            return Transition::Resynced {
                global_index: clamped,
                local_index,
                clamped_from,
            };
        }

        if let Some(ticket) = pending_ticket {
            if ticket.offset() == self.page_size.page_offset_for(clamped) {
                self.state = LightboxState::OpenPendingFetch {
                    origin,
                    target: clamped,
                    direction: Direction::between(origin, clamped),
                    ticket,
                };
                return Transition::Coalesced {
                    target_global_index: clamped,
                    request: None,
                };
            }
        }

        // `origin` stays the item last on screen. It is off the new page, so
        // the snapshot reports no displayed frame until the fetch resolves.
        let direction = Direction::between(page.offset, clamped);
        let request = self.begin_fetch(origin, clamped, direction);
        debug!(
            global_index = clamped,
            offset = request.offset,
            "loaded page no longer holds the open index"
        );
        Transition::BoundaryCrossing(request)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn begin_fetch(&mut self, origin: usize, target: usize, direction: Direction) -> FetchRequest {
        self.generation += 1;
        let offset = self.page_size.page_offset_for(target);
        let ticket = FetchTicket::new(self.generation, offset);
        self.state = LightboxState::OpenPendingFetch {
            origin,
            target,
            direction,
            ticket,
        };

        FetchRequest {
            ticket,
            target_global_index: target,
            direction,
            offset,
            size: self.page_size.value(),
        }
    }

    /// Invalidates the in-flight request, if any. Returns whether there was one.
    fn abandon_pending(&mut self) -> bool {
        if self.state.is_page_transitioning() {
            self.generation += 1;
            true
        } else {
            false
        }
    }

    fn pending_for(&self, ticket: FetchTicket) -> Option<(usize, usize, Direction)> {
        match self.state {
            LightboxState::OpenPendingFetch {
                origin,
                target,
                direction,
                ticket: live,
            } if live == ticket => Some((origin, target, direction)),
            _ => None,
        }
    }

    fn revert(&mut self, origin: usize, error: FetchError) -> FetchResolution {
        match self.fallback_index(origin) {
            Some(global_index) => {
                self.state = LightboxState::Open { global_index };
                FetchResolution::Reverted {
                    global_index,
                    error,
                }
            }
            None => {
                self.state = LightboxState::Closed;
                FetchResolution::Aborted { error }
            }
        }
    }

    /// `index` if it is on the loaded page, else the nearest index that is.
    fn fallback_index(&self, index: usize) -> Option<usize> {
        if self.window.is_empty() {
            return None;
        }
        Some(index.clamp(self.window.offset, self.window.end() - 1))
    }

    fn shrink_window(&mut self, total_count: usize) {
        self.window.total_count = total_count;
        self.window.len = self
            .window
            .len
            .min(total_count.saturating_sub(self.window.offset));
    }
}

impl Default for LightboxController {
    fn default() -> Self {
        Self::new(PageSize::default(), PageBounds::default())
    }
}

fn edge_reason(direction: Direction) -> IgnoreReason {
    match direction {
        Direction::Forward => IgnoreReason::AtEnd,
        Direction::Backward => IgnoreReason::AtStart,
    }
}
