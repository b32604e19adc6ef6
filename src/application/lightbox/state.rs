// SPDX-License-Identifier: MPL-2.0
//! Lightbox coordinator state and the values it hands to hosts.

use crate::domain::paging::Direction;
use crate::error::FetchError;

/// Identifies one issued page request.
///
/// A completion is only applied if its ticket is the controller's live
/// ticket; anything else belongs to a superseded or abandoned request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    generation: u64,
    offset: usize,
}

impl FetchTicket {
    pub(crate) fn new(generation: u64, offset: usize) -> Self {
        Self { generation, offset }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Offset of the requested page.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// Page-boundary signal: the host must fetch `[offset, offset + size)` and
/// report back with the ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub target_global_index: usize,
    pub direction: Direction,
    pub offset: usize,
    pub size: usize,
}

/// Coordinator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightboxState {
    #[default]
    Closed,
    Open {
        global_index: usize,
    },
    /// The requested neighbor lives on another page that is being fetched.
    /// `origin` is the index shown before the crossing. A failed fetch
    /// restores it, clamped onto the loaded page.
    OpenPendingFetch {
        origin: usize,
        target: usize,
        direction: Direction,
        ticket: FetchTicket,
    },
}

impl LightboxState {
    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(self, LightboxState::Closed)
    }

    #[must_use]
    pub fn is_page_transitioning(&self) -> bool {
        matches!(self, LightboxState::OpenPendingFetch { .. })
    }

    /// The global index the viewer is on or heading to.
    #[must_use]
    pub fn global_index(&self) -> Option<usize> {
        match *self {
            LightboxState::Closed => None,
            LightboxState::Open { global_index } => Some(global_index),
            LightboxState::OpenPendingFetch { target, .. } => Some(target),
        }
    }
}

/// Read-only view of the coordinator for consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LightboxSnapshot {
    pub is_open: bool,
    pub global_index: Option<usize>,
    /// Position of `global_index` on the loaded page, `None` while it lives
    /// on a page still being fetched.
    pub local_index: Option<usize>,
    /// Position the viewer keeps showing meanwhile. `None` when the item
    /// last on screen is not on the loaded page either (the host swapped
    /// pages under the viewer); show a placeholder until the fetch lands.
    pub displayed_local_index: Option<usize>,
    pub is_page_transitioning: bool,
}

/// Why an input had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The viewer is closed.
    NotOpen,
    /// `prev` at global index 0.
    AtStart,
    /// `next` at the dataset's last item.
    AtEnd,
    /// `open_lightbox` with a local index past the loaded page.
    OutOfPage { local_index: usize },
}

/// Result of a user-driven input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Opened {
        global_index: usize,
        local_index: usize,
    },
    /// Synchronous move on the loaded page.
    Moved {
        from: usize,
        to: usize,
        local_index: usize,
    },
    /// The host must service the request.
    BoundaryCrossing(FetchRequest),
    /// A new intent replaced the pending one. `request` is `Some` only when
    /// the new target needs a different page than the one in flight.
    Coalesced {
        target_global_index: usize,
        request: Option<FetchRequest>,
    },
    /// The host replaced the loaded page and the open index still resolves
    /// against it.
    Resynced {
        global_index: usize,
        local_index: usize,
        clamped_from: Option<usize>,
    },
    Closed {
        had_pending_fetch: bool,
    },
    Ignored(IgnoreReason),
}

impl Transition {
    /// The fetch the host has to start, if any.
    #[must_use]
    pub fn fetch_request(&self) -> Option<FetchRequest> {
        match *self {
            Transition::BoundaryCrossing(request) => Some(request),
            Transition::Coalesced { request, .. } => request,
            _ => None,
        }
    }
}

/// Result of reporting a fetch completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResolution {
    /// The fetched page holds the (possibly clamped) target; install it.
    Applied {
        global_index: usize,
        local_index: usize,
        clamped_from: Option<usize>,
    },
    /// The dataset shrank and the clamped index is on the page already
    /// loaded; keep it and drop the fetched one.
    Settled {
        global_index: usize,
        local_index: usize,
        clamped_from: usize,
    },
    /// The dataset shrank and the clamped index lives on yet another page.
    Refetch(FetchRequest),
    /// The dataset is empty; the viewer closed. Install the (empty) page.
    ClosedEmpty,
    /// The request was superseded or the viewer closed; drop the result.
    Discarded,
    /// The fetch failed or returned the wrong page; the viewer is back on
    /// `global_index`. The host surfaces `error`.
    Reverted {
        global_index: usize,
        error: FetchError,
    },
    /// The fetch failed and the loaded page is empty, so there is nothing
    /// to fall back to; the viewer closed.
    Aborted { error: FetchError },
}

impl FetchResolution {
    /// Whether the host should install the fetched page as its current page.
    #[must_use]
    pub fn installs_page(&self) -> bool {
        matches!(
            self,
            FetchResolution::Applied { .. } | FetchResolution::ClosedEmpty
        )
    }
}
