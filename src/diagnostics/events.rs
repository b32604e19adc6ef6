// SPDX-License-Identifier: MPL-2.0
//! Lightbox event types for activity tracking.
//!
//! Every controller transition and every discarded or failed fetch is
//! recorded as a [`LightboxEvent`] so hosts can show why the viewer ended
//! up where it is.

use serde::{Deserialize, Serialize};

use crate::domain::paging::Direction;

/// What happened inside the lightbox coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LightboxEvent {
    // ==========================================================================
    // Viewer lifecycle
    // ==========================================================================
    /// The viewer opened at a global index.
    Opened { global_index: usize },

    /// The viewer closed.
    Closed {
        /// Whether a fetch was still in flight when it closed.
        had_pending_fetch: bool,
    },

    // ==========================================================================
    // Navigation
    // ==========================================================================
    /// In-page move, no fetch needed.
    Navigated {
        from: usize,
        to: usize,
    },

    /// The target left the loaded page and a fetch was requested.
    BoundaryCrossed {
        target_global_index: usize,
        direction: Direction,
        page_offset: usize,
        generation: u64,
    },

    /// Another intent arrived while a fetch was in flight.
    Coalesced {
        target_global_index: usize,
        /// Whether a new request replaced the in-flight one.
        refetch: bool,
    },

    // ==========================================================================
    // Fetch completion
    // ==========================================================================
    /// A fetched page was installed.
    FetchApplied {
        page_offset: usize,
        global_index: usize,
    },

    /// A completion arrived for a superseded or abandoned request.
    FetchDiscarded { generation: u64 },

    /// The fetch failed. The viewer reverted to `reverted_to`, or closed
    /// when there was nothing to revert to.
    FetchFailed {
        reverted_to: Option<usize>,
        i18n_key: String,
    },

    /// The dataset shrank and the open index was clamped.
    Clamped {
        requested: usize,
        clamped_to: usize,
        total_count: usize,
    },

    // ==========================================================================
    // Edits
    // ==========================================================================
    /// An edit arrived for an item that is not on the loaded page.
    StaleUpdate,
}

/// An event with its position in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Monotonic sequence number, never reused within a session.
    pub sequence: u64,
    #[serde(flatten)]
    pub event: LightboxEvent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_snake_case_tag() {
        let record = EventRecord {
            sequence: 3,
            event: LightboxEvent::BoundaryCrossed {
                target_global_index: 24,
                direction: Direction::Forward,
                page_offset: 24,
                generation: 1,
            },
        };

        let encoded = toml::to_string(&record).expect("serializable");

        assert!(encoded.contains("event = \"boundary_crossed\""));
        assert!(encoded.contains("direction = \"forward\""));
        assert!(encoded.contains("sequence = 3"));
    }
}
