// SPDX-License-Identifier: MPL-2.0
//! Bounded storage for the lightbox event log.
//!
//! [`BufferCapacity`] comes from `settings.toml`; [`CircularBuffer`] holds
//! the most recent records within it.

use std::collections::VecDeque;

use crate::config::{
    DEFAULT_EVENT_LOG_CAPACITY, MAX_EVENT_LOG_CAPACITY, MIN_EVENT_LOG_CAPACITY,
};

// =============================================================================
// BufferCapacity
// =============================================================================

/// Capacity of the event log, guaranteed to be within 16–4096 events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferCapacity(usize);

impl BufferCapacity {
    /// Creates a new buffer capacity, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(MIN_EVENT_LOG_CAPACITY, MAX_EVENT_LOG_CAPACITY))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }

    /// Returns true if this is the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= MIN_EVENT_LOG_CAPACITY
    }

    /// Returns true if this is the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= MAX_EVENT_LOG_CAPACITY
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self(DEFAULT_EVENT_LOG_CAPACITY)
    }
}

// =============================================================================
// CircularBuffer
// =============================================================================

/// Fixed-size ring that backs the [`EventLog`](super::EventLog).
///
/// The lightbox can run for a whole session, so only the newest
/// transitions are kept: once `capacity` records are held, each new one
/// pushes out the record that came in first. Iteration runs from the
/// earliest surviving record to the latest.
///
/// ```
/// use paged_lightbox::diagnostics::CircularBuffer;
///
/// let mut recent = CircularBuffer::with_raw_capacity(2);
/// recent.push("opened");
/// recent.push("fetch_started");
/// let dropped = recent.push("fetch_resolved");
///
/// assert_eq!(dropped, Some("opened"));
/// assert_eq!(recent.last(), Some(&"fetch_resolved"));
/// ```
#[derive(Debug, Clone)]
pub struct CircularBuffer<T> {
    slots: VecDeque<T>,
    capacity: usize,
}

impl<T> CircularBuffer<T> {
    /// Ring sized by the configured event log capacity.
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self::with_raw_capacity(capacity.value())
    }

    /// Ring of exactly `capacity` slots, bypassing the configured bounds.
    /// A capacity of 0 still holds the latest record.
    #[must_use]
    pub fn with_raw_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Stores `record` and hands back the one it displaced, if the ring
    /// was already full.
    pub fn push(&mut self, record: T) -> Option<T> {
        let displaced = if self.slots.len() == self.capacity {
            self.slots.pop_front()
        } else {
            None
        };
        self.slots.push_back(record);
        displaced
    }

    /// Earliest surviving record first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.slots.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.slots.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops every record. The capacity is kept.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
