// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for recording lightbox activity.
//!
//! This module captures coordinator events in a memory-bounded circular
//! buffer. Each event is also emitted through `tracing` so the same
//! information reaches whatever subscriber the host installed.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Ring holding the newest records within the configured capacity
//! - [`LightboxEvent`]: Enum representing the recorded transitions
//! - [`EventLog`]: Sequenced log the library host writes to

mod buffer;
mod events;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use events::{EventRecord, LightboxEvent};

/// Sequenced, bounded log of [`LightboxEvent`]s.
#[derive(Debug, Clone)]
pub struct EventLog {
    buffer: CircularBuffer<EventRecord>,
    next_sequence: u64,
}

impl EventLog {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self {
            buffer: CircularBuffer::new(capacity),
            next_sequence: 0,
        }
    }

    /// Appends an event, evicting the oldest one when full.
    pub fn record(&mut self, event: LightboxEvent) {
        tracing::trace!(sequence = self.next_sequence, ?event, "lightbox event");
        let displaced = self.buffer.push(EventRecord {
            sequence: self.next_sequence,
            event,
        });
        if let Some(oldest) = displaced {
            tracing::trace!(sequence = oldest.sequence, "event log full, dropped oldest");
        }
        self.next_sequence += 1;
    }

    /// Records oldest first.
    pub fn records(&self) -> impl DoubleEndedIterator<Item = &EventRecord> {
        self.buffer.iter()
    }

    /// Events oldest first, without sequence numbers.
    pub fn events(&self) -> impl DoubleEndedIterator<Item = &LightboxEvent> {
        self.buffer.iter().map(|record| &record.event)
    }

    #[must_use]
    pub fn last(&self) -> Option<&LightboxEvent> {
        self.buffer.last().map(|record| &record.event)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of events ever recorded, including evicted ones.
    #[must_use]
    pub fn total_recorded(&self) -> u64 {
        self.next_sequence
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}
