//! Ordered in-memory mailbox of inbound events.
//!
//! FIFO by arrival. `peek`/`pop` only ever look at the head, preserving
//! strict arrival order per kind; `next` scans for the first entry of a
//! kind and may remove it out of head position, which lets the engine
//! pull one event type forward while leaving older, unmatched entries
//! queued. Entries whose kind is never drained stay queued indefinitely -
//! there is deliberately no eviction policy.

use std::collections::VecDeque;

use crate::event::catalog::{ServerEvent, ServerEventKind};

/// The inbound event mailbox.
///
/// The transport pushes; the reconciliation engine drains. Single
/// threaded by design - arrival is only *observed* at the next drain.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    queue: VecDeque<ServerEvent>,
}

impl EventQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event. Called from the transport side only.
    pub fn push(&mut self, event: ServerEvent) {
        self.queue.push_back(event);
    }

    /// Look at the head if it matches the given kind. Never mutates.
    #[must_use]
    pub fn peek(&self, kind: ServerEventKind) -> Option<&ServerEvent> {
        self.queue.front().filter(|e| e.kind() == kind)
    }

    /// Remove and return the head if it matches the given kind.
    pub fn pop(&mut self, kind: ServerEventKind) -> Option<ServerEvent> {
        if self.peek(kind).is_some() {
            self.queue.pop_front()
        } else {
            None
        }
    }

    /// Return the first queued event of the given kind, scanning from the
    /// front.
    ///
    /// With `remove` set, the entry is deleted from its position - not
    /// necessarily the head - so older entries of other kinds stay queued
    /// for later passes.
    pub fn next(&mut self, kind: ServerEventKind, remove: bool) -> Option<ServerEvent> {
        let index = self.queue.iter().position(|e| e.kind() == kind)?;

        if remove {
            self.queue.remove(index)
        } else {
            self.queue.get(index).cloned()
        }
    }

    /// Number of queued events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
