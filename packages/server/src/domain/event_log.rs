//! Append-only per-room event log.
//!
//! The log is the source of truth for late joiners. A `ClearBoard` marker
//! hides every board event before it from replay; chat lines are never
//! hidden, clearing the board does not clear the conversation.

use serde::Serialize;

use super::event::SessionEvent;

/// An event together with its bookkeeping position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggedEvent {
    /// Number of `ClearBoard` markers appended before this event.
    pub epoch: u64,
    /// Position within the epoch, starting at 0.
    pub seq: u64,
    pub event: SessionEvent,
}

#[derive(Debug, Clone, Default)]
pub struct SessionEventLog {
    entries: Vec<LoggedEvent>,
    epoch: u64,
    next_seq: u64,
    compact_on_clear: bool,
}

impl SessionEventLog {
    /// Create an empty log.
    ///
    /// With `compact_on_clear`, entries hidden by a `ClearBoard` are dropped
    /// physically when the marker is appended. Replay output is identical
    /// either way.
    pub fn new(compact_on_clear: bool) -> Self {
        Self {
            compact_on_clear,
            ..Self::default()
        }
    }

    /// Append an event and return its sequence number.
    ///
    /// Sequence numbers restart at 0 after each `ClearBoard`.
    pub fn append(&mut self, event: SessionEvent) -> u64 {
        let seq = self.next_seq;
        let is_clear = event.is_clear();
        self.entries.push(LoggedEvent {
            epoch: self.epoch,
            seq,
            event,
        });

        if is_clear {
            self.epoch += 1;
            self.next_seq = 0;
            if self.compact_on_clear {
                self.entries.retain(|entry| entry.event.is_chat());
            }
        } else {
            self.next_seq += 1;
        }
        seq
    }

    /// Events a new joiner needs to reconstruct the current state, in log order.
    ///
    /// Chat messages are always included. Board events are included only if
    /// they come after the last `ClearBoard`. Markers themselves are omitted.
    pub fn replay(&self) -> Vec<SessionEvent> {
        let last_clear = self.entries.iter().rposition(|e| e.event.is_clear());
        self.entries
            .iter()
            .enumerate()
            .filter(|(index, entry)| {
                entry.event.is_chat()
                    || (!entry.event.is_clear() && last_clear.is_none_or(|k| *index > k))
            })
            .map(|(_, entry)| entry.event.clone())
            .collect()
    }

    /// Number of physically stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of `ClearBoard` markers appended so far.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}
