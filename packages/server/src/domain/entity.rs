//! Core domain models for the coordination service.

use super::{
    event::SessionEvent,
    event_log::SessionEventLog,
    value_object::{RoomKey, Timestamp},
};

/// Lifecycle phase of a room.
///
/// ```text
/// Unborn -> Active <-> Empty -> Deleted
/// ```
///
/// `Deleted` is terminal; a later join with the same key creates a new room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomPhase {
    Unborn,
    Active,
    Empty,
    Deleted,
}

/// A room with its event history.
///
/// Membership is tracked by the
/// [`ConnectionRegistry`](super::registry::ConnectionRegistry); the room only
/// knows its phase and log.
#[derive(Debug, Clone)]
pub struct Room {
    pub key: RoomKey,
    pub created_at: Timestamp,
    phase: RoomPhase,
    log: SessionEventLog,
}

impl Room {
    /// Create a room in the `Unborn` phase.
    pub fn new(key: RoomKey, created_at: Timestamp, compact_on_clear: bool) -> Self {
        Self {
            key,
            created_at,
            phase: RoomPhase::Unborn,
            log: SessionEventLog::new(compact_on_clear),
        }
    }

    pub fn phase(&self) -> RoomPhase {
        self.phase
    }

    pub fn log(&self) -> &SessionEventLog {
        &self.log
    }

    /// A member joined. Returns `false` if the room is already deleted.
    pub fn activate(&mut self) -> bool {
        match self.phase {
            RoomPhase::Unborn | RoomPhase::Active | RoomPhase::Empty => {
                self.phase = RoomPhase::Active;
                true
            }
            RoomPhase::Deleted => false,
        }
    }

    /// The last member left.
    pub fn mark_empty(&mut self) {
        if self.phase == RoomPhase::Active {
            self.phase = RoomPhase::Empty;
        }
    }

    /// Drop the history and enter the terminal phase.
    pub fn delete(&mut self) {
        self.phase = RoomPhase::Deleted;
        self.log = SessionEventLog::default();
    }

    /// Append to the log. Only active rooms accept events.
    pub fn append(&mut self, event: SessionEvent) -> Option<u64> {
        (self.phase == RoomPhase::Active).then(|| self.log.append(event))
    }
}
