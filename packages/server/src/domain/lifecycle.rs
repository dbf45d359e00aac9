//! Room creation, history access and reclamation.

use std::collections::HashMap;

use super::{
    entity::{Room, RoomPhase},
    error::RoomError,
    event::SessionEvent,
    value_object::{RoomKey, Timestamp},
};

#[derive(Debug, Clone, Default)]
pub struct RoomLifecycleManager {
    rooms: HashMap<RoomKey, Room>,
    compact_on_clear: bool,
}

impl RoomLifecycleManager {
    pub fn new(compact_on_clear: bool) -> Self {
        Self {
            rooms: HashMap::new(),
            compact_on_clear,
        }
    }

    /// Make sure `key` names an active room.
    ///
    /// Returns `true` if the room was created by this call (`Unborn -> Active`).
    pub fn activate(&mut self, key: &RoomKey, now: Timestamp) -> bool {
        let compact_on_clear = self.compact_on_clear;
        let mut created = false;
        let room = self.rooms.entry(key.clone()).or_insert_with(|| {
            created = true;
            Room::new(key.clone(), now, compact_on_clear)
        });
        room.activate();
        created
    }

    /// Membership of `key` dropped to zero: `Active -> Empty -> Deleted`.
    ///
    /// Deletion is immediate. Returns the reclaimed room, already in the
    /// `Deleted` phase, so callers can log what was dropped.
    pub fn reclaim(&mut self, key: &RoomKey) -> Option<Room> {
        let mut room = self.rooms.remove(key)?;
        room.mark_empty();
        room.delete();
        Some(room)
    }

    /// Append `event` to the log of `key`, returning the sequence number.
    ///
    /// # Errors
    ///
    /// `RoomError::RoomNotFound` if the room does not exist or is not active.
    pub fn append(&mut self, key: &RoomKey, event: SessionEvent) -> Result<u64, RoomError> {
        self.rooms
            .get_mut(key)
            .and_then(|room| room.append(event))
            .ok_or_else(|| RoomError::RoomNotFound(key.clone()))
    }

    /// Replay set for a new joiner of `key`.
    ///
    /// # Errors
    ///
    /// `RoomError::RoomNotFound` if the room does not exist. Callers treat
    /// that as an empty history.
    pub fn replay(&self, key: &RoomKey) -> Result<Vec<SessionEvent>, RoomError> {
        self.rooms
            .get(key)
            .map(|room| room.log().replay())
            .ok_or_else(|| RoomError::RoomNotFound(key.clone()))
    }

    pub fn room(&self, key: &RoomKey) -> Option<&Room> {
        self.rooms.get(key)
    }

    pub fn phase(&self, key: &RoomKey) -> Option<RoomPhase> {
        self.rooms.get(key).map(Room::phase)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
