//! Room membership bookkeeping.
//!
//! Holds connection ids only; the outbound channels live in the dispatcher.

use std::collections::{BTreeSet, HashMap};

use super::value_object::{ConnectionId, RoomKey};

/// Result of removing a connection from every room it had joined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Departure {
    /// Rooms the connection was a member of, with the members that remain.
    pub left: Vec<(RoomKey, Vec<ConnectionId>)>,
    /// Subset of `left` whose membership dropped to zero.
    pub emptied: BTreeSet<RoomKey>,
}

#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    memberships: HashMap<RoomKey, Vec<ConnectionId>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `connection` to `room` and return the other members in join order.
    ///
    /// Joining twice is not an error and does not create a second entry; the
    /// first join position is kept.
    pub fn join(&mut self, room: RoomKey, connection: &ConnectionId) -> Vec<ConnectionId> {
        let members = self.memberships.entry(room).or_default();
        if !members.contains(connection) {
            members.push(connection.clone());
        }
        members
            .iter()
            .filter(|member| *member != connection)
            .cloned()
            .collect()
    }

    /// Remove `connection` from every room.
    pub fn leave(&mut self, connection: &ConnectionId) -> Departure {
        let mut departure = Departure::default();

        for (room, members) in self.memberships.iter_mut() {
            let before = members.len();
            members.retain(|member| member != connection);
            if members.len() != before {
                departure.left.push((room.clone(), members.clone()));
                if members.is_empty() {
                    departure.emptied.insert(room.clone());
                }
            }
        }

        for room in &departure.emptied {
            self.memberships.remove(room);
        }
        departure.left.sort_by(|a, b| a.0.cmp(&b.0));
        departure
    }

    /// Members of `room` in join order; empty if the room is unknown.
    pub fn members(&self, room: &RoomKey) -> &[ConnectionId] {
        self.memberships
            .get(room)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn contains_room(&self, room: &RoomKey) -> bool {
        self.memberships.contains_key(room)
    }

    pub fn is_member(&self, room: &RoomKey, connection: &ConnectionId) -> bool {
        self.members(room).contains(connection)
    }

    pub fn room_count(&self) -> usize {
        self.memberships.len()
    }
}
