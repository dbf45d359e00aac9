//! Repository trait: the single serialization point for room state.
//!
//! Every method is atomic with respect to every other. Implementations must
//! queue deliveries inside the same critical section as the state change that
//! causes them, which is what keeps append and broadcast in one total order
//! per room and puts a joiner's replay ahead of any later live event.

use async_trait::async_trait;

use super::{
    delivery::{Delivery, Outbox},
    entity::RoomPhase,
    error::RepositoryError,
    event::SessionEvent,
    registry::Departure,
    value_object::{ConnectionId, RoomKey, Timestamp},
};

/// What a joiner learned on `join_room`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// Other members in join order.
    pub others: Vec<ConnectionId>,
    /// Number of events in the replay batch.
    pub replayed: usize,
    /// The room did not exist before this join.
    pub created: bool,
}

/// Result of appending and fanning out one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishReceipt {
    pub seq: u64,
    /// Number of connections the event was queued for.
    pub delivered: usize,
}

/// Read-only view of a room for the HTTP API.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSnapshot {
    pub key: RoomKey,
    pub phase: RoomPhase,
    pub created_at: Timestamp,
    pub members: Vec<ConnectionId>,
    pub stored_events: usize,
    pub replay_len: usize,
    pub clears: u64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Register a freshly accepted connection and its outbound queue.
    async fn register_connection(
        &self,
        connection: ConnectionId,
        outbox: Outbox,
    ) -> Result<(), RepositoryError>;

    /// Join `room`, creating it if needed, and queue the member list (call
    /// rooms) and the replay batch for the joiner.
    async fn join_room(
        &self,
        room: RoomKey,
        connection: ConnectionId,
    ) -> Result<JoinOutcome, RepositoryError>;

    /// Append `event` to its room and fan it out according to its echo policy.
    async fn publish(
        &self,
        origin: ConnectionId,
        event: SessionEvent,
    ) -> Result<PublishReceipt, RepositoryError>;

    /// Queue a delivery for one connection.
    async fn send_to(
        &self,
        target: ConnectionId,
        delivery: Delivery,
    ) -> Result<(), RepositoryError>;

    /// Queue a delivery for every member of `room` except `origin`.
    /// Returns the number of recipients.
    async fn send_to_others(
        &self,
        room: RoomKey,
        origin: ConnectionId,
        delivery: Delivery,
    ) -> Result<usize, RepositoryError>;

    /// Drop the connection, leave every room, reclaim emptied rooms and tell
    /// the remaining members.
    async fn disconnect(&self, connection: ConnectionId) -> Result<Departure, RepositoryError>;

    /// Current replay set of `room`; empty if the room does not exist.
    async fn replay(&self, room: RoomKey) -> Vec<SessionEvent>;

    async fn room_snapshots(&self) -> Vec<RoomSnapshot>;

    async fn room_snapshot(&self, room: RoomKey) -> Option<RoomSnapshot>;

    async fn connection_count(&self) -> usize;
}
