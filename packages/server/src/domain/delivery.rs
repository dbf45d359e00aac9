//! Messages queued for a single connection.

use tokio::sync::mpsc;

use super::{
    event::SessionEvent,
    value_object::{ConnectionId, RoomId, RoomKey, SignalBlob},
};

/// Everything the coordinator can push to a connection.
///
/// The transport layer turns these into wire frames; the domain never
/// serializes.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    /// Greeting carrying the id the server assigned to this connection.
    Connected { connection_id: ConnectionId },
    /// Members that were already in a call room when this connection joined.
    RoomMembers {
        room: RoomKey,
        members: Vec<ConnectionId>,
    },
    /// History batch sent to a joiner before any live event of that room.
    Replay {
        room: RoomKey,
        events: Vec<SessionEvent>,
    },
    /// Live event appended to a room the connection belongs to.
    Event(SessionEvent),
    /// A peer wants to open a media connection with us.
    PeerOffer {
        caller_id: ConnectionId,
        signal: SignalBlob,
    },
    /// A peer answered our offer.
    PeerAnswer {
        responder_id: ConnectionId,
        signal: SignalBlob,
    },
    /// Screen-share negotiation fanned out to a call room.
    ScreenShare {
        room_id: RoomId,
        caller_id: ConnectionId,
        signal: SignalBlob,
    },
    /// A member left a room we are in.
    PeerLeft {
        room: RoomKey,
        connection_id: ConnectionId,
    },
}

/// Sending half of a connection's outbound queue.
///
/// One writer task drains each queue, so deliveries to a connection keep the
/// order in which they were queued.
pub type Outbox = mpsc::UnboundedSender<Delivery>;
