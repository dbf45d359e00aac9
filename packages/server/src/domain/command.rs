//! Validated requests issued by a connection.

use super::{
    event::SessionEvent,
    value_object::{ConnectionId, RoomId, RoomKey, SignalBlob},
};

#[derive(Debug, Clone, PartialEq)]
pub enum ClientCommand {
    /// Join a call room (`join-room`) or a board room (`join-draw-room`).
    Join(RoomKey),
    /// Append a replicable event and fan it out.
    Publish(SessionEvent),
    /// Forward an offer to `target`.
    Offer {
        target: ConnectionId,
        signal: SignalBlob,
    },
    /// Return an answer to the connection that made the offer.
    Answer {
        caller: ConnectionId,
        signal: SignalBlob,
    },
    /// Fan a screen-share signal out to the other members of a call room.
    ScreenShare { room_id: RoomId, signal: SignalBlob },
}
