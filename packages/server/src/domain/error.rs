//! Domain layer error definitions.

use thiserror::Error;

use super::value_object::{ConnectionId, RoomKey};

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueObjectError {
    #[error("ConnectionId cannot be empty")]
    ConnectionIdEmpty,

    #[error("RoomId cannot be empty")]
    RoomIdEmpty,

    #[error("unknown room namespace '{0}'")]
    UnknownNamespace(String),

    #[error("MessageContent cannot be empty")]
    MessageContentEmpty,

    #[error("MessageContent cannot exceed {max} bytes (got {actual})")]
    MessageContentTooLong { max: usize, actual: usize },

    #[error("color cannot be empty")]
    ColorEmpty,

    #[error("coordinates must be finite numbers")]
    NonFiniteCoordinate,

    #[error("stroke width must be a positive finite number (got {0})")]
    InvalidStrokeWidth(f64),

    #[error("font cannot be empty")]
    FontEmpty,

    #[error("signal payload is missing")]
    SignalMissing,
}

/// Errors related to room state
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoomError {
    /// The room has no tracked membership (never joined, or already reclaimed).
    #[error("room '{0}' not found")]
    RoomNotFound(RoomKey),

    /// The sender has not joined the room it addressed.
    #[error("connection '{connection}' is not a member of '{room}'")]
    NotAMember {
        room: RoomKey,
        connection: ConnectionId,
    },
}

/// Errors related to point-to-point signaling
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// The addressed connection is not (or no longer) connected.
    #[error("connection '{0}' is not reachable")]
    TargetUnreachable(ConnectionId),
}

/// Errors surfaced by a [`RoomRepository`](super::repository::RoomRepository)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error(transparent)]
    Room(#[from] RoomError),

    #[error(transparent)]
    Relay(#[from] RelayError),

    /// A connection with this id is already registered.
    #[error("connection '{0}' is already registered")]
    DuplicateConnection(ConnectionId),

    /// The originating connection is not registered.
    #[error("connection '{0}' is not registered")]
    UnknownConnection(ConnectionId),
}
