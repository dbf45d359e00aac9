//! Domain layer for the coordination service.
//!
//! This module contains room, membership and history rules that are
//! independent of the wire format and the transport.

pub mod command;
pub mod delivery;
pub mod entity;
pub mod error;
pub mod event;
pub mod event_log;
pub mod factory;
pub mod lifecycle;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use command::ClientCommand;
pub use delivery::{Delivery, Outbox};
pub use entity::{Room, RoomPhase};
pub use error::{RelayError, RepositoryError, RoomError, ValueObjectError};
pub use event::{ChatMessage, ClearBoard, EchoPolicy, SessionEvent, StrokeSegment, TextPlacement};
pub use event_log::{LoggedEvent, SessionEventLog};
pub use factory::ConnectionIdFactory;
pub use lifecycle::RoomLifecycleManager;
pub use registry::{ConnectionRegistry, Departure};
pub use repository::{JoinOutcome, PublishReceipt, RoomRepository, RoomSnapshot};
#[cfg(test)]
pub use repository::MockRoomRepository;
pub use value_object::{
    Color, ConnectionId, Font, MessageContent, Namespace, Point, RoomId, RoomKey, SignalBlob,
    StrokeWidth, Timestamp,
};
