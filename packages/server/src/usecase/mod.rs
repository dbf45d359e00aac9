//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層（RoomRepository）を操作します。

pub mod connect_participant;
pub mod disconnect_participant;
pub mod dispatch;
pub mod error;
pub mod join_room;
pub mod publish_event;
pub mod relay_signal;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use dispatch::CommandDispatcher;
pub use error::{ConnectError, DisconnectError, DispatchError, JoinError, PublishError};
pub use join_room::JoinRoomUseCase;
pub use publish_event::PublishEventUseCase;
pub use relay_signal::RelaySignalUseCase;
