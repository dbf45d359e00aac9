//! UseCase: クライアントコマンドの振り分け
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CommandDispatcher::dispatch() が各ユースケースに正しく委譲すること
//!
//! ### なぜこのテストが必要か
//! - 一つの接続から届いたコマンドが到着順にルームへ反映されることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加、発行、offer / answer、画面共有
//! - 異常系：未登録の接続からの参加

use std::sync::Arc;

use crate::domain::{ClientCommand, ConnectionId, RoomRepository};

use super::{
    error::DispatchError, join_room::JoinRoomUseCase, publish_event::PublishEventUseCase,
    relay_signal::RelaySignalUseCase,
};

/// 検証済みのコマンドを対応するユースケースに渡す
pub struct CommandDispatcher {
    join_room: JoinRoomUseCase,
    publish_event: PublishEventUseCase,
    relay_signal: RelaySignalUseCase,
}

impl CommandDispatcher {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self {
            join_room: JoinRoomUseCase::new(repository.clone()),
            publish_event: PublishEventUseCase::new(repository.clone()),
            relay_signal: RelaySignalUseCase::new(repository),
        }
    }

    /// `origin` から届いたコマンドを一つ処理する
    ///
    /// 宛先不在のシグナルや存在しないルームへのイベントは破棄され、`Ok` を返す。
    pub async fn dispatch(
        &self,
        origin: ConnectionId,
        command: ClientCommand,
    ) -> Result<(), DispatchError> {
        match command {
            ClientCommand::Join(room) => {
                self.join_room.execute(origin, room).await?;
            }
            ClientCommand::Publish(event) => {
                self.publish_event.execute(origin, event).await?;
            }
            ClientCommand::Offer { target, signal } => {
                self.relay_signal.relay_offer(target, origin, signal).await;
            }
            ClientCommand::Answer { caller, signal } => {
                self.relay_signal.relay_answer(caller, origin, signal).await;
            }
            ClientCommand::ScreenShare { room_id, signal } => {
                self.relay_signal
                    .relay_screen_share(room_id, origin, signal)
                    .await;
            }
        }
        Ok(())
    }
}
