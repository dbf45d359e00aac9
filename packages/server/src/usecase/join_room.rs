//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - メンバー一覧と履歴リプレイの配送
//!
//! ### なぜこのテストが必要か
//! - 途中参加者が最初から参加していた場合と同じ状態を再構築できることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：空のルームへの参加、履歴のあるルームへの参加
//! - 異常系：未登録の接続による参加

use std::sync::Arc;

use crate::domain::{
    ConnectionId, JoinOutcome, RelayError, RepositoryError, RoomKey, RoomRepository,
};

use super::error::JoinError;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl JoinRoomUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// ルームに参加する
    ///
    /// 通話ルームでは `all-users` を、どちらのルームでも `replay` を参加者にだけ送る。
    /// リプレイは参加以降のライブイベントより必ず先に届く。
    pub async fn execute(
        &self,
        connection: ConnectionId,
        room: RoomKey,
    ) -> Result<JoinOutcome, JoinError> {
        let outcome = self
            .repository
            .join_room(room.clone(), connection.clone())
            .await
            .map_err(|e| match e {
                RepositoryError::UnknownConnection(connection) => JoinError::UnknownConnection {
                    connection,
                    room: room.clone(),
                },
                RepositoryError::Relay(RelayError::TargetUnreachable(id)) => {
                    JoinError::JoinerGone(id)
                }
                other => JoinError::Repository(other),
            })?;

        if outcome.created {
            tracing::info!("Room '{}' created by '{}'", room, connection);
        }
        tracing::info!(
            "Connection '{}' joined '{}' ({} other members, {} replayed events)",
            connection,
            room,
            outcome.others.len(),
            outcome.replayed
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            Delivery,
            event::fixtures::{chat, conn, room, stroke},
        },
        infrastructure::repository::InMemoryRoomRepository,
        usecase::PublishEventUseCase,
    };
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_join_empty_room_receives_empty_replay() {
        // テスト項目: 空のルームに参加すると空のリプレイを受け取る
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new(true));
        let (tx, mut rx) = mpsc::unbounded_channel();
        repository.register_connection(conn("a"), tx).await.unwrap();
        rx.try_recv().unwrap();
        let usecase = JoinRoomUseCase::new(repository.clone());

        // when (操作):
        let outcome = usecase
            .execute(conn("a"), RoomKey::board(room("r1")))
            .await
            .unwrap();

        // then (期待する結果):
        assert!(outcome.created);
        assert!(outcome.others.is_empty());
        assert_eq!(
            rx.try_recv().unwrap(),
            Delivery::Replay {
                room: RoomKey::board(room("r1")),
                events: vec![],
            }
        );
    }

    #[tokio::test]
    async fn test_join_call_room_replays_chat_history() {
        // テスト項目: 通話ルームに参加するとメンバー一覧とチャット履歴を受け取る
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new(true));
        let (tx_a, _rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        repository.register_connection(conn("a"), tx_a).await.unwrap();
        repository.register_connection(conn("b"), tx_b).await.unwrap();
        rx_b.try_recv().unwrap();
        let usecase = JoinRoomUseCase::new(repository.clone());
        let publish = PublishEventUseCase::new(repository.clone());
        let call = RoomKey::call(room("r1"));
        usecase.execute(conn("a"), call.clone()).await.unwrap();
        publish
            .execute(conn("a"), chat("r1", "a", "hello"))
            .await
            .unwrap();

        // when (操作):
        let outcome = usecase.execute(conn("b"), call.clone()).await.unwrap();

        // then (期待する結果):
        assert_eq!(outcome.others, vec![conn("a")]);
        assert_eq!(outcome.replayed, 1);
        assert_eq!(
            rx_b.try_recv().unwrap(),
            Delivery::RoomMembers {
                room: call.clone(),
                members: vec![conn("a")],
            }
        );
        assert_eq!(
            rx_b.try_recv().unwrap(),
            Delivery::Replay {
                room: call,
                events: vec![chat("r1", "a", "hello")],
            }
        );
    }

    #[tokio::test]
    async fn test_join_board_room_replays_strokes() {
        // テスト項目: ボードルームの途中参加者はそれまでのストロークを受け取る
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new(true));
        let (tx_a, _rx_a) = mpsc::unbounded_channel();
        let (tx_c, mut rx_c) = mpsc::unbounded_channel();
        repository.register_connection(conn("a"), tx_a).await.unwrap();
        repository.register_connection(conn("c"), tx_c).await.unwrap();
        rx_c.try_recv().unwrap();
        let usecase = JoinRoomUseCase::new(repository.clone());
        let board = RoomKey::board(room("r1"));
        usecase.execute(conn("a"), board.clone()).await.unwrap();
        PublishEventUseCase::new(repository.clone())
            .execute(conn("a"), stroke("r1", 0.0))
            .await
            .unwrap();

        // when (操作):
        usecase.execute(conn("c"), board.clone()).await.unwrap();

        // then (期待する結果):
        assert_eq!(
            rx_c.try_recv().unwrap(),
            Delivery::Replay {
                room: board,
                events: vec![stroke("r1", 0.0)],
            }
        );
    }

    #[tokio::test]
    async fn test_join_unknown_connection_fails() {
        // テスト項目: 未登録の接続の参加はエラーになる
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new(true));
        let usecase = JoinRoomUseCase::new(repository);

        // when (操作):
        let result = usecase
            .execute(conn("ghost"), RoomKey::call(room("r1")))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(JoinError::UnknownConnection {
                connection: conn("ghost"),
                room: RoomKey::call(room("r1")),
            })
        );
    }
}
