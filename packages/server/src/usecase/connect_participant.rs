//! UseCase: 接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 接続 ID の採番と送信キューの登録
//!
//! ### なぜこのテストが必要か
//! - 接続直後に自分の ID を知らせる挨拶が必ず最初に届くことを保証
//! - ID の衝突がエラーとして扱われることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続
//! - 異常系：ID の重複、挨拶前の切断

use std::sync::Arc;

use crate::domain::{
    ConnectionId, ConnectionIdFactory, Outbox, RelayError, RepositoryError, RoomRepository,
};

use super::error::ConnectError;

/// 接続のユースケース
pub struct ConnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 新しい接続 ID を採番して登録する
    ///
    /// # Returns
    ///
    /// * `Ok(ConnectionId)` - 採番された ID（`connected` が送信キューに積まれている）
    /// * `Err(ConnectError)` - 登録失敗
    pub async fn execute(&self, outbox: Outbox) -> Result<ConnectionId, ConnectError> {
        let connection = ConnectionIdFactory::generate().map_err(|_| ConnectError::IdGeneration)?;
        self.register(connection, outbox).await
    }

    /// 指定した ID で登録する
    async fn register(
        &self,
        connection: ConnectionId,
        outbox: Outbox,
    ) -> Result<ConnectionId, ConnectError> {
        match self
            .repository
            .register_connection(connection.clone(), outbox)
            .await
        {
            Ok(()) => {
                tracing::info!("Connection '{}' registered", connection);
                Ok(connection)
            }
            Err(RepositoryError::DuplicateConnection(id)) => {
                Err(ConnectError::DuplicateConnectionId(id))
            }
            Err(RepositoryError::Relay(RelayError::TargetUnreachable(id))) => {
                Err(ConnectError::ClosedBeforeGreeting(id))
            }
            Err(e) => {
                tracing::warn!("Unexpected error while registering '{}': {}", connection, e);
                Err(ConnectError::ClosedBeforeGreeting(connection))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Delivery, event::fixtures::conn},
        infrastructure::repository::InMemoryRoomRepository,
    };
    use tokio::sync::mpsc;

    fn create_test_repository() -> Arc<InMemoryRoomRepository> {
        Arc::new(InMemoryRoomRepository::new(true))
    }

    #[tokio::test]
    async fn test_connect_participant_success() {
        // テスト項目: 新規接続が登録され、最初に connected が届く
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = ConnectParticipantUseCase::new(repository.clone());
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        let id = usecase.execute(tx).await.unwrap();

        // then (期待する結果):
        assert_eq!(repository.connection_count().await, 1);
        assert_eq!(
            rx.try_recv().unwrap(),
            Delivery::Connected { connection_id: id }
        );
    }

    #[tokio::test]
    async fn test_connect_participant_duplicate_error() {
        // テスト項目: 既に使われている ID での登録はエラーになる
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = ConnectParticipantUseCase::new(repository.clone());
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        usecase.register(conn("alice"), tx1).await.unwrap();

        // when (操作):
        let result = usecase.register(conn("alice"), tx2).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ConnectError::DuplicateConnectionId(conn("alice")))
        );
        assert_eq!(repository.connection_count().await, 1);
    }

    #[tokio::test]
    async fn test_connect_participant_closed_receiver() {
        // テスト項目: 受信側が閉じている接続は挨拶できずエラーになる
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = ConnectParticipantUseCase::new(repository.clone());
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        // when (操作):
        let result = usecase.register(conn("bob"), tx).await;

        // then (期待する結果):
        assert_eq!(result, Err(ConnectError::ClosedBeforeGreeting(conn("bob"))));
    }
}
