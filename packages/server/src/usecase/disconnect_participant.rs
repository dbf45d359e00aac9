//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 参加していた全ルームからの退出と `user-left` 通知
//!
//! ### なぜこのテストが必要か
//! - 切断時に同じルームの参加者にだけ通知されることを保証
//! - 最後の参加者が抜けたルームの履歴が破棄されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の切断と通知
//! - エッジケース：最後の参加者の切断（ルームの破棄）
//! - 異常系：存在しない参加者の切断試行

use std::sync::Arc;

use crate::domain::{ConnectionId, Departure, RepositoryError, RoomRepository};

use super::error::DisconnectError;

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Departure)` - 退出したルームと、空になって破棄されたルーム
    /// * `Err(DisconnectError)` - 切断失敗
    pub async fn execute(&self, connection: ConnectionId) -> Result<Departure, DisconnectError> {
        let departure = self
            .repository
            .disconnect(connection.clone())
            .await
            .map_err(|e| match e {
                RepositoryError::UnknownConnection(id) => DisconnectError::UnknownConnection(id),
                other => DisconnectError::Repository(other),
            })?;

        tracing::info!(
            "Connection '{}' disconnected (left {} rooms, {} reclaimed)",
            connection,
            departure.left.len(),
            departure.emptied.len()
        );
        Ok(departure)
    }
}
