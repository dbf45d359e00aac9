//! UseCase: セッションイベント発行処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PublishEventUseCase::execute() メソッド
//! - イベントの種類ごとのエコーポリシー
//!
//! ### なぜこのテストが必要か
//! - ストロークは送信者に返さず、テキスト・チャット・クリアは送信者にも返すことを保証
//! - 存在しないルームへのイベントや、未参加の接続からのイベントが破棄されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：ストローク、チャット、クリア
//! - 異常系：参加者のいないルームへの発行、未参加の接続からの発行

use std::sync::Arc;

use crate::domain::{
    ConnectionId, PublishReceipt, RepositoryError, RoomError, RoomRepository, SessionEvent,
};

use super::error::PublishError;

/// セッションイベント発行のユースケース
pub struct PublishEventUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl PublishEventUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// イベントをログに追記して配送する
    ///
    /// # Returns
    ///
    /// * `Ok(Some(PublishReceipt))` - 追記と配送が完了
    /// * `Ok(None)` - ルームが存在しないか、送信者が未参加のため破棄した
    /// * `Err(PublishError)` - それ以外の失敗
    pub async fn execute(
        &self,
        origin: ConnectionId,
        event: SessionEvent,
    ) -> Result<Option<PublishReceipt>, PublishError> {
        let kind = event.kind();
        match self.repository.publish(origin.clone(), event).await {
            Ok(receipt) => {
                tracing::debug!(
                    "'{}' from '{}' stored as seq {} and delivered to {} connections",
                    kind,
                    origin,
                    receipt.seq,
                    receipt.delivered
                );
                Ok(Some(receipt))
            }
            Err(RepositoryError::Room(RoomError::RoomNotFound(room))) => {
                tracing::warn!(
                    "Dropping '{}' from '{}': room '{}' does not exist",
                    kind,
                    origin,
                    room
                );
                Ok(None)
            }
            Err(RepositoryError::Room(RoomError::NotAMember { room, .. })) => {
                tracing::warn!(
                    "Dropping '{}' from '{}': not a member of '{}'",
                    kind,
                    origin,
                    room
                );
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}
