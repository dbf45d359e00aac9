//! UseCase: シグナリング中継処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelaySignalUseCase の offer / answer / 画面共有の中継
//!
//! ### なぜこのテストが必要か
//! - シグナルが内容を変えずに宛先にだけ届くことを保証
//! - 宛先がいない場合に送信者へエラーを返さず黙って破棄することを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：offer の転送、answer の返送、画面共有の配信
//! - 異常系：切断済みの宛先、存在しないルーム、未参加の送信者
//!
//! Repository はモックで差し替え、Repository に渡る引数だけを検証します。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, Delivery, RelayError, RepositoryError, RoomError, RoomId, RoomKey,
    RoomRepository, SignalBlob,
};

/// シグナリング中継のユースケース
///
/// 中継はログに残さず、ステートレスに転送するだけです。
pub struct RelaySignalUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl RelaySignalUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// `caller` からの offer を `target` に転送する（`user-joined`）
    ///
    /// 届けられたら `true`。
    pub async fn relay_offer(
        &self,
        target: ConnectionId,
        caller: ConnectionId,
        signal: SignalBlob,
    ) -> bool {
        let delivery = Delivery::PeerOffer {
            caller_id: caller.clone(),
            signal,
        };
        self.deliver(target, caller, delivery).await
    }

    /// `responder` からの answer を offer 元の `caller` に返す（`returned-signal`）
    pub async fn relay_answer(
        &self,
        caller: ConnectionId,
        responder: ConnectionId,
        signal: SignalBlob,
    ) -> bool {
        let delivery = Delivery::PeerAnswer {
            responder_id: responder.clone(),
            signal,
        };
        self.deliver(caller, responder, delivery).await
    }

    /// 画面共有のシグナルを通話ルームの他のメンバー全員に配る
    ///
    /// 配送した接続数を返す。
    pub async fn relay_screen_share(
        &self,
        room_id: RoomId,
        origin: ConnectionId,
        signal: SignalBlob,
    ) -> usize {
        let delivery = Delivery::ScreenShare {
            room_id: room_id.clone(),
            caller_id: origin.clone(),
            signal,
        };
        match self
            .repository
            .send_to_others(RoomKey::call(room_id), origin.clone(), delivery)
            .await
        {
            Ok(delivered) => delivered,
            Err(RepositoryError::Room(RoomError::RoomNotFound(room))) => {
                tracing::debug!(
                    "Screen-share signal from '{}' dropped: room '{}' does not exist",
                    origin,
                    room
                );
                0
            }
            Err(RepositoryError::Room(RoomError::NotAMember { room, .. })) => {
                tracing::warn!(
                    "Screen-share signal from '{}' dropped: not a member of '{}'",
                    origin,
                    room
                );
                0
            }
            Err(e) => {
                tracing::warn!("Screen-share signal from '{}' failed: {}", origin, e);
                0
            }
        }
    }

    async fn deliver(&self, target: ConnectionId, from: ConnectionId, delivery: Delivery) -> bool {
        match self.repository.send_to(target, delivery).await {
            Ok(()) => true,
            Err(RepositoryError::Relay(RelayError::TargetUnreachable(target))) => {
                tracing::debug!("Signal from '{}' dropped: '{}' is unreachable", from, target);
                false
            }
            Err(e) => {
                tracing::warn!("Signal from '{}' failed: {}", from, e);
                false
            }
        }
    }
}
