//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{ConnectionId, RepositoryError, RoomKey};

/// 接続処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error("failed to generate a connection id")]
    IdGeneration,

    #[error("connection id '{0}' is already in use")]
    DuplicateConnectionId(ConnectionId),

    #[error("connection '{0}' closed before it could be greeted")]
    ClosedBeforeGreeting(ConnectionId),
}

/// ルーム参加処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinError {
    #[error("connection '{connection}' is not registered; cannot join '{room}'")]
    UnknownConnection {
        connection: ConnectionId,
        room: RoomKey,
    },

    #[error("joiner '{0}' went away during join")]
    JoinerGone(ConnectionId),

    #[error(transparent)]
    Repository(RepositoryError),
}

/// イベント発行処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PublishError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// 切断処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DisconnectError {
    #[error("connection '{0}' was not registered")]
    UnknownConnection(ConnectionId),

    #[error(transparent)]
    Repository(RepositoryError),
}

/// コマンド振り分け処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error(transparent)]
    Join(#[from] JoinError),

    #[error(transparent)]
    Publish(#[from] PublishError),
}
