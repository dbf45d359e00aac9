//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! 全ての状態（メンバーシップ、イベントログ、送信キュー）を一つの Mutex で守り、
//! 状態変更と配送キューへの投入を同じクリティカルセクションで行います。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{
        ConnectionId, ConnectionRegistry, Delivery, Departure, EchoPolicy, JoinOutcome, Namespace,
        Outbox, PublishReceipt, RepositoryError, RoomError, RoomKey,
        RoomLifecycleManager, RoomRepository, RoomSnapshot, SessionEvent, Timestamp,
    },
    infrastructure::dispatcher::BroadcastDispatcher,
};

/// State guarded by the repository lock.
struct Coordinator {
    registry: ConnectionRegistry,
    lifecycle: RoomLifecycleManager,
    dispatcher: BroadcastDispatcher,
}

impl Coordinator {
    fn snapshot(&self, key: &RoomKey) -> Option<RoomSnapshot> {
        let room = self.lifecycle.room(key)?;
        Some(RoomSnapshot {
            key: key.clone(),
            phase: room.phase(),
            created_at: room.created_at,
            members: self.registry.members(key).to_vec(),
            stored_events: room.log().len(),
            replay_len: room.log().replay().len(),
            clears: room.log().epoch(),
        })
    }
}

/// Only members may write to a room or fan out to it.
fn ensure_member(
    registry: &ConnectionRegistry,
    room: &RoomKey,
    origin: &ConnectionId,
) -> Result<(), RoomError> {
    if !registry.contains_room(room) {
        return Err(RoomError::RoomNotFound(room.clone()));
    }
    if !registry.is_member(room, origin) {
        return Err(RoomError::NotAMember {
            room: room.clone(),
            connection: origin.clone(),
        });
    }
    Ok(())
}

/// インメモリ Room Repository 実装
///
/// プロセス起動時に一度だけ作成され、ハンドラーに注入されます。
pub struct InMemoryRoomRepository {
    inner: Mutex<Coordinator>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    ///
    /// `compact_on_clear` はボードのクリア時に不要になったイベントを物理削除するかどうか。
    pub fn new(compact_on_clear: bool) -> Self {
        Self {
            inner: Mutex::new(Coordinator {
                registry: ConnectionRegistry::new(),
                lifecycle: RoomLifecycleManager::new(compact_on_clear),
                dispatcher: BroadcastDispatcher::new(),
            }),
        }
    }
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn register_connection(
        &self,
        connection: ConnectionId,
        outbox: Outbox,
    ) -> Result<(), RepositoryError> {
        let mut inner = self.inner.lock().await;
        if !inner.dispatcher.register(connection.clone(), outbox) {
            return Err(RepositoryError::DuplicateConnection(connection));
        }
        let greeting = Delivery::Connected {
            connection_id: connection.clone(),
        };
        if let Err(e) = inner.dispatcher.send_to(&connection, greeting) {
            inner.dispatcher.unregister(&connection);
            return Err(e.into());
        }
        Ok(())
    }

    async fn join_room(
        &self,
        room: RoomKey,
        connection: ConnectionId,
    ) -> Result<JoinOutcome, RepositoryError> {
        let mut inner = self.inner.lock().await;
        if !inner.dispatcher.is_connected(&connection) {
            return Err(RepositoryError::UnknownConnection(connection));
        }

        let created = inner.lifecycle.activate(&room, Timestamp::now());
        let others = inner.registry.join(room.clone(), &connection);
        let events = inner.lifecycle.replay(&room).unwrap_or_default();
        let replayed = events.len();

        if room.namespace == Namespace::Call {
            inner.dispatcher.send_to(
                &connection,
                Delivery::RoomMembers {
                    room: room.clone(),
                    members: others.clone(),
                },
            )?;
        }
        inner
            .dispatcher
            .send_to(&connection, Delivery::Replay { room, events })?;

        Ok(JoinOutcome {
            others,
            replayed,
            created,
        })
    }

    async fn publish(
        &self,
        origin: ConnectionId,
        event: SessionEvent,
    ) -> Result<PublishReceipt, RepositoryError> {
        let mut inner = self.inner.lock().await;
        let key = event.room_key();
        ensure_member(&inner.registry, &key, &origin)?;

        let echo = event.echo_policy();
        let clear_room = event.is_clear().then(|| event.room_id().clone());
        let live = Delivery::Event(event.clone());
        let seq = inner.lifecycle.append(&key, event)?;

        let members = inner.registry.members(&key);
        let delivered = match (clear_room, echo) {
            (Some(room_id), _) => inner.dispatcher.notify_clear(members, &room_id),
            (None, EchoPolicy::All) => inner.dispatcher.broadcast_to_all(members, &live),
            (None, EchoPolicy::Others) => {
                inner
                    .dispatcher
                    .broadcast_to_others(members, &origin, &live)
            }
        };

        Ok(PublishReceipt { seq, delivered })
    }

    async fn send_to(
        &self,
        target: ConnectionId,
        delivery: Delivery,
    ) -> Result<(), RepositoryError> {
        let inner = self.inner.lock().await;
        inner
            .dispatcher
            .send_to(&target, delivery)
            .map_err(RepositoryError::from)
    }

    async fn send_to_others(
        &self,
        room: RoomKey,
        origin: ConnectionId,
        delivery: Delivery,
    ) -> Result<usize, RepositoryError> {
        let inner = self.inner.lock().await;
        ensure_member(&inner.registry, &room, &origin)?;
        let members = inner.registry.members(&room);
        Ok(inner
            .dispatcher
            .broadcast_to_others(members, &origin, &delivery))
    }

    async fn disconnect(&self, connection: ConnectionId) -> Result<Departure, RepositoryError> {
        let mut inner = self.inner.lock().await;
        if inner.dispatcher.unregister(&connection).is_none() {
            return Err(RepositoryError::UnknownConnection(connection));
        }

        let departure = inner.registry.leave(&connection);
        for key in &departure.emptied {
            let stored = inner.lifecycle.room(key).map_or(0, |room| room.log().len());
            if inner.lifecycle.reclaim(key).is_some() {
                tracing::info!("Room '{}' is empty; discarded {} stored events", key, stored);
            }
        }

        for (key, remaining) in &departure.left {
            let notice = Delivery::PeerLeft {
                room: key.clone(),
                connection_id: connection.clone(),
            };
            inner.dispatcher.broadcast_to_all(remaining, &notice);
        }

        Ok(departure)
    }

    async fn replay(&self, room: RoomKey) -> Vec<SessionEvent> {
        let inner = self.inner.lock().await;
        inner.lifecycle.replay(&room).unwrap_or_default()
    }

    async fn room_snapshots(&self) -> Vec<RoomSnapshot> {
        let inner = self.inner.lock().await;
        let mut keys: Vec<&RoomKey> = inner.lifecycle.rooms().map(|room| &room.key).collect();
        keys.sort();
        keys.into_iter()
            .filter_map(|key| inner.snapshot(key))
            .collect()
    }

    async fn room_snapshot(&self, room: RoomKey) -> Option<RoomSnapshot> {
        let inner = self.inner.lock().await;
        inner.snapshot(&room)
    }

    async fn connection_count(&self) -> usize {
        let inner = self.inner.lock().await;
        inner.dispatcher.len()
    }
}
