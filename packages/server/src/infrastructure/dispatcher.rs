//! Fan-out of deliveries to connection outboxes.

use std::collections::HashMap;

use crate::domain::{ClearBoard, ConnectionId, Delivery, Outbox, RelayError, RoomId, SessionEvent};

/// Owns the outbound queue of every live connection.
#[derive(Debug, Default)]
pub struct BroadcastDispatcher {
    outboxes: HashMap<ConnectionId, Outbox>,
}

impl BroadcastDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the id is already registered; the existing outbox is kept.
    pub fn register(&mut self, connection: ConnectionId, outbox: Outbox) -> bool {
        if self.outboxes.contains_key(&connection) {
            return false;
        }
        self.outboxes.insert(connection, outbox);
        true
    }

    pub fn unregister(&mut self, connection: &ConnectionId) -> Option<Outbox> {
        self.outboxes.remove(connection)
    }

    pub fn is_connected(&self, connection: &ConnectionId) -> bool {
        self.outboxes
            .get(connection)
            .is_some_and(|outbox| !outbox.is_closed())
    }

    pub fn len(&self) -> usize {
        self.outboxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outboxes.is_empty()
    }

    /// Queue `delivery` for a single connection.
    ///
    /// # Errors
    ///
    /// `RelayError::TargetUnreachable` if the connection is unknown or its
    /// writer has already gone away.
    pub fn send_to(&self, target: &ConnectionId, delivery: Delivery) -> Result<(), RelayError> {
        self.outboxes
            .get(target)
            .ok_or_else(|| RelayError::TargetUnreachable(target.clone()))?
            .send(delivery)
            .map_err(|_| RelayError::TargetUnreachable(target.clone()))
    }

    /// Queue `delivery` for every member except `exclude`. Returns the number
    /// of connections it was queued for.
    pub fn broadcast_to_others(
        &self,
        members: &[ConnectionId],
        exclude: &ConnectionId,
        delivery: &Delivery,
    ) -> usize {
        self.fan_out(members.iter().filter(|member| *member != exclude), delivery)
    }

    /// Queue `delivery` for every member, the originator included.
    pub fn broadcast_to_all(&self, members: &[ConnectionId], delivery: &Delivery) -> usize {
        self.fan_out(members.iter(), delivery)
    }

    /// Tell every member that the board of `room_id` was wiped.
    pub fn notify_clear(&self, members: &[ConnectionId], room_id: &RoomId) -> usize {
        let delivery = Delivery::Event(SessionEvent::ClearBoard(ClearBoard {
            room_id: room_id.clone(),
        }));
        self.broadcast_to_all(members, &delivery)
    }

    fn fan_out<'a>(
        &self,
        targets: impl Iterator<Item = &'a ConnectionId>,
        delivery: &Delivery,
    ) -> usize {
        let mut delivered = 0;
        for target in targets {
            match self.send_to(target, delivery.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!("Dropping delivery: {}", e),
            }
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::fixtures::{conn, room, stroke};
    use tokio::sync::mpsc;

    #[test]
    fn test_broadcast_to_others_skips_origin() {
        // テスト項目: 送信者以外のメンバーにだけ配送される
        // given (前提条件):
        let mut dispatcher = BroadcastDispatcher::new();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        dispatcher.register(conn("a"), tx_a);
        dispatcher.register(conn("b"), tx_b);
        let delivery = Delivery::Event(stroke("r1", 0.0));

        // when (操作):
        let delivered =
            dispatcher.broadcast_to_others(&[conn("a"), conn("b")], &conn("a"), &delivery);

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert!(rx_a.try_recv().is_err());
        assert_eq!(rx_b.try_recv().unwrap(), delivery);
    }

    #[test]
    fn test_notify_clear_reaches_everyone() {
        // テスト項目: クリア通知は送信者を含む全員に届く
        // given (前提条件):
        let mut dispatcher = BroadcastDispatcher::new();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        dispatcher.register(conn("a"), tx_a);
        dispatcher.register(conn("b"), tx_b);

        // when (操作):
        let delivered = dispatcher.notify_clear(&[conn("a"), conn("b")], &room("r1"));

        // then (期待する結果):
        assert_eq!(delivered, 2);
        for rx in [&mut rx_a, &mut rx_b] {
            assert!(matches!(
                rx.try_recv().unwrap(),
                Delivery::Event(SessionEvent::ClearBoard(_))
            ));
        }
    }

    #[test]
    fn test_send_to_unknown_or_closed_target_is_unreachable() {
        // テスト項目: 未登録または切断済みの宛先には TargetUnreachable が返る
        // given (前提条件):
        let mut dispatcher = BroadcastDispatcher::new();
        let (tx, rx) = mpsc::unbounded_channel();
        dispatcher.register(conn("gone"), tx);
        drop(rx);
        let delivery = Delivery::Event(stroke("r1", 0.0));

        // when (操作):
        let unknown = dispatcher.send_to(&conn("nobody"), delivery.clone());
        let closed = dispatcher.send_to(&conn("gone"), delivery);

        // then (期待する結果):
        assert_eq!(unknown, Err(RelayError::TargetUnreachable(conn("nobody"))));
        assert_eq!(closed, Err(RelayError::TargetUnreachable(conn("gone"))));
        assert!(!dispatcher.is_connected(&conn("gone")));
    }

    #[test]
    fn test_register_duplicate_keeps_first() {
        // テスト項目: 同じ ID の二重登録は拒否され、最初の送信先が残る
        // given (前提条件):
        let mut dispatcher = BroadcastDispatcher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();

        // when (操作):
        assert!(dispatcher.register(conn("a"), tx1));
        assert!(!dispatcher.register(conn("a"), tx2));
        dispatcher
            .send_to(&conn("a"), Delivery::Event(stroke("r1", 0.0)))
            .unwrap();

        // then (期待する結果):
        assert!(rx1.try_recv().is_ok());
        assert!(rx2.try_recv().is_err());
        assert_eq!(dispatcher.len(), 1);
    }
}
