//! Replicable session events.
//!
//! Everything a room remembers is one of these variants. Board events
//! (strokes, text, clear markers) live in board rooms, chat messages in call
//! rooms; [`SessionEvent::room_key`] picks the room an event belongs to.

use serde::{Deserialize, Serialize};

use super::value_object::{
    Color, ConnectionId, Font, MessageContent, Namespace, Point, RoomId, RoomKey, StrokeWidth,
    Timestamp,
};

/// One straight segment of a freehand stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeSegment {
    pub room_id: RoomId,
    pub from: Point,
    pub to: Point,
    pub color: Color,
    pub width: StrokeWidth,
}

/// A text annotation placed on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPlacement {
    pub room_id: RoomId,
    pub text: MessageContent,
    pub at: Point,
    pub font: Font,
    pub color: Color,
}

/// A chat line. The sender and timestamp are stamped by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub room_id: RoomId,
    pub sender_id: ConnectionId,
    pub body: MessageContent,
    pub sent_at: Timestamp,
}

/// Marker that wipes the drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearBoard {
    pub room_id: RoomId,
}

/// Who receives a live event besides the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EchoPolicy {
    /// Every member except the originator (it already rendered optimistically).
    Others,
    /// Every member including the originator (server copy is authoritative).
    All,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    StrokeSegment(StrokeSegment),
    TextPlacement(TextPlacement),
    ChatMessage(ChatMessage),
    ClearBoard(ClearBoard),
}

impl SessionEvent {
    pub fn room_id(&self) -> &RoomId {
        match self {
            SessionEvent::StrokeSegment(e) => &e.room_id,
            SessionEvent::TextPlacement(e) => &e.room_id,
            SessionEvent::ChatMessage(e) => &e.room_id,
            SessionEvent::ClearBoard(e) => &e.room_id,
        }
    }

    pub fn namespace(&self) -> Namespace {
        match self {
            SessionEvent::ChatMessage(_) => Namespace::Call,
            _ => Namespace::Board,
        }
    }

    /// The room this event is appended to and fanned out in.
    pub fn room_key(&self) -> RoomKey {
        RoomKey::new(self.namespace(), self.room_id().clone())
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SessionEvent::StrokeSegment(_) => "draw-segment",
            SessionEvent::TextPlacement(_) => "add-text",
            SessionEvent::ChatMessage(_) => "chat-message",
            SessionEvent::ClearBoard(_) => "clear-board",
        }
    }

    /// Strokes are drawn locally before they are sent; everything else waits
    /// for the server echo.
    pub fn echo_policy(&self) -> EchoPolicy {
        match self {
            SessionEvent::StrokeSegment(_) => EchoPolicy::Others,
            SessionEvent::TextPlacement(_)
            | SessionEvent::ChatMessage(_)
            | SessionEvent::ClearBoard(_) => EchoPolicy::All,
        }
    }

    pub fn is_chat(&self) -> bool {
        matches!(self, SessionEvent::ChatMessage(_))
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, SessionEvent::ClearBoard(_))
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_room_key_follows_event_kind() {
        // テスト項目: チャットは通話ルーム、それ以外はボードルームに属する
        // then (期待する結果):
        assert_eq!(chat("r1", "a", "hi").room_key(), RoomKey::call(room("r1")));
        assert_eq!(stroke("r1", 0.0).room_key(), RoomKey::board(room("r1")));
        assert_eq!(text("r1", "note").room_key(), RoomKey::board(room("r1")));
        assert_eq!(clear("r1").room_key(), RoomKey::board(room("r1")));
    }

    #[test]
    fn test_echo_policy_per_kind() {
        // テスト項目: ストロークだけが送信者へのエコーを行わない
        // then (期待する結果):
        assert_eq!(stroke("r1", 0.0).echo_policy(), EchoPolicy::Others);
        assert_eq!(text("r1", "note").echo_policy(), EchoPolicy::All);
        assert_eq!(chat("r1", "a", "hi").echo_policy(), EchoPolicy::All);
        assert_eq!(clear("r1").echo_policy(), EchoPolicy::All);
    }
}
