//! WebSocket message DTOs.
//!
//! Every frame is a JSON object tagged by `event` (kebab-case) with camelCase
//! payload fields. Inbound frames are validated into a [`ClientCommand`];
//! outbound frames are built from a [`Delivery`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    ChatMessage, ClearBoard, ClientCommand, Color, ConnectionId, Delivery, Font, MessageContent,
    Point, RoomId, RoomKey, SessionEvent, SignalBlob, StrokeSegment, StrokeWidth, TextPlacement,
    Timestamp, ValueObjectError,
};

/// An inbound frame that cannot be turned into a command.
///
/// The frame is dropped; the connection stays open.
#[derive(Debug, Error)]
pub enum MalformedEvent {
    #[error("unparsable frame: {0}")]
    Unparsable(#[from] serde_json::Error),

    #[error("invalid field '{field}' in '{event}': {source}")]
    InvalidField {
        event: &'static str,
        field: &'static str,
        #[source]
        source: ValueObjectError,
    },
}

/// Frames accepted from clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ClientMessage {
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_id: String },

    #[serde(rename_all = "camelCase")]
    SendSignal {
        target_connection_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        origin_connection_id: Option<String>,
        #[serde(default)]
        signal: serde_json::Value,
    },

    #[serde(rename_all = "camelCase")]
    ReturnSignal {
        caller_id: String,
        #[serde(default)]
        signal: serde_json::Value,
    },

    #[serde(rename_all = "camelCase")]
    SendChat { room_id: String, text: String },

    #[serde(rename_all = "camelCase")]
    JoinDrawRoom { room_id: String },

    #[serde(rename_all = "camelCase")]
    DrawSegment {
        room_id: String,
        from_x: f64,
        from_y: f64,
        to_x: f64,
        to_y: f64,
        color: String,
        width: f64,
    },

    #[serde(rename_all = "camelCase")]
    AddText {
        room_id: String,
        text: String,
        x: f64,
        y: f64,
        font: String,
        color: String,
    },

    #[serde(rename_all = "camelCase")]
    ClearBoard { room_id: String },

    #[serde(rename_all = "camelCase")]
    ScreenShareSignal {
        room_id: String,
        #[serde(default)]
        signal: serde_json::Value,
    },
}

impl ClientMessage {
    /// Parse a text frame.
    pub fn parse(text: &str) -> Result<Self, MalformedEvent> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn event_name(&self) -> &'static str {
        match self {
            ClientMessage::JoinRoom { .. } => "join-room",
            ClientMessage::SendSignal { .. } => "send-signal",
            ClientMessage::ReturnSignal { .. } => "return-signal",
            ClientMessage::SendChat { .. } => "send-chat",
            ClientMessage::JoinDrawRoom { .. } => "join-draw-room",
            ClientMessage::DrawSegment { .. } => "draw-segment",
            ClientMessage::AddText { .. } => "add-text",
            ClientMessage::ClearBoard { .. } => "clear-board",
            ClientMessage::ScreenShareSignal { .. } => "screen-share-signal",
        }
    }

    /// Validate the frame into a command issued by `origin`.
    ///
    /// Sender ids are always taken from the transport, never from the payload.
    pub fn into_command(
        self,
        origin: &ConnectionId,
        now: Timestamp,
    ) -> Result<ClientCommand, MalformedEvent> {
        let event = self.event_name();
        let field = |field: &'static str| {
            move |source: ValueObjectError| MalformedEvent::InvalidField {
                event,
                field,
                source,
            }
        };

        let command = match self {
            ClientMessage::JoinRoom { room_id } => {
                ClientCommand::Join(RoomKey::call(RoomId::new(room_id).map_err(field("roomId"))?))
            }
            ClientMessage::JoinDrawRoom { room_id } => ClientCommand::Join(RoomKey::board(
                RoomId::new(room_id).map_err(field("roomId"))?,
            )),
            ClientMessage::SendSignal {
                target_connection_id,
                origin_connection_id,
                signal,
            } => {
                if let Some(claimed) = origin_connection_id
                    && claimed != origin.as_str()
                {
                    tracing::warn!(
                        "Connection '{}' claimed to be '{}' in send-signal; using transport id",
                        origin,
                        claimed
                    );
                }
                ClientCommand::Offer {
                    target: ConnectionId::new(target_connection_id)
                        .map_err(field("targetConnectionId"))?,
                    signal: SignalBlob::new(signal).map_err(field("signal"))?,
                }
            }
            ClientMessage::ReturnSignal { caller_id, signal } => ClientCommand::Answer {
                caller: ConnectionId::new(caller_id).map_err(field("callerId"))?,
                signal: SignalBlob::new(signal).map_err(field("signal"))?,
            },
            ClientMessage::SendChat { room_id, text } => {
                ClientCommand::Publish(SessionEvent::ChatMessage(ChatMessage {
                    room_id: RoomId::new(room_id).map_err(field("roomId"))?,
                    sender_id: origin.clone(),
                    body: MessageContent::new(text).map_err(field("text"))?,
                    sent_at: now,
                }))
            }
            ClientMessage::DrawSegment {
                room_id,
                from_x,
                from_y,
                to_x,
                to_y,
                color,
                width,
            } => ClientCommand::Publish(SessionEvent::StrokeSegment(StrokeSegment {
                room_id: RoomId::new(room_id).map_err(field("roomId"))?,
                from: Point::new(from_x, from_y).map_err(field("from"))?,
                to: Point::new(to_x, to_y).map_err(field("to"))?,
                color: Color::new(color).map_err(field("color"))?,
                width: StrokeWidth::new(width).map_err(field("width"))?,
            })),
            ClientMessage::AddText {
                room_id,
                text,
                x,
                y,
                font,
                color,
            } => ClientCommand::Publish(SessionEvent::TextPlacement(TextPlacement {
                room_id: RoomId::new(room_id).map_err(field("roomId"))?,
                text: MessageContent::new(text).map_err(field("text"))?,
                at: Point::new(x, y).map_err(field("x/y"))?,
                font: Font::new(font).map_err(field("font"))?,
                color: Color::new(color).map_err(field("color"))?,
            })),
            ClientMessage::ClearBoard { room_id } => {
                ClientCommand::Publish(SessionEvent::ClearBoard(ClearBoard {
                    room_id: RoomId::new(room_id).map_err(field("roomId"))?,
                }))
            }
            ClientMessage::ScreenShareSignal { room_id, signal } => ClientCommand::ScreenShare {
                room_id: RoomId::new(room_id).map_err(field("roomId"))?,
                signal: SignalBlob::new(signal).map_err(field("signal"))?,
            },
        };
        Ok(command)
    }
}

/// Frames sent to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ServerMessage {
    #[serde(rename_all = "camelCase")]
    Connected { connection_id: String },

    #[serde(rename_all = "camelCase")]
    AllUsers { room_id: String, users: Vec<String> },

    /// History batch; `events` holds live-event frames in log order.
    #[serde(rename_all = "camelCase")]
    Replay {
        room_id: String,
        namespace: String,
        events: Vec<ServerMessage>,
    },

    #[serde(rename_all = "camelCase")]
    UserJoined {
        signal: serde_json::Value,
        caller_id: String,
    },

    #[serde(rename_all = "camelCase")]
    ReturnedSignal { signal: serde_json::Value, id: String },

    #[serde(rename_all = "camelCase")]
    ChatMessage {
        room_id: String,
        sender_id: String,
        body: String,
        sent_at: i64,
    },

    #[serde(rename_all = "camelCase")]
    DrawSegment {
        room_id: String,
        from_x: f64,
        from_y: f64,
        to_x: f64,
        to_y: f64,
        color: String,
        width: f64,
    },

    #[serde(rename_all = "camelCase")]
    AddText {
        room_id: String,
        text: String,
        x: f64,
        y: f64,
        font: String,
        color: String,
    },

    #[serde(rename_all = "camelCase")]
    ClearBoard { room_id: String },

    #[serde(rename_all = "camelCase")]
    ScreenShareSignal {
        room_id: String,
        signal: serde_json::Value,
        caller_id: String,
    },

    #[serde(rename_all = "camelCase")]
    UserLeft {
        room_id: String,
        namespace: String,
        id: String,
    },
}

impl ServerMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<SessionEvent> for ServerMessage {
    fn from(event: SessionEvent) -> Self {
        match event {
            SessionEvent::StrokeSegment(e) => ServerMessage::DrawSegment {
                room_id: e.room_id.into_string(),
                from_x: e.from.x,
                from_y: e.from.y,
                to_x: e.to.x,
                to_y: e.to.y,
                color: e.color.as_str().to_string(),
                width: e.width.value(),
            },
            SessionEvent::TextPlacement(e) => ServerMessage::AddText {
                room_id: e.room_id.into_string(),
                text: e.text.into_string(),
                x: e.at.x,
                y: e.at.y,
                font: e.font.as_str().to_string(),
                color: e.color.as_str().to_string(),
            },
            SessionEvent::ChatMessage(e) => ServerMessage::ChatMessage {
                room_id: e.room_id.into_string(),
                sender_id: e.sender_id.into_string(),
                body: e.body.into_string(),
                sent_at: e.sent_at.value(),
            },
            SessionEvent::ClearBoard(e) => ServerMessage::ClearBoard {
                room_id: e.room_id.into_string(),
            },
        }
    }
}

impl From<Delivery> for ServerMessage {
    fn from(delivery: Delivery) -> Self {
        match delivery {
            Delivery::Connected { connection_id } => ServerMessage::Connected {
                connection_id: connection_id.into_string(),
            },
            Delivery::RoomMembers { room, members } => ServerMessage::AllUsers {
                room_id: room.id.into_string(),
                users: members.into_iter().map(ConnectionId::into_string).collect(),
            },
            Delivery::Replay { room, events } => ServerMessage::Replay {
                namespace: room.namespace.as_str().to_string(),
                room_id: room.id.into_string(),
                events: events.into_iter().map(ServerMessage::from).collect(),
            },
            Delivery::Event(event) => ServerMessage::from(event),
            Delivery::PeerOffer { caller_id, signal } => ServerMessage::UserJoined {
                signal: signal.into_value(),
                caller_id: caller_id.into_string(),
            },
            Delivery::PeerAnswer {
                responder_id,
                signal,
            } => ServerMessage::ReturnedSignal {
                signal: signal.into_value(),
                id: responder_id.into_string(),
            },
            Delivery::ScreenShare {
                room_id,
                caller_id,
                signal,
            } => ServerMessage::ScreenShareSignal {
                room_id: room_id.into_string(),
                signal: signal.into_value(),
                caller_id: caller_id.into_string(),
            },
            Delivery::PeerLeft {
                room,
                connection_id,
            } => ServerMessage::UserLeft {
                namespace: room.namespace.as_str().to_string(),
                room_id: room.id.into_string(),
                id: connection_id.into_string(),
            },
        }
    }
}
