//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValueObjectError;

/// Maximum length of user-authored text (chat bodies, text placements).
pub const MAX_CONTENT_LEN: usize = 10_000;

/// Connection identifier value object.
///
/// Identifies one live WebSocket connection. Generated by the server on
/// connect (see [`ConnectionIdFactory`](super::factory::ConnectionIdFactory))
/// and also parsed from peer-addressed signaling payloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Create a new ConnectionId.
    ///
    /// # Errors
    ///
    /// Returns `ValueObjectError::ConnectionIdEmpty` for an empty string.
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::ConnectionIdEmpty);
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room identifier value object.
///
/// Room keys are supplied by clients. Apart from rejecting the empty string,
/// no format is enforced; two rooms are the same iff their keys are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(String);

impl RoomId {
    /// Create a new RoomId.
    ///
    /// # Errors
    ///
    /// Returns `ValueObjectError::RoomIdEmpty` for an empty string.
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::RoomIdEmpty);
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which family of rooms a key belongs to.
///
/// Call rooms carry chat and video signaling, board rooms carry the shared
/// drawing surface. The same string key names two independent rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Namespace {
    Call,
    Board,
}

impl Namespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Call => "call",
            Namespace::Board => "board",
        }
    }
}

impl TryFrom<&str> for Namespace {
    type Error = ValueObjectError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "call" => Ok(Namespace::Call),
            "board" => Ok(Namespace::Board),
            other => Err(ValueObjectError::UnknownNamespace(other.to_string())),
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully qualified room key: namespace plus client-supplied id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomKey {
    pub namespace: Namespace,
    pub id: RoomId,
}

impl RoomKey {
    pub fn new(namespace: Namespace, id: RoomId) -> Self {
        Self { namespace, id }
    }

    pub fn call(id: RoomId) -> Self {
        Self::new(Namespace::Call, id)
    }

    pub fn board(id: RoomId) -> Self {
        Self::new(Namespace::Board, id)
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.id)
    }
}

/// User-authored text: a chat body or the text of a board annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContent(String);

impl MessageContent {
    /// Create a new MessageContent.
    ///
    /// # Errors
    ///
    /// Empty strings and strings longer than [`MAX_CONTENT_LEN`] bytes are rejected.
    pub fn new(content: String) -> Result<Self, ValueObjectError> {
        if content.is_empty() {
            return Err(ValueObjectError::MessageContentEmpty);
        }
        let len = content.len();
        if len > MAX_CONTENT_LEN {
            return Err(ValueObjectError::MessageContentTooLong {
                max: MAX_CONTENT_LEN,
                actual: len,
            });
        }
        Ok(Self(content))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for MessageContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A CSS-style color string as sent by the drawing client (`#000`, `red`, ...).
///
/// Only emptiness is checked; the server never renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(String);

impl Color {
    pub fn new(color: String) -> Result<Self, ValueObjectError> {
        if color.trim().is_empty() {
            return Err(ValueObjectError::ColorEmpty);
        }
        Ok(Self(color))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Font shorthand for a text placement (`16px Arial`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font(String);

impl Font {
    pub fn new(font: String) -> Result<Self, ValueObjectError> {
        if font.trim().is_empty() {
            return Err(ValueObjectError::FontEmpty);
        }
        Ok(Self(font))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A point on the drawing surface, in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// # Errors
    ///
    /// Returns `ValueObjectError::NonFiniteCoordinate` for NaN or infinite values.
    pub fn new(x: f64, y: f64) -> Result<Self, ValueObjectError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ValueObjectError::NonFiniteCoordinate);
        }
        Ok(Self { x, y })
    }
}

/// Brush width of a stroke segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeWidth(f64);

impl StrokeWidth {
    /// # Errors
    ///
    /// The width must be finite and strictly positive.
    pub fn new(width: f64) -> Result<Self, ValueObjectError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(ValueObjectError::InvalidStrokeWidth(width));
        }
        Ok(Self(width))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Opaque peer-connection negotiation payload (SDP offer/answer, ICE candidate).
///
/// Relayed verbatim, never inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalBlob(serde_json::Value);

impl SignalBlob {
    /// # Errors
    ///
    /// A JSON `null` means the field was missing.
    pub fn new(value: serde_json::Value) -> Result<Self, ValueObjectError> {
        if value.is_null() {
            return Err(ValueObjectError::SignalMissing);
        }
        Ok(Self(value))
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Current wall-clock time.
    pub fn now() -> Self {
        Self(sketchroom_shared::time::now_millis())
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_new_success() {
        // テスト項目: 有効な接続 ID を作成できる
        // given (前提条件):
        let id = "c0ffee".to_string();

        // when (操作):
        let result = ConnectionId::new(id);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "c0ffee");
    }

    #[test]
    fn test_connection_id_new_empty_fails() {
        // テスト項目: 空の接続 ID は作成できない
        // when (操作):
        let result = ConnectionId::new(String::new());

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::ConnectionIdEmpty);
    }

    #[test]
    fn test_room_id_accepts_any_non_empty_key() {
        // テスト項目: ルーム ID は形式を問わず空でなければ受け付ける
        // given (前提条件):
        let keys = ["r1", "  spaced key  ", "日本語", "a/b?c"];

        // then (期待する結果):
        for key in keys {
            assert_eq!(RoomId::new(key.to_string()).unwrap().as_str(), key);
        }
    }

    #[test]
    fn test_room_id_new_empty_fails() {
        // テスト項目: 空のルーム ID は作成できない
        // when (操作):
        let result = RoomId::new(String::new());

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::RoomIdEmpty);
    }

    #[test]
    fn test_room_key_namespaces_are_distinct() {
        // テスト項目: 同じ ID でも名前空間が違えば別のルームになる
        // given (前提条件):
        let id = RoomId::new("r1".to_string()).unwrap();

        // when (操作):
        let call = RoomKey::call(id.clone());
        let board = RoomKey::board(id);

        // then (期待する結果):
        assert_ne!(call, board);
        assert_eq!(call.to_string(), "call/r1");
        assert_eq!(board.to_string(), "board/r1");
    }

    #[test]
    fn test_namespace_parse() {
        // テスト項目: 名前空間を文字列から変換できる
        // then (期待する結果):
        assert_eq!(Namespace::try_from("call").unwrap(), Namespace::Call);
        assert_eq!(Namespace::try_from("board").unwrap(), Namespace::Board);
        assert_eq!(
            Namespace::try_from("lobby").unwrap_err(),
            ValueObjectError::UnknownNamespace("lobby".to_string())
        );
    }

    #[test]
    fn test_message_content_new_too_long_fails() {
        // テスト項目: 10001 バイト以上のメッセージ内容は作成できない
        // given (前提条件):
        let content = "a".repeat(MAX_CONTENT_LEN + 1);

        // when (操作):
        let result = MessageContent::new(content);

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::MessageContentTooLong {
                max: MAX_CONTENT_LEN,
                actual: MAX_CONTENT_LEN + 1
            }
        );
    }

    #[test]
    fn test_message_content_new_empty_fails() {
        // テスト項目: 空のメッセージ内容は作成できない
        // when (操作):
        let result = MessageContent::new(String::new());

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::MessageContentEmpty);
    }

    #[test]
    fn test_point_rejects_non_finite() {
        // テスト項目: NaN や無限大の座標は拒否される
        // then (期待する結果):
        assert!(Point::new(0.0, 10.5).is_ok());
        assert_eq!(
            Point::new(f64::NAN, 0.0).unwrap_err(),
            ValueObjectError::NonFiniteCoordinate
        );
        assert_eq!(
            Point::new(0.0, f64::INFINITY).unwrap_err(),
            ValueObjectError::NonFiniteCoordinate
        );
    }

    #[test]
    fn test_stroke_width_must_be_positive() {
        // テスト項目: 線幅は正の有限値でなければならない
        // then (期待する結果):
        assert_eq!(StrokeWidth::new(2.0).unwrap().value(), 2.0);
        assert!(StrokeWidth::new(0.0).is_err());
        assert!(StrokeWidth::new(-1.0).is_err());
        assert!(StrokeWidth::new(f64::NAN).is_err());
    }

    #[test]
    fn test_color_rejects_blank() {
        // テスト項目: 空白だけの色指定は拒否される
        // then (期待する結果):
        assert_eq!(Color::new("#000".to_string()).unwrap().as_str(), "#000");
        assert_eq!(
            Color::new("   ".to_string()).unwrap_err(),
            ValueObjectError::ColorEmpty
        );
    }

    #[test]
    fn test_timestamp_ordering() {
        // テスト項目: タイムスタンプは順序付けできる
        // given (前提条件):
        let ts1 = Timestamp::new(1000);
        let ts2 = Timestamp::new(2000);

        // then (期待する結果):
        assert!(ts1 < ts2);
        assert_eq!(ts2.value(), 2000);
    }
}
