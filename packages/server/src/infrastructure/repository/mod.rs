//! RoomRepository の実装
//!
//! 現在はプロセス内メモリに全ルームを保持する実装のみ。
//! 再起動すると全ての履歴とメンバーシップは失われます。

pub mod inmemory;

pub use inmemory::InMemoryRoomRepository;
