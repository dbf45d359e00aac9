//! Sketchroom room coordination server.
//!
//! Keeps room membership, relays WebRTC signaling between peers and replicates
//! whiteboard and chat history to late joiners over a WebSocket endpoint.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use error::ServerError;
pub use ui::{run as run_server, serve};
