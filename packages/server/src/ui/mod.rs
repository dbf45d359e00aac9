//! Transport layer: axum router, WebSocket and HTTP handlers.

mod handler;
mod runner;
mod signal;
pub mod state;

pub use runner::{build_router, cors_layer, run, serve};
pub use signal::shutdown_signal;
