//! Startup and serve errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid CORS origin '{0}'")]
    InvalidCorsOrigin(String),

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}
