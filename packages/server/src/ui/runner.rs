//! Router assembly and the serve loop.

use std::{future::Future, sync::Arc};

use axum::{Router, http::HeaderValue, routing::get};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::ServerConfig, error::ServerError,
    infrastructure::repository::InMemoryRoomRepository,
};

use super::{
    handler::{get_room_detail, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// CORS policy: a single origin when configured, otherwise any origin.
pub fn cors_layer(origin: Option<&str>) -> Result<CorsLayer, ServerError> {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origin {
        Some(origin) => {
            let value = HeaderValue::from_str(origin)
                .map_err(|_| ServerError::InvalidCorsOrigin(origin.to_string()))?;
            Ok(cors.allow_origin(value))
        }
        None => Ok(cors.allow_origin(Any)),
    }
}

pub fn build_router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/rooms", get(get_rooms))
        .route("/api/rooms/{namespace}/{room_id}", get(get_room_detail))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    config: &ServerConfig,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let repository = Arc::new(InMemoryRoomRepository::new(config.compact_on_clear));
    let state = Arc::new(AppState::new(repository));
    let app = build_router(state, cors_layer(config.cors_origin.as_deref())?);

    if let Ok(address) = listener.local_addr() {
        tracing::info!("Listening on {}", address);
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

/// Bind the configured address and serve until Ctrl+C or SIGTERM.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| ServerError::Bind { address, source })?;
    serve(listener, &config, shutdown_signal()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_accepts_origin() {
        // テスト項目: 有効なオリジンで CORS レイヤーを作成できる
        // given (前提条件):
        let origin = Some("http://localhost:3000");

        // when (操作):
        let result = cors_layer(origin);

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_cors_layer_rejects_invalid_header_value() {
        // テスト項目: ヘッダー値として不正なオリジンはエラーになる
        // given (前提条件):
        let origin = Some("http://bad\norigin");

        // when (操作):
        let result = cors_layer(origin);

        // then (期待する結果):
        assert!(matches!(result, Err(ServerError::InvalidCorsOrigin(_))));
    }
}
