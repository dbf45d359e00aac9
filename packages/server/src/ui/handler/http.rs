//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::{Namespace, RoomId, RoomKey},
    infrastructure::dto::http::{HealthDto, RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    let connections = state.repository.connection_count().await;
    let rooms = state.repository.room_snapshots().await.len();
    Json(HealthDto {
        status: "ok".to_string(),
        connections,
        rooms,
    })
}

/// Get list of live rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let snapshots = state.repository.room_snapshots().await;
    Json(snapshots.iter().map(RoomSummaryDto::from).collect())
}

/// Get room detail by namespace and ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path((namespace, room_id)): Path<(String, String)>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let namespace = Namespace::try_from(namespace.as_str()).map_err(|e| {
        tracing::debug!("Rejecting room lookup: {}", e);
        StatusCode::BAD_REQUEST
    })?;
    let room_id = RoomId::new(room_id).map_err(|_| StatusCode::NOT_FOUND)?;

    state
        .repository
        .room_snapshot(RoomKey::new(namespace, room_id))
        .await
        .map(|snapshot| Json(RoomDetailDto::from(snapshot)))
        .ok_or(StatusCode::NOT_FOUND)
}
