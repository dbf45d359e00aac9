//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};
use sketchroom_shared::time::millis_to_rfc3339;

use crate::domain::{RoomPhase, RoomSnapshot};

/// Room summary for list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub id: String,
    pub namespace: String,
    pub members: usize,
    pub created_at: String, // ISO 8601
}

/// Room detail for detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub id: String,
    pub namespace: String,
    pub phase: String,
    pub members: Vec<String>,
    pub stored_events: usize,
    pub replay_events: usize,
    pub clears: u64,
    pub created_at: String, // ISO 8601
}

/// Health check body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    pub connections: usize,
    pub rooms: usize,
}

fn phase_name(phase: RoomPhase) -> &'static str {
    match phase {
        RoomPhase::Unborn => "unborn",
        RoomPhase::Active => "active",
        RoomPhase::Empty => "empty",
        RoomPhase::Deleted => "deleted",
    }
}

impl From<&RoomSnapshot> for RoomSummaryDto {
    fn from(snapshot: &RoomSnapshot) -> Self {
        Self {
            id: snapshot.key.id.as_str().to_string(),
            namespace: snapshot.key.namespace.as_str().to_string(),
            members: snapshot.members.len(),
            created_at: millis_to_rfc3339(snapshot.created_at.value()),
        }
    }
}

impl From<RoomSnapshot> for RoomDetailDto {
    fn from(snapshot: RoomSnapshot) -> Self {
        Self {
            id: snapshot.key.id.as_str().to_string(),
            namespace: snapshot.key.namespace.as_str().to_string(),
            phase: phase_name(snapshot.phase).to_string(),
            members: snapshot
                .members
                .into_iter()
                .map(|member| member.into_string())
                .collect(),
            stored_events: snapshot.stored_events,
            replay_events: snapshot.replay_len,
            clears: snapshot.clears,
            created_at: millis_to_rfc3339(snapshot.created_at.value()),
        }
    }
}
