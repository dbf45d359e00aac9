//! Infrastructure layer: wire DTOs, outbound fan-out and the in-memory repository.

pub mod dispatcher;
pub mod dto;
pub mod repository;
