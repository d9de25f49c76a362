//! HTTP DTOs for session monitoring endpoints.

use serde::Serialize;

use crate::domain::orchestration::Turn;

/// Turn log of a session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionHistoryResponse {
    pub session_id: String,
    pub turns: Vec<Turn>,
}

/// Response for session command operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCommandResponse {
    pub session_id: String,
    pub message: String,
}
