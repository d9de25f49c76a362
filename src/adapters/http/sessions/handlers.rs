//! HTTP handlers for session monitoring endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::ErrorResponse;
use crate::application::handlers::{
    ClearSessionHistoryCommand, ClearSessionHistoryHandler, GetSessionHistoryHandler,
    GetSessionHistoryQuery, GetSessionSummaryHandler, GetSessionSummaryQuery, SessionLookupError,
};
use crate::domain::foundation::SessionId;

use super::dto::{SessionCommandResponse, SessionHistoryResponse};

#[derive(Clone)]
pub struct SessionHandlers {
    summary_handler: Arc<GetSessionSummaryHandler>,
    history_handler: Arc<GetSessionHistoryHandler>,
    clear_handler: Arc<ClearSessionHistoryHandler>,
}

impl SessionHandlers {
    pub fn new(
        summary_handler: Arc<GetSessionSummaryHandler>,
        history_handler: Arc<GetSessionHistoryHandler>,
        clear_handler: Arc<ClearSessionHistoryHandler>,
    ) -> Self {
        Self {
            summary_handler,
            history_handler,
            clear_handler,
        }
    }
}

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

/// GET /api/sessions/:id - Session summary
pub async fn get_session_summary(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .summary_handler
        .handle(GetSessionSummaryQuery { session_id })
        .await
    {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => handle_lookup_error(e),
    }
}

/// GET /api/sessions/:id/history - Turn log, oldest first
pub async fn get_session_history(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = GetSessionHistoryQuery {
        session_id: session_id.clone(),
    };

    match handlers.history_handler.handle(query).await {
        Ok(turns) => {
            let response = SessionHistoryResponse {
                session_id: session_id.to_string(),
                turns,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_lookup_error(e),
    }
}

/// DELETE /api/sessions/:id/history - Clear the turn log
pub async fn clear_session_history(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = ClearSessionHistoryCommand {
        session_id: session_id.clone(),
    };

    match handlers.clear_handler.handle(cmd).await {
        Ok(()) => {
            let response = SessionCommandResponse {
                session_id: session_id.to_string(),
                message: "Session history cleared".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_lookup_error(e),
    }
}

fn handle_lookup_error(error: SessionLookupError) -> Response {
    match error {
        SessionLookupError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Session", id.as_str())),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let error = SessionLookupError::NotFound(SessionId::new("s-1").unwrap());
        assert_eq!(handle_lookup_error(error).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn blank_id_is_bad_request() {
        let response = parse_session_id("   ").unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
