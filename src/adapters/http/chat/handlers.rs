//! HTTP handler for the chat endpoint.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::speech::AudioPublisher;
use crate::application::handlers::{ProcessTurnCommand, ProcessTurnError, ProcessTurnHandler};
use crate::domain::foundation::SessionId;

use super::dto::{ChatRequest, ChatResponse};
use crate::adapters::http::ErrorResponse;

#[derive(Clone)]
pub struct ChatHandlers {
    process_turn: Arc<ProcessTurnHandler>,
    audio: Option<AudioPublisher>,
}

impl ChatHandlers {
    pub fn new(process_turn: Arc<ProcessTurnHandler>, audio: Option<AudioPublisher>) -> Self {
        Self {
            process_turn,
            audio,
        }
    }

    /// Audio is best effort; any failure leaves the URL empty.
    async fn audio_url(&self, session_id: &SessionId, reply: &str) -> Option<String> {
        let publisher = self.audio.as_ref()?;
        match publisher.publish(session_id, reply).await {
            Ok(url) => url,
            Err(err) => {
                tracing::warn!(session_id = %session_id, error = %err, "Audio generation failed");
                None
            }
        }
    }
}

/// POST /api/chat - Process the last message of the transcript
pub async fn post_chat(
    State(handlers): State<ChatHandlers>,
    Json(req): Json<ChatRequest>,
) -> Response {
    let Some(input) = req.last_content() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("messages must not be empty")),
        )
            .into_response();
    };

    let session_id = match req.requested_session().map(str::parse::<SessionId>) {
        None => None,
        Some(Ok(id)) => Some(id),
        Some(Err(err)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(format!("Invalid sessionId: {}", err))),
            )
                .into_response()
        }
    };

    let cmd = ProcessTurnCommand::text(session_id, input);

    match handlers.process_turn.handle(cmd).await {
        Ok(result) => {
            let audio_url = handlers.audio_url(&result.session_id, &result.response).await;
            (StatusCode::OK, Json(ChatResponse::from_result(result, audio_url))).into_response()
        }
        Err(e) => handle_turn_error(e),
    }
}

fn handle_turn_error(error: ProcessTurnError) -> Response {
    match error {
        ProcessTurnError::EmptyInput => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(error.to_string())),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_maps_to_400() {
        let response = handle_turn_error(ProcessTurnError::EmptyInput);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
