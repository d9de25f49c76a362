//! HTTP DTOs for the chat endpoint.

use serde::{Deserialize, Serialize};

use crate::application::handlers::ProcessTurnResult;
use crate::domain::orchestration::{FlowState, Mention};

/// One message of the client-side transcript.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: String,
}

/// Request body for `POST /api/chat`. Only the last message is processed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl ChatRequest {
    pub fn last_content(&self) -> Option<&str> {
        self.messages.last().map(|m| m.content.as_str())
    }

    /// Session id, with a blank value treated as absent.
    pub fn requested_session(&self) -> Option<&str> {
        self.session_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Response body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub mentions: Vec<Mention>,
    pub category: String,
    pub conversation_state: FlowState,
    pub conversation_history: usize,
    pub session_id: String,
    pub audio_url: Option<String>,
}

impl ChatResponse {
    pub fn from_result(result: ProcessTurnResult, audio_url: Option<String>) -> Self {
        Self {
            response: result.response,
            mentions: result.mentions,
            category: result.category,
            conversation_state: result.conversation_state,
            conversation_history: result.conversation_history,
            session_id: result.session_id.to_string(),
            audio_url,
        }
    }
}
