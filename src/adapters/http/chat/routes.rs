//! HTTP routes for the chat endpoint.

use axum::{routing::post, Router};

use super::handlers::{post_chat, ChatHandlers};

pub fn chat_routes(handlers: ChatHandlers) -> Router {
    Router::new().route("/", post(post_chat)).with_state(handlers)
}
