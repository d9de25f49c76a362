//! HTTP adapter for the chat endpoint.

mod dto;
mod handlers;
mod routes;

pub use dto::{ChatMessage, ChatRequest, ChatResponse};
pub use handlers::ChatHandlers;
pub use routes::chat_routes;
