//! HTTP adapter for session monitoring endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{SessionCommandResponse, SessionHistoryResponse};
pub use handlers::SessionHandlers;
pub use routes::session_routes;
