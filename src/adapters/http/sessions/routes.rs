//! HTTP routes for session monitoring endpoints.

use axum::{routing::get, Router};

use super::handlers::{
    clear_session_history, get_session_history, get_session_summary, SessionHandlers,
};

pub fn session_routes(handlers: SessionHandlers) -> Router {
    Router::new()
        .route("/:id", get(get_session_summary))
        .route(
            "/:id/history",
            get(get_session_history).delete(clear_session_history),
        )
        .with_state(handlers)
}
