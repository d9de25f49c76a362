//! Top-level router: API routes, static audio and middleware.

use std::path::PathBuf;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::chat::{chat_routes, ChatHandlers};
use super::documents::{document_routes, DocumentHandlers};
use super::sessions::{session_routes, SessionHandlers};

/// Everything the router needs.
#[derive(Clone)]
pub struct AppState {
    pub chat: ChatHandlers,
    pub sessions: SessionHandlers,
    pub documents: DocumentHandlers,
    /// Served directory and its URL prefix.
    pub audio: Option<(PathBuf, String)>,
    pub request_timeout: Duration,
    pub cors_origins: Vec<String>,
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if parsed.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

/// Creates the router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .nest("/api/chat", chat_routes(state.chat))
        .nest("/api/sessions", session_routes(state.sessions))
        .nest("/api/documents", document_routes(state.documents));

    if let Some((dir, public_path)) = state.audio {
        router = router.nest_service(&public_path, ServeDir::new(dir));
    }

    router
        .layer(TimeoutLayer::new(state.request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.cors_origins))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_origins_are_skipped() {
        // Construction must not panic on bad header values
        let _ = cors_layer(&["http://localhost:5173".to_string(), "bad\norigin".to_string()]);
        let _ = cors_layer(&[]);
    }
}
