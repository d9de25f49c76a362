//! HTTP routes for document endpoints.

use axum::{extract::DefaultBodyLimit, routing::get, Router};

use super::handlers::{list_documents, upload_document, DocumentHandlers};

/// Multipart framing allowance on top of the file size limit.
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

pub fn document_routes(handlers: DocumentHandlers) -> Router {
    let body_limit = usize::try_from(handlers.max_upload_bytes() + MULTIPART_OVERHEAD)
        .unwrap_or(usize::MAX);

    Router::new()
        .route(
            "/",
            get(list_documents)
                .post(upload_document)
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(handlers)
}
