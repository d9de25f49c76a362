//! HTTP adapter for knowledge document endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::DocumentListResponse;
pub use handlers::{DocumentHandlers, UPLOAD_FIELD};
pub use routes::document_routes;
