//! HTTP adapters - REST API implementations.
//!
//! Each area has its own dto/handlers/routes module; `router` assembles them.

pub mod chat;
pub mod documents;
mod error;
mod router;
pub mod sessions;

pub use chat::{chat_routes, ChatHandlers};
pub use documents::{document_routes, DocumentHandlers};
pub use error::ErrorResponse;
pub use router::{create_router, AppState};
pub use sessions::{session_routes, SessionHandlers};
