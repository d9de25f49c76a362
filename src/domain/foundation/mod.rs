//! Foundation module - Shared domain primitives.
//!
//! Contains the identifiers, timestamps and validation errors
//! shared by every other domain module.

mod errors;
mod ids;
mod timestamp;

pub use errors::ValidationError;
pub use ids::SessionId;
pub use timestamp::Timestamp;
