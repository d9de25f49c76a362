//! Session monitoring handlers - summary, history and history reset.

mod clear_session_history;
mod get_session_history;
mod get_session_summary;

pub use clear_session_history::{ClearSessionHistoryCommand, ClearSessionHistoryHandler};
pub use get_session_history::{GetSessionHistoryHandler, GetSessionHistoryQuery};
pub use get_session_summary::{GetSessionSummaryHandler, GetSessionSummaryQuery};

use crate::domain::foundation::SessionId;

/// Error for handlers addressing an existing session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionLookupError {
    /// No live session with this id
    NotFound(SessionId),
}

impl std::fmt::Display for SessionLookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionLookupError::NotFound(id) => write!(f, "Session not found: {}", id),
        }
    }
}

impl std::error::Error for SessionLookupError {}
