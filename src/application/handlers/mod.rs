//! Application handlers.
//!
//! Command and query handlers that drive the orchestration stages.

pub mod chat;
pub mod sessions;

pub use chat::{ProcessTurnCommand, ProcessTurnError, ProcessTurnHandler, ProcessTurnResult};
pub use sessions::{
    ClearSessionHistoryCommand, ClearSessionHistoryHandler, GetSessionHistoryHandler,
    GetSessionHistoryQuery, GetSessionSummaryHandler, GetSessionSummaryQuery, SessionLookupError,
};
