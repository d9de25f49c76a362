//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer coordinates the orchestration domain and the ports. Handlers
//! are split into the per-turn command and the session monitoring queries.

pub mod handlers;
pub mod orchestration;
pub mod sessions;

pub use handlers::{
    ClearSessionHistoryCommand, ClearSessionHistoryHandler, GetSessionHistoryHandler,
    GetSessionHistoryQuery, GetSessionSummaryHandler, GetSessionSummaryQuery, ProcessTurnCommand,
    ProcessTurnError, ProcessTurnHandler, ProcessTurnResult, SessionLookupError,
};
pub use orchestration::{
    Classifier, MentionEventDispatcher, SpecialistDispatcher, Specialists, Supervisor,
};
pub use sessions::{spawn_idle_sweeper, CheckedOutSession, SessionRegistry, SweepPolicy};
