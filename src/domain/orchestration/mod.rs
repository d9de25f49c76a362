//! Orchestration domain - sessions, categories, mentions and flow state.
//!
//! Everything here is synchronous and free of I/O. The application layer
//! drives these types through the per-turn pipeline.

mod category;
mod errors;
mod flow_state;
mod mention;
pub mod prompts;
mod session;
mod specialist;

pub use category::{Category, InputType, ERROR_CATEGORY};
pub use errors::{OrchestrationError, APOLOGY_RESPONSE};
pub use flow_state::{FlowEvent, FlowState};
pub use mention::{contains_mention, extract_mentions, sanitize, Mention};
pub use session::{
    Session, SessionContext, SessionSummary, Turn, TurnLog, KNOWLEDGE_ANSWER_KEY,
};
pub use specialist::{GenerationProfile, SpecialistRole};
