//! Orchestration stages run by the per-turn pipeline.

mod classifier;
mod dispatcher;
mod events;
mod specialists;
mod supervisor;

pub use classifier::Classifier;
pub use dispatcher::SpecialistDispatcher;
pub use events::MentionEventDispatcher;
pub use specialists::Specialists;
pub use supervisor::Supervisor;
