//! Session lifecycle - registry, checkout and idle eviction.

mod registry;
mod sweeper;

pub use registry::{CheckedOutSession, SessionRegistry};
pub use sweeper::{spawn_idle_sweeper, SweepPolicy};
