//! Mention Flow - Conversational orchestration engine
//!
//! Routes each chat turn through a classifier, a specialist model and the
//! mention-driven flow state machine, keeping per-session state for many
//! concurrent users.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
