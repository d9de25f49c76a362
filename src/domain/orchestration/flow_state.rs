//! Mention-driven conversation flow.
//!
//! The flow is a soft state machine: every recognized mention label maps to
//! a [`FlowEvent`], and a recognized event moves the conversation to its
//! target state no matter where it currently is. Labels the engine does not
//! know become [`FlowEvent::Unknown`] and leave the state untouched.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a conversation stands in the guided interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    /// No flow mention seen yet.
    #[default]
    Initial,
    GreetingSent,
    AnalysisPhase,
    ElderlyTrack,
    Disqualified,
    KnowledgeBaseAccessed,
}

impl FlowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowState::Initial => "initial",
            FlowState::GreetingSent => "greeting_sent",
            FlowState::AnalysisPhase => "analysis_phase",
            FlowState::ElderlyTrack => "elderly_track",
            FlowState::Disqualified => "disqualified",
            FlowState::KnowledgeBaseAccessed => "knowledge_base_accessed",
        }
    }

    /// Applies an event and returns the resulting state.
    pub fn transition(self, event: &FlowEvent) -> FlowState {
        match event {
            FlowEvent::Start => FlowState::GreetingSent,
            FlowEvent::Analysis => FlowState::AnalysisPhase,
            FlowEvent::Elderly => FlowState::ElderlyTrack,
            FlowEvent::Disqualify => FlowState::Disqualified,
            FlowEvent::KnowledgeBase => FlowState::KnowledgeBaseAccessed,
            FlowEvent::Unknown(_) => self,
        }
    }
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event decoded from a mention label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    /// `Inicio`
    Start,
    /// `Análise`
    Analysis,
    /// `Idoso`
    Elderly,
    /// `Desqualificado`
    Disqualify,
    /// `Base de Conhecimento`; also triggers a knowledge lookup.
    KnowledgeBase,
    /// Any label not listed above.
    Unknown(String),
}

impl FlowEvent {
    /// Decodes a mention label. Matching is exact and case-sensitive.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Inicio" => FlowEvent::Start,
            "Análise" => FlowEvent::Analysis,
            "Idoso" => FlowEvent::Elderly,
            "Desqualificado" => FlowEvent::Disqualify,
            "Base de Conhecimento" => FlowEvent::KnowledgeBase,
            other => FlowEvent::Unknown(other.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, FlowEvent::Unknown(_))
    }

    pub fn requires_knowledge_lookup(&self) -> bool {
        matches!(self, FlowEvent::KnowledgeBase)
    }
}
