//! Per-session conversational state.

use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};

use super::{Category, FlowEvent, FlowState, Mention};
use crate::domain::foundation::{SessionId, Timestamp};

/// Context key under which a knowledge-base answer waits for response assembly.
pub const KNOWLEDGE_ANSWER_KEY: &str = "lastKnowledgeBaseAnswer";

/// One completed exchange. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    pub timestamp: Timestamp,
    pub user_input: String,
    /// Specialist reply with mention spans stripped.
    pub response: String,
    pub mentions: Vec<Mention>,
    pub category: Category,
}

impl Turn {
    pub fn new(
        user_input: impl Into<String>,
        response: impl Into<String>,
        mentions: Vec<Mention>,
        category: Category,
    ) -> Self {
        Self {
            timestamp: Timestamp::now(),
            user_input: user_input.into(),
            response: response.into(),
            mentions,
            category,
        }
    }
}

/// Ordered turn history that drops its oldest entries once full.
#[derive(Debug, Clone)]
pub struct TurnLog {
    turns: VecDeque<Turn>,
    capacity: usize,
}

impl TurnLog {
    /// Creates an empty log. A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            turns: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    pub fn push(&mut self, turn: Turn) {
        if self.turns.len() == self.capacity {
            self.turns.pop_front();
        }
        self.turns.push_back(turn);
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn to_vec(&self) -> Vec<Turn> {
        self.turns.iter().cloned().collect()
    }
}

/// Ephemeral key/value scratch space attached to a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SessionContext(BTreeMap<String, String>);

impl SessionContext {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Stores a knowledge-base answer for the current turn.
    pub fn stash_knowledge_answer(&mut self, answer: impl Into<String>) {
        self.insert(KNOWLEDGE_ANSWER_KEY, answer);
    }

    /// Removes and returns the stashed knowledge-base answer, if any.
    pub fn take_knowledge_answer(&mut self) -> Option<String> {
        self.remove(KNOWLEDGE_ANSWER_KEY)
    }
}

/// State of one conversation, owned by the session registry.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    flow_state: FlowState,
    context: SessionContext,
    turns: TurnLog,
    created_at: Timestamp,
    last_activity: Timestamp,
}

impl Session {
    pub fn new(id: SessionId, max_turns: usize) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            flow_state: FlowState::Initial,
            context: SessionContext::default(),
            turns: TurnLog::with_capacity(max_turns),
            created_at: now,
            last_activity: now,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn flow_state(&self) -> FlowState {
        self.flow_state
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut SessionContext {
        &mut self.context
    }

    pub fn turns(&self) -> &TurnLog {
        &self.turns
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn last_activity(&self) -> Timestamp {
        self.last_activity
    }

    /// Applies a flow event and returns the new state.
    pub fn apply_event(&mut self, event: &FlowEvent) -> FlowState {
        self.flow_state = self.flow_state.transition(event);
        self.flow_state
    }

    pub fn append_turn(&mut self, turn: Turn) {
        self.turns.push(turn);
        self.touch();
    }

    /// Empties the turn log. Flow state and context are kept.
    pub fn clear_history(&mut self) {
        self.turns.clear();
        self.touch();
    }

    pub fn touch(&mut self) {
        self.last_activity = Timestamp::now();
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.id.clone(),
            total_messages: self.turns.len(),
            current_flow: self.flow_state,
            user_context: self.context.clone(),
            last_activity: self.turns.last().map(|t| t.timestamp),
        }
    }
}

/// Monitoring view of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub total_messages: usize,
    pub current_flow: FlowState,
    pub user_context: SessionContext,
    /// Timestamp of the most recent turn, absent when the log is empty.
    pub last_activity: Option<Timestamp>,
}
