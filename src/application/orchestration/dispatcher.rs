//! Specialist dispatcher - generates the raw reply for a category.

use std::sync::Arc;

use super::Specialists;
use crate::domain::orchestration::{Category, OrchestrationError, Session, SpecialistRole};
use crate::ports::Message;

pub struct SpecialistDispatcher {
    specialists: Arc<Specialists>,
}

impl SpecialistDispatcher {
    pub fn new(specialists: Arc<Specialists>) -> Self {
        Self { specialists }
    }

    /// Builds the message list for a role: replayed turns (principal only)
    /// followed by the current input.
    pub fn build_messages(role: SpecialistRole, input: &str, session: &Session) -> Vec<Message> {
        let mut messages = Vec::new();
        if role.replays_history() {
            for turn in session.turns().iter() {
                messages.push(Message::user(turn.user_input.clone()));
                messages.push(Message::assistant(turn.response.clone()));
            }
        }
        messages.push(Message::user(input));
        messages
    }

    pub async fn dispatch(
        &self,
        category: Category,
        input: &str,
        session: &Session,
    ) -> Result<String, OrchestrationError> {
        let role = SpecialistRole::for_category(category);
        let messages = Self::build_messages(role, input, session);

        tracing::debug!(
            session_id = %session.id(),
            role = %role,
            messages = messages.len(),
            "Dispatching to specialist"
        );

        self.specialists.generate(role, session.id(), messages).await
    }
}
