//! ProcessTurnHandler - Runs one user turn through the orchestration pipeline.

use std::sync::Arc;
use std::time::Duration;

use crate::application::orchestration::{
    Classifier, MentionEventDispatcher, SpecialistDispatcher, Supervisor,
};
use crate::application::sessions::SessionRegistry;
use crate::domain::foundation::SessionId;
use crate::domain::orchestration::{
    extract_mentions, sanitize, FlowState, InputType, Mention, OrchestrationError, Session, Turn,
    APOLOGY_RESPONSE, ERROR_CATEGORY,
};

/// Command to process one user message.
#[derive(Debug, Clone)]
pub struct ProcessTurnCommand {
    pub session_id: Option<SessionId>,
    pub input: String,
    pub input_type: InputType,
}

impl ProcessTurnCommand {
    pub fn text(session_id: Option<SessionId>, input: impl Into<String>) -> Self {
        Self {
            session_id,
            input: input.into(),
            input_type: InputType::Text,
        }
    }
}

/// Outcome of a processed turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessTurnResult {
    pub response: String,
    pub mentions: Vec<Mention>,
    pub category: String,
    pub conversation_state: FlowState,
    pub conversation_history: usize,
    pub session_id: SessionId,
    pub is_new_session: bool,
}

/// Error type for processing a turn.
///
/// Generation failures are not errors here; they produce the apology turn.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessTurnError {
    /// The message had no content
    EmptyInput,
}

impl std::fmt::Display for ProcessTurnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessTurnError::EmptyInput => write!(f, "Message content must not be empty"),
        }
    }
}

impl std::error::Error for ProcessTurnError {}

/// Handler for the per-turn pipeline:
/// classify, dispatch, supervise, extract, sanitize, apply events, append.
pub struct ProcessTurnHandler {
    registry: Arc<SessionRegistry>,
    classifier: Classifier,
    dispatcher: SpecialistDispatcher,
    supervisor: Supervisor,
    events: MentionEventDispatcher,
    turn_timeout: Option<Duration>,
}

impl ProcessTurnHandler {
    pub fn new(
        registry: Arc<SessionRegistry>,
        classifier: Classifier,
        dispatcher: SpecialistDispatcher,
        supervisor: Supervisor,
        events: MentionEventDispatcher,
    ) -> Self {
        Self {
            registry,
            classifier,
            dispatcher,
            supervisor,
            events,
            turn_timeout: None,
        }
    }

    /// Bounds a whole turn. A turn that overruns ends with the apology and
    /// leaves the session untouched.
    pub fn with_turn_timeout(mut self, timeout: Duration) -> Self {
        self.turn_timeout = Some(timeout);
        self
    }

    pub async fn handle(
        &self,
        cmd: ProcessTurnCommand,
    ) -> Result<ProcessTurnResult, ProcessTurnError> {
        if cmd.input.trim().is_empty() {
            return Err(ProcessTurnError::EmptyInput);
        }

        // 1. Resolve the session; held exclusively until the turn completes
        let mut session = self.registry.checkout(cmd.session_id).await;
        let is_new_session = session.is_new();

        // 2. Run the stages against a scratch copy; only a finished turn is committed
        let mut scratch: Session = (*session).clone();
        let outcome = match self.turn_timeout {
            Some(limit) => tokio::time::timeout(
                limit,
                self.run_pipeline(&cmd.input, cmd.input_type, &mut scratch),
            )
            .await
            .unwrap_or_else(|_| Err(OrchestrationError::TurnTimeout(limit))),
            None => {
                self.run_pipeline(&cmd.input, cmd.input_type, &mut scratch)
                    .await
            }
        };

        let (response, mentions, category) = match outcome {
            Ok(parts) => {
                *session = scratch;
                parts
            }
            Err(err) => {
                tracing::warn!(
                    session_id = %session.id(),
                    error = %err,
                    "Turn failed, returning apology"
                );
                (
                    APOLOGY_RESPONSE.to_string(),
                    Vec::new(),
                    ERROR_CATEGORY.to_string(),
                )
            }
        };

        let result = ProcessTurnResult {
            response,
            mentions,
            category,
            conversation_state: session.flow_state(),
            conversation_history: session.turns().len(),
            session_id: session.id().clone(),
            is_new_session,
        };

        Ok(result)
    }

    async fn run_pipeline(
        &self,
        input: &str,
        input_type: InputType,
        session: &mut Session,
    ) -> Result<(String, Vec<Mention>, String), OrchestrationError> {
        let category = self.classifier.classify(input, input_type, session.id()).await?;
        tracing::info!(
            session_id = %session.id(),
            category = %category.as_str(),
            input_type = ?input_type,
            "Input classified"
        );

        let raw = self.dispatcher.dispatch(category, input, session).await?;
        let supervised = self.supervisor.supervise(raw, category);

        let mentions = extract_mentions(&supervised);
        let sanitized = sanitize(&supervised);
        tracing::debug!(
            session_id = %session.id(),
            mentions = mentions.len(),
            "Mentions extracted"
        );

        self.events.dispatch(&mentions, session, input).await;

        let response = session
            .context_mut()
            .take_knowledge_answer()
            .unwrap_or_else(|| sanitized.clone());

        session.append_turn(Turn::new(input, sanitized, mentions.clone(), category));
        tracing::debug!(
            session_id = %session.id(),
            turns = session.turns().len(),
            context_keys = session.context().len(),
            "Turn appended"
        );

        Ok((response, mentions, category.as_str().to_string()))
    }
}
