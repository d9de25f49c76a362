//! ClearSessionHistoryHandler - Empties a session's turn log.

use std::sync::Arc;

use super::SessionLookupError;
use crate::application::sessions::SessionRegistry;
use crate::domain::foundation::SessionId;

/// Command to clear a session's history. Flow state is kept.
#[derive(Debug, Clone)]
pub struct ClearSessionHistoryCommand {
    pub session_id: SessionId,
}

pub struct ClearSessionHistoryHandler {
    registry: Arc<SessionRegistry>,
}

impl ClearSessionHistoryHandler {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, cmd: ClearSessionHistoryCommand) -> Result<(), SessionLookupError> {
        let mut session = self
            .registry
            .checkout_existing(&cmd.session_id)
            .await
            .ok_or(SessionLookupError::NotFound(cmd.session_id))?;

        let cleared = session.turns().len();
        session.clear_history();
        tracing::info!(session_id = %session.id(), cleared, "Session history cleared");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::orchestration::{Category, FlowEvent, FlowState, Turn};

    #[tokio::test]
    async fn clears_turns_and_keeps_flow_state() {
        let registry = Arc::new(SessionRegistry::new(10));
        let id = SessionId::new("s-1").unwrap();
        {
            let mut session = registry.checkout(Some(id.clone())).await;
            session.apply_event(&FlowEvent::Analysis);
            session.append_turn(Turn::new("oi", "olá", vec![], Category::General));
        }

        ClearSessionHistoryHandler::new(registry.clone())
            .handle(ClearSessionHistoryCommand { session_id: id.clone() })
            .await
            .unwrap();

        let session = registry.checkout_existing(&id).await.unwrap();
        assert!(session.turns().is_empty());
        assert_eq!(session.flow_state(), FlowState::AnalysisPhase);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let handler = ClearSessionHistoryHandler::new(Arc::new(SessionRegistry::new(10)));
        let result = handler
            .handle(ClearSessionHistoryCommand {
                session_id: SessionId::new("ghost").unwrap(),
            })
            .await;
        assert!(result.is_err());
    }
}
