//! GetSessionSummaryHandler - Query handler for a session's monitoring view.

use std::sync::Arc;

use super::SessionLookupError;
use crate::application::sessions::SessionRegistry;
use crate::domain::foundation::SessionId;
use crate::domain::orchestration::SessionSummary;

/// Query to summarize a session.
#[derive(Debug, Clone)]
pub struct GetSessionSummaryQuery {
    pub session_id: SessionId,
}

pub struct GetSessionSummaryHandler {
    registry: Arc<SessionRegistry>,
}

impl GetSessionSummaryHandler {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(
        &self,
        query: GetSessionSummaryQuery,
    ) -> Result<SessionSummary, SessionLookupError> {
        let session = self
            .registry
            .checkout_existing(&query.session_id)
            .await
            .ok_or(SessionLookupError::NotFound(query.session_id))?;

        Ok(session.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::orchestration::{Category, FlowEvent, FlowState, Turn};

    #[tokio::test]
    async fn summarizes_live_session() {
        let registry = Arc::new(SessionRegistry::new(10));
        let id = SessionId::new("s-1").unwrap();
        {
            let mut session = registry.checkout(Some(id.clone())).await;
            session.apply_event(&FlowEvent::Elderly);
            session.append_turn(Turn::new("oi", "olá", vec![], Category::General));
        }

        let summary = GetSessionSummaryHandler::new(registry)
            .handle(GetSessionSummaryQuery { session_id: id.clone() })
            .await
            .unwrap();

        assert_eq!(summary.session_id, id);
        assert_eq!(summary.total_messages, 1);
        assert_eq!(summary.current_flow, FlowState::ElderlyTrack);
        assert!(summary.last_activity.is_some());
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let handler = GetSessionSummaryHandler::new(Arc::new(SessionRegistry::new(10)));
        let id = SessionId::new("ghost").unwrap();

        let err = handler
            .handle(GetSessionSummaryQuery { session_id: id.clone() })
            .await
            .unwrap_err();
        assert_eq!(err, SessionLookupError::NotFound(id));
    }
}
