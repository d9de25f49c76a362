//! GetSessionHistoryHandler - Query handler for a session's turn log.

use std::sync::Arc;

use super::SessionLookupError;
use crate::application::sessions::SessionRegistry;
use crate::domain::foundation::SessionId;
use crate::domain::orchestration::Turn;

/// Query to fetch the turns of a session, oldest first.
#[derive(Debug, Clone)]
pub struct GetSessionHistoryQuery {
    pub session_id: SessionId,
}

pub struct GetSessionHistoryHandler {
    registry: Arc<SessionRegistry>,
}

impl GetSessionHistoryHandler {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(
        &self,
        query: GetSessionHistoryQuery,
    ) -> Result<Vec<Turn>, SessionLookupError> {
        let session = self
            .registry
            .checkout_existing(&query.session_id)
            .await
            .ok_or(SessionLookupError::NotFound(query.session_id))?;

        Ok(session.turns().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::orchestration::Category;

    #[tokio::test]
    async fn returns_turns_oldest_first() {
        let registry = Arc::new(SessionRegistry::new(10));
        let id = SessionId::new("s-1").unwrap();
        {
            let mut session = registry.checkout(Some(id.clone())).await;
            session.append_turn(Turn::new("um", "1", vec![], Category::General));
            session.append_turn(Turn::new("dois", "2", vec![], Category::General));
        }

        let turns = GetSessionHistoryHandler::new(registry)
            .handle(GetSessionHistoryQuery { session_id: id })
            .await
            .unwrap();

        let inputs: Vec<_> = turns.iter().map(|t| t.user_input.as_str()).collect();
        assert_eq!(inputs, vec!["um", "dois"]);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let handler = GetSessionHistoryHandler::new(Arc::new(SessionRegistry::new(10)));
        let result = handler
            .handle(GetSessionHistoryQuery {
                session_id: SessionId::new("ghost").unwrap(),
            })
            .await;
        assert!(matches!(result, Err(SessionLookupError::NotFound(_))));
    }
}
