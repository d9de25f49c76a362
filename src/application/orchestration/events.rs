//! Mention event dispatch - applies flow transitions and the knowledge lookup.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::orchestration::{FlowEvent, Mention, Session};
use crate::ports::KnowledgeBase;

/// Runs the handler for each mention, in mention order.
pub struct MentionEventDispatcher {
    knowledge_base: Arc<dyn KnowledgeBase>,
    documents_dir: PathBuf,
    lookup_timeout: Duration,
}

impl MentionEventDispatcher {
    pub fn new(
        knowledge_base: Arc<dyn KnowledgeBase>,
        documents_dir: impl Into<PathBuf>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            knowledge_base,
            documents_dir: documents_dir.into(),
            lookup_timeout,
        }
    }

    pub fn documents_dir(&self) -> &Path {
        &self.documents_dir
    }

    /// Applies every mention to the session. Knowledge lookups complete
    /// before this returns; their failures yield no answer.
    pub async fn dispatch(&self, mentions: &[Mention], session: &mut Session, question: &str) {
        for mention in mentions {
            let event = FlowEvent::from_label(&mention.label);

            if let FlowEvent::Unknown(label) = &event {
                tracing::warn!(
                    session_id = %session.id(),
                    label = %label,
                    mention_id = %mention.id,
                    "Unknown mention label, ignoring"
                );
                continue;
            }

            let state = session.apply_event(&event);
            tracing::info!(
                session_id = %session.id(),
                label = %mention.label,
                mention_id = %mention.id,
                flow_state = %state,
                "Flow state updated"
            );

            if event.requires_knowledge_lookup() {
                if let Some(answer) = self.lookup(session, question).await {
                    session.context_mut().stash_knowledge_answer(answer);
                }
            }
        }
    }

    async fn lookup(&self, session: &Session, question: &str) -> Option<String> {
        let lookup = self.knowledge_base.answer(&self.documents_dir, question);

        match tokio::time::timeout(self.lookup_timeout, lookup).await {
            Ok(Ok(Some(answer))) => {
                tracing::info!(session_id = %session.id(), "Knowledge base answered");
                Some(answer)
            }
            Ok(Ok(None)) => {
                tracing::info!(
                    session_id = %session.id(),
                    dir = %self.documents_dir.display(),
                    "Knowledge base has no documents"
                );
                None
            }
            Ok(Err(err)) => {
                tracing::warn!(session_id = %session.id(), error = %err, "Knowledge lookup failed");
                None
            }
            Err(_) => {
                tracing::warn!(
                    session_id = %session.id(),
                    timeout_secs = self.lookup_timeout.as_secs(),
                    "Knowledge lookup timed out"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockEmbeddingProvider};
    use crate::adapters::document::DocumentTextExtractor;
    use crate::adapters::knowledge::{DirectoryKnowledgeBase, KnowledgeSettings};
    use crate::domain::foundation::SessionId;
    use crate::domain::orchestration::{FlowState, KNOWLEDGE_ANSWER_KEY};
    use crate::ports::KnowledgeError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedKnowledge {
        answer: Option<String>,
        delay: Duration,
        questions: Mutex<Vec<String>>,
    }

    impl FixedKnowledge {
        fn new(answer: Option<&str>) -> Self {
            Self {
                answer: answer.map(str::to_string),
                delay: Duration::ZERO,
                questions: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl KnowledgeBase for FixedKnowledge {
        async fn answer(&self, _dir: &Path, question: &str) -> Result<Option<String>, KnowledgeError> {
            self.questions.lock().unwrap().push(question.to_string());
            tokio::time::sleep(self.delay).await;
            Ok(self.answer.clone())
        }
    }

    fn session() -> Session {
        Session::new(SessionId::new("s").unwrap(), 10)
    }

    fn dispatcher(kb: Arc<dyn KnowledgeBase>) -> MentionEventDispatcher {
        MentionEventDispatcher::new(kb, "./unused", Duration::from_secs(5))
    }

    #[tokio::test]
    async fn mentions_apply_in_order_last_one_wins() {
        let dispatcher = dispatcher(Arc::new(FixedKnowledge::new(None)));
        let mut session = session();

        dispatcher
            .dispatch(
                &[Mention::new("Inicio", "a"), Mention::new("Idoso", "b")],
                &mut session,
                "q",
            )
            .await;

        assert_eq!(session.flow_state(), FlowState::ElderlyTrack);
    }

    #[tokio::test]
    async fn unknown_label_leaves_state_untouched() {
        let dispatcher = dispatcher(Arc::new(FixedKnowledge::new(None)));
        let mut session = session();
        session.apply_event(&FlowEvent::Analysis);

        dispatcher
            .dispatch(&[Mention::new("Saudacao", "x")], &mut session, "q")
            .await;

        assert_eq!(session.flow_state(), FlowState::AnalysisPhase);
    }

    #[tokio::test]
    async fn knowledge_mention_stashes_answer_for_original_question() {
        let kb = Arc::new(FixedKnowledge::new(Some("Rua das Flores, 10")));
        let dispatcher = dispatcher(kb.clone());
        let mut session = session();

        dispatcher
            .dispatch(
                &[Mention::new("Base de Conhecimento", "base-conhecimento-001")],
                &mut session,
                "qual o endereço?",
            )
            .await;

        assert_eq!(session.flow_state(), FlowState::KnowledgeBaseAccessed);
        assert_eq!(session.context().get(KNOWLEDGE_ANSWER_KEY), Some("Rua das Flores, 10"));
        assert_eq!(*kb.questions.lock().unwrap(), vec!["qual o endereço?".to_string()]);
    }

    #[tokio::test]
    async fn slow_knowledge_lookup_yields_no_answer() {
        let mut kb = FixedKnowledge::new(Some("late"));
        kb.delay = Duration::from_millis(200);
        let dispatcher =
            MentionEventDispatcher::new(Arc::new(kb), "./unused", Duration::from_millis(20));
        let mut session = session();

        dispatcher
            .dispatch(&[Mention::new("Base de Conhecimento", "k")], &mut session, "q")
            .await;

        assert_eq!(session.flow_state(), FlowState::KnowledgeBaseAccessed);
        assert!(session.context().get(KNOWLEDGE_ANSWER_KEY).is_none());
    }

    #[tokio::test]
    async fn missing_documents_dir_is_created_and_yields_nothing() {
        let root = tempfile::tempdir().unwrap();
        let docs = root.path().join("uploads");
        let kb = DirectoryKnowledgeBase::new(
            Arc::new(DocumentTextExtractor::new()),
            Arc::new(MockEmbeddingProvider::new()),
            Arc::new(MockAIProvider::new()),
            KnowledgeSettings::default(),
        );
        let dispatcher = MentionEventDispatcher::new(Arc::new(kb), &docs, Duration::from_secs(5));
        let mut session = session();

        dispatcher
            .dispatch(&[Mention::new("Base de Conhecimento", "k")], &mut session, "q")
            .await;

        assert!(docs.is_dir());
        assert_eq!(session.flow_state(), FlowState::KnowledgeBaseAccessed);
        assert!(session.context().is_empty());
    }
}
