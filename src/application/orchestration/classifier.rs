//! Classifier stage - picks the routing category for a user input.

use std::sync::Arc;

use super::Specialists;
use crate::domain::foundation::SessionId;
use crate::domain::orchestration::{
    contains_mention, Category, InputType, OrchestrationError, SpecialistRole,
};
use crate::ports::{Message, ResourceProbe};

/// Applies the routing rules in order:
/// an existing local path, then mention syntax, then the classifier model.
pub struct Classifier {
    probe: Arc<dyn ResourceProbe>,
    specialists: Arc<Specialists>,
}

impl Classifier {
    pub fn new(probe: Arc<dyn ResourceProbe>, specialists: Arc<Specialists>) -> Self {
        Self { probe, specialists }
    }

    pub async fn classify(
        &self,
        input: &str,
        input_type: InputType,
        session_id: &SessionId,
    ) -> Result<Category, OrchestrationError> {
        if self.probe.exists(input).await {
            return Ok(Category::ImageText);
        }

        if contains_mention(input) {
            return Ok(Category::MentionExtract);
        }

        let raw = self
            .specialists
            .generate(SpecialistRole::Classifier, session_id, vec![Message::user(input)])
            .await?;

        match Category::parse_label(&raw) {
            Some(category) => Ok(category),
            None => {
                tracing::warn!(
                    session_id = %session_id,
                    input_type = ?input_type,
                    output = %raw.trim(),
                    "Classifier returned an unknown category, using general"
                );
                Ok(Category::General)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::probe::StaticResourceProbe;
    use std::time::Duration;

    fn classifier(provider: &MockAIProvider, existing: &[&str]) -> Classifier {
        let specialists = Arc::new(Specialists::new(
            Arc::new(provider.clone()),
            Duration::from_secs(5),
        ));
        Classifier::new(
            Arc::new(StaticResourceProbe::new(existing.iter().copied())),
            specialists,
        )
    }

    fn session() -> SessionId {
        SessionId::new("s").unwrap()
    }

    #[tokio::test]
    async fn existing_path_is_image_text_even_with_mentions() {
        let provider = MockAIProvider::new();
        let c = classifier(&provider, &["@[Inicio](x)"]);

        let category = c.classify("@[Inicio](x)", InputType::Text, &session()).await.unwrap();

        assert_eq!(category, Category::ImageText);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn mention_syntax_is_mention_extract_without_model_call() {
        let provider = MockAIProvider::new();
        let c = classifier(&provider, &[]);

        let category = c
            .classify("execute @[Análise](analise-cliente-001)", InputType::Text, &session())
            .await
            .unwrap();

        assert_eq!(category, Category::MentionExtract);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn model_output_is_trimmed_and_lowercased() {
        let provider = MockAIProvider::new().with_response("  IMAGE_TEXT\n");
        let c = classifier(&provider, &[]);

        let category = c.classify("olha essa foto", InputType::Text, &session()).await.unwrap();

        assert_eq!(category, Category::ImageText);
        assert_eq!(provider.get_calls()[0].messages[0].content, "olha essa foto");
    }

    #[tokio::test]
    async fn unknown_model_output_falls_back_to_general() {
        let provider = MockAIProvider::new().with_response("small talk");
        let c = classifier(&provider, &[]);

        let category = c.classify("oi", InputType::Text, &session()).await.unwrap();
        assert_eq!(category, Category::General);
    }

    #[tokio::test]
    async fn model_failure_propagates() {
        let provider = MockAIProvider::new().with_error(MockError::Network {
            message: "reset".to_string(),
        });
        let c = classifier(&provider, &[]);

        assert!(c.classify("oi", InputType::Text, &session()).await.is_err());
    }
}
