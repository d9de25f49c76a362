//! Shared specialist roles with timeout-bounded generation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::SessionId;
use crate::domain::orchestration::{prompts, GenerationProfile, OrchestrationError, SpecialistRole};
use crate::ports::{AIProvider, CompletionRequest, Message, RequestMetadata};

#[derive(Debug, Clone)]
struct RoleSetup {
    prompt: String,
    profile: GenerationProfile,
}

/// Every specialist role, built once at startup and shared read-only.
pub struct Specialists {
    provider: Arc<dyn AIProvider>,
    roles: HashMap<SpecialistRole, RoleSetup>,
    timeout: Duration,
}

impl Specialists {
    /// Creates the roles with their built-in prompts and profiles.
    pub fn new(provider: Arc<dyn AIProvider>, timeout: Duration) -> Self {
        let roles = SpecialistRole::ALL
            .iter()
            .map(|role| {
                (
                    *role,
                    RoleSetup {
                        prompt: prompts::default_prompt(*role).to_string(),
                        profile: GenerationProfile::default_for(*role),
                    },
                )
            })
            .collect();

        Self {
            provider,
            roles,
            timeout,
        }
    }

    /// Overrides the sampling profile of a role.
    pub fn with_profile(mut self, role: SpecialistRole, profile: GenerationProfile) -> Self {
        if let Some(setup) = self.roles.get_mut(&role) {
            setup.profile = profile;
        }
        self
    }

    /// Overrides the system prompt of a role.
    pub fn with_prompt(mut self, role: SpecialistRole, prompt: impl Into<String>) -> Self {
        if let Some(setup) = self.roles.get_mut(&role) {
            setup.prompt = prompt.into();
        }
        self
    }

    pub fn profile(&self, role: SpecialistRole) -> GenerationProfile {
        self.roles
            .get(&role)
            .map(|setup| setup.profile)
            .unwrap_or_else(|| GenerationProfile::default_for(role))
    }

    pub fn prompt(&self, role: SpecialistRole) -> &str {
        self.roles
            .get(&role)
            .map(|setup| setup.prompt.as_str())
            .unwrap_or_else(|| prompts::default_prompt(role))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs one completion for `role` and returns the generated text.
    pub async fn generate(
        &self,
        role: SpecialistRole,
        session_id: &SessionId,
        messages: Vec<Message>,
    ) -> Result<String, OrchestrationError> {
        let profile = self.profile(role);
        let request = CompletionRequest::new(RequestMetadata::for_role(Some(session_id.clone()), role))
            .with_system_prompt(self.prompt(role))
            .with_messages(messages)
            .with_temperature(profile.temperature)
            .with_max_tokens(profile.max_tokens);

        match tokio::time::timeout(self.timeout, self.provider.complete(request)).await {
            Ok(Ok(response)) => Ok(response.content),
            Ok(Err(err)) => Err(OrchestrationError::generation(role, err.to_string())),
            Err(_) => Err(OrchestrationError::timeout(role, self.timeout.as_secs())),
        }
    }
}
