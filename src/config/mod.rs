//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `CHAT_ORCHESTRATOR`
//! prefix and `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use mention_flow::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod knowledge;
mod server;
mod session;
mod specialists;
mod speech;
mod uploads;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use knowledge::KnowledgeConfig;
pub use server::{Environment, ServerConfig};
pub use session::SessionConfig;
pub use specialists::{ProfileConfig, SpecialistsConfig};
pub use speech::SpeechConfig;
pub use uploads::UploadsConfig;

use serde::Deserialize;
use std::time::Duration;

/// Root application configuration
///
/// Every section has defaults; only `ai.openai_api_key` must be supplied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// OpenAI connection settings
    #[serde(default)]
    pub ai: AiConfig,

    /// Per-role generation profiles
    #[serde(default)]
    pub specialists: SpecialistsConfig,

    /// Session eviction and turn log sizing
    #[serde(default)]
    pub session: SessionConfig,

    /// Knowledge base documents and retrieval
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Audio replies
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Upload limits
    #[serde(default)]
    pub uploads: UploadsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads `CHAT_ORCHESTRATOR__*` variables:
    ///
    /// - `CHAT_ORCHESTRATOR__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CHAT_ORCHESTRATOR__AI__OPENAI_API_KEY=...` -> `ai.openai_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CHAT_ORCHESTRATOR")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.specialists.validate()?;
        self.session.validate()?;
        self.knowledge.validate()?;
        self.speech.validate()?;
        self.uploads.validate()?;

        let turn_secs = self.turn_budget_secs();
        if self.server.request_timeout_secs <= turn_secs {
            return Err(ValidationError::RequestTimeoutBelowTurnBudget {
                request_secs: self.server.request_timeout_secs,
                turn_secs,
            });
        }
        Ok(())
    }

    /// Upper bound for one chat turn: classifier and specialist calls plus
    /// the knowledge lookup.
    pub fn turn_timeout(&self) -> Duration {
        Duration::from_secs(2 * self.ai.timeout_secs + self.knowledge.lookup_timeout_secs)
    }

    /// Seconds a chat request may spend before the response is written,
    /// including speech synthesis when enabled.
    fn turn_budget_secs(&self) -> u64 {
        let speech = if self.speech.enabled {
            self.ai.timeout_secs
        } else {
            0
        };
        self.turn_timeout().as_secs() + speech
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "CHAT_ORCHESTRATOR__AI__OPENAI_API_KEY",
        "CHAT_ORCHESTRATOR__SERVER__PORT",
        "CHAT_ORCHESTRATOR__SERVER__ENVIRONMENT",
        "CHAT_ORCHESTRATOR__SESSION__MAX_TURNS",
        "CHAT_ORCHESTRATOR__SPECIALISTS__PRINCIPAL__TEMPERATURE",
        "CHAT_ORCHESTRATOR__SPECIALISTS__PRINCIPAL__MAX_TOKENS",
        "CHAT_ORCHESTRATOR__KNOWLEDGE__EXTENSIONS",
    ];

    fn set_minimal_env() {
        env::set_var("CHAT_ORCHESTRATOR__AI__OPENAI_API_KEY", "sk-test");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.ai.has_openai());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_without_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.session.max_turns, 50);
        assert_eq!(config.knowledge.extensions_list(), vec!["pdf"]);
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("OPENAI_API_KEY"))
        );
    }

    #[test]
    fn test_turn_budget_must_fit_request_timeout() {
        let mut config = AppConfig::default();
        config.ai.openai_api_key = Some(secrecy::Secret::new("sk-test".to_string()));
        config.speech.enabled = true;
        config.ai.timeout_secs = 30;
        config.knowledge.lookup_timeout_secs = 60;
        assert_eq!(config.turn_timeout(), Duration::from_secs(120));

        config.server.request_timeout_secs = 150;
        assert_eq!(
            config.validate(),
            Err(ValidationError::RequestTimeoutBelowTurnBudget {
                request_secs: 150,
                turn_secs: 150,
            })
        );

        config.speech.enabled = false;
        assert!(config.validate().is_ok());

        config.server.request_timeout_secs = 180;
        config.speech.enabled = true;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CHAT_ORCHESTRATOR__SERVER__PORT", "8081");
        env::set_var("CHAT_ORCHESTRATOR__SERVER__ENVIRONMENT", "production");
        env::set_var("CHAT_ORCHESTRATOR__SESSION__MAX_TURNS", "5");
        env::set_var("CHAT_ORCHESTRATOR__SPECIALISTS__PRINCIPAL__TEMPERATURE", "0.4");
        env::set_var("CHAT_ORCHESTRATOR__SPECIALISTS__PRINCIPAL__MAX_TOKENS", "900");
        env::set_var("CHAT_ORCHESTRATOR__KNOWLEDGE__EXTENSIONS", "pdf,txt");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 8081);
        assert!(config.is_production());
        assert_eq!(config.session.max_turns, 5);
        assert_eq!(config.specialists.principal.max_tokens, 900);
        assert!((config.specialists.principal.temperature - 0.4).abs() < f32::EPSILON);
        assert_eq!(config.knowledge.extensions_list(), vec!["pdf", "txt"]);
    }
}
