//! Errors raised by the orchestration pipeline.

use std::time::Duration;
use thiserror::Error;

use super::SpecialistRole;

/// Fixed reply returned to the user when a turn cannot be generated.
pub const APOLOGY_RESPONSE: &str = "Desculpe, ocorreu um erro. Pode tentar novamente?";

/// Failure of a generation step. Always recoverable at the turn level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrchestrationError {
    #[error("{role} generation failed: {message}")]
    Generation { role: SpecialistRole, message: String },

    #[error("{role} generation timed out after {timeout_secs}s")]
    Timeout { role: SpecialistRole, timeout_secs: u64 },

    #[error("turn did not finish within {0:?}")]
    TurnTimeout(Duration),
}

impl OrchestrationError {
    pub fn generation(role: SpecialistRole, message: impl Into<String>) -> Self {
        OrchestrationError::Generation {
            role,
            message: message.into(),
        }
    }

    pub fn timeout(role: SpecialistRole, timeout_secs: u64) -> Self {
        OrchestrationError::Timeout { role, timeout_secs }
    }

    /// The role whose call failed; `None` when the whole turn overran.
    pub fn role(&self) -> Option<SpecialistRole> {
        match self {
            OrchestrationError::Generation { role, .. } => Some(*role),
            OrchestrationError::Timeout { role, .. } => Some(*role),
            OrchestrationError::TurnTimeout(_) => None,
        }
    }
}
