//! Session lifecycle configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::SweepPolicy;

/// Idle eviction and turn log sizing.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// How often the idle sweep runs
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,

    /// Idle time after which a session is evicted
    #[serde(default = "default_max_idle")]
    pub max_idle_secs: u64,

    /// Turn log capacity per session
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
}

impl SessionConfig {
    pub fn sweep_policy(&self) -> SweepPolicy {
        SweepPolicy {
            interval: Duration::from_secs(self.sweep_interval_secs),
            max_idle: Duration::from_secs(self.max_idle_secs),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.sweep_interval_secs == 0 {
            return Err(ValidationError::InvalidSweepInterval);
        }
        if self.max_turns == 0 {
            return Err(ValidationError::InvalidTurnCapacity);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: default_sweep_interval(),
            max_idle_secs: default_max_idle(),
            max_turns: default_max_turns(),
        }
    }
}

fn default_sweep_interval() -> u64 {
    30 * 60
}

fn default_max_idle() -> u64 {
    30 * 60
}

fn default_max_turns() -> usize {
    50
}
