//! Background task that evicts idle sessions on a fixed interval.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::SessionRegistry;

/// Sweep cadence and idle threshold.
#[derive(Debug, Clone, Copy)]
pub struct SweepPolicy {
    pub interval: Duration,
    pub max_idle: Duration,
}

impl Default for SweepPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30 * 60),
            max_idle: Duration::from_secs(30 * 60),
        }
    }
}

/// Spawns the eviction loop. Abort the handle to stop it.
pub fn spawn_idle_sweeper(registry: Arc<SessionRegistry>, policy: SweepPolicy) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(policy.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let evicted = registry.evict_idle(policy.max_idle).await;
            let remaining = registry.len().await;
            if evicted > 0 {
                tracing::info!(evicted, remaining, "Idle session sweep finished");
            } else {
                tracing::debug!(remaining, "Idle session sweep found nothing to evict");
            }
        }
    })
}
