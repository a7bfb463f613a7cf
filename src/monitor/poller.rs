//! Completion poller: drives remote summary computation to a terminal state.
//!
//! The server computes summaries asynchronously and offers no push channel,
//! so the only coordination available is to trigger, then poll the running
//! set until it drains. The loop is bounded; a check that never finishes
//! surfaces as `ChecksStillRunning` instead of blocking forever.

use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::domain::IntegritySummaries;
use crate::error::{MonitorError, Result};
use crate::monitor::IntegrityService;

/// Timing and deadline for one poll-to-completion run
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Wait after triggering before the first running query, so a slow
    /// scheduler is not misread as "nothing running"
    pub settle: Duration,
    /// Wait between running queries
    pub interval: Duration,
    /// Running queries allowed before the run is abandoned
    pub max_attempts: u32,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            settle: Duration::from_secs(5),
            interval: Duration::from_secs(5),
            max_attempts: 120,
        }
    }
}

pub struct CompletionPoller {
    config: PollerConfig,
}

impl CompletionPoller {
    pub fn new(config: PollerConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(PollerConfig::default())
    }

    /// Trigger all checks, then poll until no check is running, and return
    /// the completed summaries.
    ///
    /// A failed running query is retried, never treated as completion; it
    /// still consumes an attempt so a dead server cannot stall the run
    /// past its deadline.
    pub async fn run<S: IntegrityService + ?Sized>(
        &self,
        service: &S,
    ) -> Result<IntegritySummaries> {
        if let Err(e) = service.trigger_all_summaries().await {
            // Fire-and-forget: a lost ack does not mean the server did not
            // start computing, so keep polling.
            warn!("Failed to trigger integrity summaries, polling anyway: {}", e);
        }

        debug!(settle_secs = self.config.settle.as_secs(), "Settling before first poll");
        sleep(self.config.settle).await;

        for attempt in 1..=self.config.max_attempts {
            match service.fetch_running_checks().await {
                Ok(running) if running.is_empty() => {
                    info!(attempts = attempt, "All integrity checks completed");
                    return service.fetch_completed_summaries().await;
                }
                Ok(running) => {
                    info!(
                        remaining = running.len(),
                        attempt, "Waiting for integrity checks to complete"
                    );
                }
                Err(e) => {
                    warn!(attempt, "Could not query running checks: {}", e);
                }
            }

            if attempt < self.config.max_attempts {
                sleep(self.config.interval).await;
            }
        }

        Err(MonitorError::ChecksStillRunning {
            attempts: self.config.max_attempts,
        })
    }
}
