//! Timeout Guard
//!
//! Races a delayed unit of work against a deadline. Cancellation is
//! cooperative: when the deadline wins, the work is told to stop and then
//! detached, so it may still run to completion in the background.

use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::{DELAY, MAX_DIAGNOSTIC_MS, validate_millis};
use crate::utils::{AppError, AppResult};

/// Returned when the work beats the deadline
pub const PROCESSING_FINISHED: &str = "Processing finished";

/// User-visible message for every timeout outcome
pub const TIMEOUT_MESSAGE: &str = "Time limit exceeded while processing the operation.";

/// Why the guard gave up (logged, never exposed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardFailure {
    DeadlineElapsed,
    Interrupted,
}

/// Deadline race over a spawned task
#[derive(Debug, Clone, Default)]
pub struct TimeoutGuard;

impl TimeoutGuard {
    pub fn new() -> Self {
        Self
    }

    /// Sleep `delay_ms` in a background task and wait at most `timeout_ms` for it
    ///
    /// `interrupt` lets the caller abandon the wait; it fails exactly like a
    /// deadline does.
    pub async fn run(
        &self,
        delay_ms: i64,
        timeout_ms: i64,
        interrupt: &CancellationToken,
    ) -> AppResult<&'static str> {
        let delay = validate_millis(delay_ms, DELAY)?;
        let timeout = validate_timeout(timeout_ms)?;

        let cancel = CancellationToken::new();
        let work_cancel = cancel.clone();
        let mut work = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if work_cancel.is_cancelled() {
                tracing::debug!(delay_ms, "Abandoned work finished after its deadline");
            }
            PROCESSING_FINISHED
        });

        let failure = tokio::select! {
            biased;
            joined = &mut work => {
                return joined.map_err(|e| {
                    tracing::error!(error = %e, "Timed work failed unexpectedly");
                    AppError::internal("Unexpected failure during asynchronous processing")
                });
            }
            _ = tokio::time::sleep(timeout) => GuardFailure::DeadlineElapsed,
            _ = interrupt.cancelled() => GuardFailure::Interrupted,
        };

        // Best effort: the task only observes this after its sleep, and the
        // dropped handle detaches it rather than aborting it.
        cancel.cancel();
        drop(work);

        tracing::warn!(?failure, delay_ms, timeout_ms, "Timeout guard gave up");
        Err(AppError::timeout(TIMEOUT_MESSAGE))
    }
}

fn validate_timeout(timeout_ms: i64) -> AppResult<Duration> {
    if timeout_ms <= 0 || timeout_ms > MAX_DIAGNOSTIC_MS as i64 {
        return Err(AppError::invalid_field("timeout_ms", "Invalid timeout parameter."));
    }
    Ok(Duration::from_millis(timeout_ms as u64))
}
