//! Fault-injection primitives
//!
//! Used by the diagnostic endpoints to simulate a slow dependency
//! ([`TimeoutGuard`]) and an overloaded service ([`AdmissionController`]).
//! Neither touches the lifecycle engine.

pub mod admission;
pub mod timeout;

pub use admission::{AdmissionController, AdmissionPermit, REQUEST_PROCESSED};
pub use timeout::{GuardFailure, PROCESSING_FINISHED, TIMEOUT_MESSAGE, TimeoutGuard};

use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::utils::validation::Field;
use crate::utils::{AppError, AppResult};

pub(crate) const DELAY: Field = Field::new("delay_ms", "delay");
pub(crate) const HOLD: Field = Field::new("hold_ms", "hold");

/// Upper bound for every diagnostic delay, hold and timeout (inclusive)
pub const MAX_DIAGNOSTIC_MS: u64 = 15_000;

/// Delays and holds must lie in [0, 15000] ms; failures name `field`
pub(crate) fn validate_millis(value_ms: i64, field: Field) -> AppResult<Duration> {
    if value_ms < 0 || value_ms > MAX_DIAGNOSTIC_MS as i64 {
        return Err(AppError::invalid_field(
            field.key,
            format!("Invalid {} parameter.", field.label),
        ));
    }
    Ok(Duration::from_millis(value_ms as u64))
}

/// Both primitives, built once per process and shared through the server state
#[derive(Debug, Clone, Default)]
pub struct FaultSimulator {
    timeout_guard: TimeoutGuard,
    admission: AdmissionController,
}

impl FaultSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn simulate_timeout(
        &self,
        delay_ms: i64,
        timeout_ms: i64,
        interrupt: &CancellationToken,
    ) -> AppResult<&'static str> {
        self.timeout_guard.run(delay_ms, timeout_ms, interrupt).await
    }

    pub async fn simulate_overload(&self, hold_ms: i64) -> AppResult<&'static str> {
        self.admission.simulate_overload(hold_ms).await
    }

    pub fn admission(&self) -> &AdmissionController {
        &self.admission
    }
}
