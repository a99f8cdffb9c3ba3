//! Admission Controller
//!
//! A single-permit gate: one caller at a time, everyone else is turned away
//! immediately. No queue, no fairness, not reentrant.

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use super::{HOLD, validate_millis};
use crate::utils::{AppError, AppResult};

/// Returned when the protected section completes
pub const REQUEST_PROCESSED: &str = "Request processed successfully";

/// Held while inside the protected section; released on drop
#[derive(Debug)]
pub struct AdmissionPermit {
    _permit: OwnedSemaphorePermit,
}

/// Process-wide binary permit, shared by cloning
#[derive(Debug, Clone)]
pub struct AdmissionController {
    permits: Arc<Semaphore>,
}

impl Default for AdmissionController {
    fn default() -> Self {
        Self::new()
    }
}

impl AdmissionController {
    pub fn new() -> Self {
        Self {
            permits: Arc::new(Semaphore::new(1)),
        }
    }

    /// Non-blocking acquire; fails with Overload while another caller holds the permit
    pub fn try_enter(&self) -> AppResult<AdmissionPermit> {
        match self.permits.clone().try_acquire_owned() {
            Ok(permit) => Ok(AdmissionPermit { _permit: permit }),
            Err(_) => {
                tracing::warn!("Admission rejected: permit already held");
                Err(AppError::overloaded())
            }
        }
    }

    /// Whether the permit is currently free
    pub fn is_available(&self) -> bool {
        self.permits.available_permits() > 0
    }

    /// Hold the permit for `hold_ms`, or fail immediately if it is taken
    pub async fn simulate_overload(&self, hold_ms: i64) -> AppResult<&'static str> {
        let hold = validate_millis(hold_ms, HOLD)?;
        let _permit = self.try_enter()?;
        tokio::time::sleep(hold).await;
        Ok(REQUEST_PROCESSED)
    }

    /// Hold the permit while `work` runs (scoped acquisition)
    pub async fn run<F, T>(&self, work: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        let _permit = self.try_enter()?;
        work.await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorKind;
    use std::time::Duration;

    #[tokio::test]
    async fn test_second_caller_is_rejected_while_held() {
        let controller = AdmissionController::new();

        let first = {
            let c = controller.clone();
            tokio::spawn(async move { c.simulate_overload(250).await })
        };
        tokio::time::sleep(Duration::from_millis(30)).await;
        let second = controller.simulate_overload(250).await;

        let err = second.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overload);
        assert_eq!(
            err.message,
            "System temporarily overloaded. Please try again shortly."
        );
        assert_eq!(first.await.unwrap().unwrap(), REQUEST_PROCESSED);
        assert!(controller.is_available());
    }

    #[tokio::test]
    async fn test_permit_released_on_failure() {
        let controller = AdmissionController::new();

        let result: AppResult<()> = controller
            .run(async { Err(AppError::internal("boom")) })
            .await;
        assert!(result.is_err());
        assert!(controller.is_available());

        let value = controller.run(async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_not_reentrant() {
        let controller = AdmissionController::new();
        let held = controller.try_enter().unwrap();
        assert!(!controller.is_available());
        assert_eq!(
            controller.try_enter().unwrap_err().kind(),
            ErrorKind::Overload
        );
        drop(held);
        assert!(controller.try_enter().is_ok());
    }

    #[tokio::test]
    async fn test_hold_validated_before_acquire() {
        let controller = AdmissionController::new();
        let err = controller.simulate_overload(-1).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        let err = controller.simulate_overload(15_001).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.message, "Invalid hold parameter.");
        assert!(err.field_errors().unwrap().contains_key("hold_ms"));
        assert!(controller.is_available());
    }
}
