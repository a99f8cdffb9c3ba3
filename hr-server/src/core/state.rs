//! Server state shared by every handler

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::core::Config;
use crate::db::{DbService, seed};
use crate::diagnostics::FaultSimulator;
use crate::lifecycle::LifecycleEngine;
use crate::utils::{AppError, ErrorCode};

/// Server state
///
/// Cheap to clone: every field is a handle. The fault simulator is built once
/// here and lives as long as the process, so all requests compete for the
/// same admission permit.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub engine: LifecycleEngine,
    pub faults: Arc<FaultSimulator>,
    /// Cancelled when the server starts shutting down
    pub shutdown: CancellationToken,
    started_at: Instant,
}

impl ServerState {
    /// Open the database, run migrations and seed demo data if configured
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config.validate()?;

        if let Some(parent) = Path::new(&config.database_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::with_message(
                    ErrorCode::ConfigError,
                    format!("Cannot create {}: {e}", parent.display()),
                )
            })?;
        }

        let db = DbService::new(&config.database_path, config.db_max_connections).await?;
        let state = Self::with_db(config.clone(), db);

        if config.seed_demo_data {
            seed::seed_demo_data(&state.db, &state.engine).await?;
        }

        Ok(state)
    }

    /// Build state around an already opened database
    pub fn with_db(config: Config, db: DbService) -> Self {
        Self {
            engine: LifecycleEngine::new(db.clone()),
            faults: Arc::new(FaultSimulator::new()),
            shutdown: CancellationToken::new(),
            started_at: Instant::now(),
            config,
            db,
        }
    }

    /// Seconds since the state was created
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
