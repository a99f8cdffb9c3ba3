//! HR Server - employee lifecycle service
//!
//! # Architecture
//!
//! - **Lifecycle engine** (`lifecycle`): hire, profile update, raise, promotion,
//!   termination and purge, each recorded as a movement
//! - **Sanitizer** (`utils::validation`): normalizes and rejects untrusted input
//! - **Database** (`db`): SQLite via sqlx, one serialized transaction per write
//! - **Diagnostics** (`diagnostics`): timeout guard and admission controller
//! - **HTTP API** (`api`): axum routes over the engine
//!
//! # Module layout
//!
//! ```text
//! hr-server/src/
//! ├── core/          # config, state, server
//! ├── db/            # pool, repositories, seed data
//! ├── lifecycle/     # engine, validation pipeline, salary arithmetic
//! ├── diagnostics/   # fault-injection primitives
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # errors, logger, sanitizer
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod diagnostics;
pub mod lifecycle;
pub mod utils;

// Re-export public types
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use diagnostics::FaultSimulator;
pub use lifecycle::LifecycleEngine;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCode, ErrorKind};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, prepare the working directory and start logging
///
/// Returns the configuration read after `.env` was applied.
pub fn setup_environment() -> Result<Config, Box<dyn std::error::Error>> {
    // A missing .env file is fine
    dotenv::dotenv().ok();

    let config = Config::from_env();
    std::fs::create_dir_all(&config.work_dir)?;
    if let Some(dir) = &config.log_dir {
        std::fs::create_dir_all(dir)?;
    }

    init_logger_with_file(
        Some(&config.log_level),
        Some(config.log_json),
        config.log_dir.as_deref(),
    );
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
  _   _ ____
 | | | |  _ \
 | |_| | |_) |
 |  _  |  _ <
 |_| |_|_| \_\   employee lifecycle service
    "#
    );
}
