//! API routes
//!
//! - [`health`] - liveness
//! - [`employees`] - employee lifecycle
//! - [`departments`] - department lookup
//! - [`diagnostics`] - fault-injection endpoints

pub mod departments;
pub mod diagnostics;
pub mod employees;
pub mod health;

use axum::Router;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(employees::router())
        .merge(departments::router())
        .merge(diagnostics::router())
}

/// Build the application with middleware
///
/// Used by the HTTP server and by in-process tests.
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Outer deadline, above every diagnostic delay
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            Duration::from_millis(state.config.request_timeout_ms),
        ))
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
}
