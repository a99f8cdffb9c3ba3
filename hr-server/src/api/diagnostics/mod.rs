//! Diagnostics API Module
//!
//! | Path | Method | Operation |
//! |------|--------|-----------|
//! | /api/diagnostics/timeout?delay_ms=100&timeout_ms=200 | GET | timeout guard |
//! | /api/diagnostics/overload?hold_ms=1000 | GET | admission controller |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/diagnostics", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/timeout", get(handler::timeout))
        .route("/overload", get(handler::overload))
}
