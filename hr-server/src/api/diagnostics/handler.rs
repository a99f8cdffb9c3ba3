//! Diagnostics API Handlers

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::utils::AppResult;
use crate::utils::error::query_rejection;

#[derive(Debug, Deserialize)]
pub struct TimeoutParams {
    #[serde(default = "default_delay_ms")]
    pub delay_ms: i64,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: i64,
}

#[derive(Debug, Deserialize)]
pub struct OverloadParams {
    #[serde(default = "default_hold_ms")]
    pub hold_ms: i64,
}

fn default_delay_ms() -> i64 {
    100
}

fn default_timeout_ms() -> i64 {
    200
}

fn default_hold_ms() -> i64 {
    1000
}

#[derive(Debug, Serialize)]
pub struct DiagnosticStatus {
    pub status: &'static str,
}

/// Race a delayed task against a deadline
pub async fn timeout(
    State(state): State<ServerState>,
    params: Result<Query<TimeoutParams>, QueryRejection>,
) -> AppResult<Json<DiagnosticStatus>> {
    let Query(params) = params.map_err(query_rejection)?;
    let interrupt = state.shutdown.child_token();
    let status = state
        .faults
        .simulate_timeout(params.delay_ms, params.timeout_ms, &interrupt)
        .await?;
    Ok(Json(DiagnosticStatus { status }))
}

/// Hold the single admission permit for `hold_ms`
pub async fn overload(
    State(state): State<ServerState>,
    params: Result<Query<OverloadParams>, QueryRejection>,
) -> AppResult<Json<DiagnosticStatus>> {
    let Query(params) = params.map_err(query_rejection)?;
    let status = state.faults.simulate_overload(params.hold_ms).await?;
    Ok(Json(DiagnosticStatus { status }))
}
