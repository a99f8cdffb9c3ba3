//! Department API

use axum::{Json, Router, extract::State, routing::get};
use shared::models::Department;

use crate::core::ServerState;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/departments", get(list))
}

/// List departments ordered by name
async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Department>>> {
    Ok(Json(state.engine.list_departments().await?))
}
