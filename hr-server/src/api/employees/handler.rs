//! Employee API Handlers

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;
use shared::models::{
    Employee, EmployeePayload, EmployeeQuery, EmployeeStatus, Movement, PromotionPayload,
    SalaryRaisePayload, TerminationPayload,
};

use crate::core::ServerState;
use crate::utils::AppResult;
use crate::utils::error::{json_rejection, path_rejection, query_rejection};

/// `?name=` substring and `?active=` flag
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub name: Option<String>,
    pub active: Option<bool>,
}

fn id_from(path: Result<Path<i64>, PathRejection>) -> AppResult<i64> {
    path.map(|Path(id)| id).map_err(path_rejection)
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload.map(|Json(p)| p).map_err(json_rejection)
}

/// List employees ordered by name
pub async fn list(
    State(state): State<ServerState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> AppResult<Json<Vec<Employee>>> {
    let Query(params) = params.map_err(query_rejection)?;
    let query = EmployeeQuery {
        name: params.name,
        status: EmployeeStatus::from_active_flag(params.active),
    };
    Ok(Json(state.engine.list_employees(query).await?))
}

/// Get employee by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Employee>> {
    let id = id_from(path)?;
    Ok(Json(state.engine.get_employee(id).await?))
}

/// Movement trail, newest first
pub async fn movements(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Vec<Movement>>> {
    let id = id_from(path)?;
    Ok(Json(state.engine.list_movements(id).await?))
}

/// Hire a new employee
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<EmployeePayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    let employee = state.engine.hire(body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Update name, email, cpf, job title and department
pub async fn update(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<EmployeePayload>, JsonRejection>,
) -> AppResult<Json<Employee>> {
    let id = id_from(path)?;
    Ok(Json(state.engine.update_profile(id, body(payload)?).await?))
}

pub async fn raise(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<SalaryRaisePayload>, JsonRejection>,
) -> AppResult<Json<Employee>> {
    let id = id_from(path)?;
    Ok(Json(state.engine.raise(id, body(payload)?).await?))
}

pub async fn promote(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<PromotionPayload>, JsonRejection>,
) -> AppResult<Json<Employee>> {
    let id = id_from(path)?;
    Ok(Json(state.engine.promote(id, body(payload)?).await?))
}

pub async fn terminate(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TerminationPayload>, JsonRejection>,
) -> AppResult<Json<Employee>> {
    let id = id_from(path)?;
    Ok(Json(state.engine.terminate(id, body(payload)?).await?))
}

/// Permanently delete an employee and its movements
pub async fn delete(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<StatusCode> {
    let id = id_from(path)?;
    state.engine.purge(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
