//! Validation pipeline
//!
//! One ordered pipeline per payload type. Every field is sanitized, failures
//! are collected instead of returned one by one, and the caller receives
//! either a fully normalized input or a single `InvalidInput` error whose
//! message is the first failure and whose details list every failing field.

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use shared::models::{
    EmployeePayload, EmployeeQuery, EmployeeStatus, PromotionPayload, SalaryRaisePayload,
    TerminationPayload,
};

use crate::utils::error::FIELDS_DETAIL;
use crate::utils::validation::*;
use crate::utils::{AppError, AppResult, ErrorCode};

// ── Fields ──────────────────────────────────────────────────────────

pub const NAME: Field = Field::new("name", "Name");
pub const EMAIL: Field = Field::new("email", "Email");
pub const CPF: Field = Field::new("cpf", "CPF");
pub const JOB_TITLE: Field = Field::new("job_title", "Job title");
pub const DEPARTMENT: Field = Field::new("department_id", "Department");
pub const INITIAL_SALARY: Field = Field::new("initial_salary", "Initial salary");
pub const PERCENTAGE: Field = Field::new("percentage", "Percentage");
pub const REASON: Field = Field::new("reason", "Reason");
pub const NEW_JOB_TITLE: Field = Field::new("new_job_title", "New job title");
pub const NAME_FILTER: Field = Field::new("name", "Name filter");

// ── Collector ───────────────────────────────────────────────────────

/// Ordered set of field failures
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    /// Keep the value, or record the failure and yield `None`
    pub fn check<T>(&mut self, result: FieldResult<T>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                self.errors.push(e);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Fold the collected failures into one `InvalidInput` error
    pub fn into_error(self) -> AppError {
        let Some(first) = self.errors.first() else {
            return AppError::new(ErrorCode::ValidationFailed);
        };
        let message = first.message.clone();

        let mut fields = Map::new();
        for e in self.errors {
            // First failure per field wins
            fields
                .entry(e.field.to_string())
                .or_insert(Value::String(e.message));
        }
        AppError::validation(message).with_detail(FIELDS_DETAIL, Value::Object(fields))
    }
}

// ── Inputs ──────────────────────────────────────────────────────────

/// Whether the employee payload is a hire (salary required) or a profile update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeMode {
    Hire,
    Update,
}

/// Normalized hire / profile update
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeInput {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub job_title: String,
    pub department_id: i64,
    /// Present on hire only
    pub initial_salary: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RaiseInput {
    pub percentage: Decimal,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromotionInput {
    pub new_job_title: String,
    pub percentage: Decimal,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TerminationInput {
    pub reason: String,
}

fn sanitize_department(value: Option<i64>) -> FieldResult<i64> {
    match value {
        None => Err(FieldError::new(DEPARTMENT, "Department is required.")),
        Some(id) if id <= 0 => Err(FieldError::new(
            DEPARTMENT,
            "Department must be a positive identifier.",
        )),
        Some(id) => Ok(id),
    }
}

fn sanitize_reason(value: Option<&str>) -> FieldResult<String> {
    sanitize_required_text(value, REASON, REASON_MIN_LEN, REASON_MAX_LEN)
}

/// Hire / profile update pipeline
///
/// `route_id` is the identifier from the URL on updates; a body id that
/// disagrees with it fails before any field is looked at.
pub fn employee_input(
    route_id: Option<i64>,
    payload: &EmployeePayload,
    mode: EmployeeMode,
) -> AppResult<EmployeeInput> {
    if let (Some(route), Some(body)) = (route_id, payload.id)
        && route != body
    {
        return Err(AppError::new(ErrorCode::EmployeeIdMismatch));
    }

    let mut errors = FieldErrors::default();
    let name = errors.check(sanitize_required_human_text(
        payload.name.as_deref(),
        NAME,
        NAME_MIN_LEN,
        NAME_MAX_LEN,
    ));
    let email = errors.check(sanitize_email(payload.email.as_deref(), EMAIL));
    let cpf = errors.check(sanitize_cpf(payload.cpf.as_deref(), CPF));
    let job_title = errors.check(sanitize_required_human_text(
        payload.job_title.as_deref(),
        JOB_TITLE,
        JOB_TITLE_MIN_LEN,
        JOB_TITLE_MAX_LEN,
    ));
    let department_id = errors.check(sanitize_department(payload.department_id));
    let initial_salary = match mode {
        EmployeeMode::Hire => errors
            .check(sanitize_money(payload.initial_salary, INITIAL_SALARY))
            .map(Some),
        EmployeeMode::Update => Some(None),
    };

    let (
        Some(name),
        Some(email),
        Some(cpf),
        Some(job_title),
        Some(department_id),
        Some(initial_salary),
    ) = (name, email, cpf, job_title, department_id, initial_salary)
    else {
        return Err(errors.into_error());
    };

    Ok(EmployeeInput {
        name,
        email,
        cpf,
        job_title,
        department_id,
        initial_salary,
    })
}

pub fn raise_input(payload: &SalaryRaisePayload) -> AppResult<RaiseInput> {
    let mut errors = FieldErrors::default();
    let percentage = errors.check(sanitize_percentage(payload.percentage, PERCENTAGE));
    let reason = errors.check(sanitize_reason(payload.reason.as_deref()));

    let (Some(percentage), Some(reason)) = (percentage, reason) else {
        return Err(errors.into_error());
    };
    Ok(RaiseInput { percentage, reason })
}

pub fn promotion_input(payload: &PromotionPayload) -> AppResult<PromotionInput> {
    let mut errors = FieldErrors::default();
    let new_job_title = errors.check(sanitize_required_human_text(
        payload.new_job_title.as_deref(),
        NEW_JOB_TITLE,
        JOB_TITLE_MIN_LEN,
        JOB_TITLE_MAX_LEN,
    ));
    let percentage = errors.check(sanitize_percentage(payload.percentage, PERCENTAGE));
    let reason = errors.check(sanitize_reason(payload.reason.as_deref()));

    let (Some(new_job_title), Some(percentage), Some(reason)) = (new_job_title, percentage, reason)
    else {
        return Err(errors.into_error());
    };
    Ok(PromotionInput {
        new_job_title,
        percentage,
        reason,
    })
}

pub fn termination_input(payload: &TerminationPayload) -> AppResult<TerminationInput> {
    let mut errors = FieldErrors::default();
    let Some(reason) = errors.check(sanitize_reason(payload.reason.as_deref())) else {
        return Err(errors.into_error());
    };
    Ok(TerminationInput { reason })
}

/// List filter: optional name substring (human text, 1-120) and status
pub fn employee_query(name: Option<&str>, status: Option<EmployeeStatus>) -> AppResult<EmployeeQuery> {
    let mut errors = FieldErrors::default();
    let Some(name) = errors.check(sanitize_human_text(name, NAME_FILTER, false, 1, NAME_MAX_LEN))
    else {
        return Err(errors.into_error());
    };
    Ok(EmployeeQuery { name, status })
}
