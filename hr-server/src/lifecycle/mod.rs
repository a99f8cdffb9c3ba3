//! Lifecycle Engine
//!
//! Orchestrates every employee state transition. Each mutating operation runs
//! as validate → load → check → persist → append movement inside one write
//! transaction, so a failure at any step leaves no trace.
//!
//! # State machine
//!
//! ```text
//! hire ──► ACTIVE ──terminate──► INACTIVE
//!           │  ▲
//!           └──┘ update_profile / raise / promote
//! ```
//!
//! INACTIVE is terminal: raise and promote require ACTIVE, terminating twice
//! fails, and only `purge` removes an inactive employee.

pub mod input;
pub mod money;


use rust_decimal::Decimal;
use shared::models::{
    Department, Employee, EmployeePayload, EmployeeQuery, EmployeeStatus, Movement,
    MovementCreate, MovementType, PromotionPayload, SalaryRaisePayload, TerminationPayload,
};
use sqlx::SqliteConnection;

use crate::db::DbService;
use crate::db::repository::{RepoError, department, employee, movement};
use crate::utils::validation::validate_id;
use crate::utils::{AppError, AppResult, ErrorCode};
use input::EmployeeMode;

/// Employee lifecycle engine (cheap to clone)
#[derive(Clone)]
pub struct LifecycleEngine {
    db: DbService,
}

impl LifecycleEngine {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Employees ordered by name, filtered by name substring and/or status
    pub async fn list_employees(&self, query: EmployeeQuery) -> AppResult<Vec<Employee>> {
        let query = input::employee_query(query.name.as_deref(), query.status)?;
        let mut conn = self.db.read().await?;
        Ok(employee::list(&mut conn, &query).await?)
    }

    pub async fn get_employee(&self, id: i64) -> AppResult<Employee> {
        validate_id(id)?;
        let mut conn = self.db.read().await?;
        load_employee(&mut conn, id).await
    }

    /// Audit trail of an employee, newest first
    ///
    /// Unknown ids yield an empty trail rather than NotFound.
    pub async fn list_movements(&self, id: i64) -> AppResult<Vec<Movement>> {
        validate_id(id)?;
        let mut conn = self.db.read().await?;
        Ok(movement::list_by_employee(&mut conn, id).await?)
    }

    pub async fn list_departments(&self) -> AppResult<Vec<Department>> {
        let mut conn = self.db.read().await?;
        Ok(department::list(&mut conn).await?)
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    pub async fn hire(&self, payload: EmployeePayload) -> AppResult<Employee> {
        let data = input::employee_input(None, &payload, EmployeeMode::Hire)?;
        let salary = data
            .initial_salary
            .ok_or_else(|| AppError::invalid_field(input::INITIAL_SALARY.key, "Initial salary is required."))?;

        let mut tx = self.db.begin_write().await?;
        ensure_unique(tx.conn(), &data.email, &data.cpf, None).await?;
        let dept = find_department(tx.conn(), data.department_id).await?;

        let created = employee::create(
            tx.conn(),
            employee::NewEmployee {
                name: data.name,
                email: data.email,
                cpf: data.cpf,
                job_title: data.job_title,
                department_id: dept.id,
                salary,
                hire_date: shared::util::today(),
            },
        )
        .await
        .map_err(integrity_violation)?;

        record(
            tx.conn(),
            &created,
            MovementType::Hire,
            "Hire completed".to_string(),
            None,
        )
        .await?;
        tx.commit().await?;

        tracing::info!(
            employee_id = created.id,
            department = %created.department.code,
            salary = %created.salary.amount,
            "Employee hired"
        );
        Ok(created)
    }

    /// Replace name, email, cpf, job title and department; salary is untouched
    pub async fn update_profile(&self, id: i64, payload: EmployeePayload) -> AppResult<Employee> {
        validate_id(id)?;
        let data = input::employee_input(Some(id), &payload, EmployeeMode::Update)?;

        let mut tx = self.db.begin_write().await?;
        let mut current = load_employee(tx.conn(), id).await?;
        ensure_unique(tx.conn(), &data.email, &data.cpf, Some(id)).await?;
        let dept = find_department(tx.conn(), data.department_id).await?;

        current.name = data.name;
        current.email = data.email;
        current.cpf = data.cpf;
        current.job_title = data.job_title;
        current.department = dept;
        let saved = employee::save(tx.conn(), &current)
            .await
            .map_err(integrity_violation)?;

        let salary = saved.salary.amount;
        record(
            tx.conn(),
            &saved,
            MovementType::ProfileUpdate,
            "Profile updated".to_string(),
            Some(salary),
        )
        .await?;
        tx.commit().await?;

        tracing::info!(employee_id = saved.id, "Employee profile updated");
        Ok(saved)
    }

    pub async fn raise(&self, id: i64, payload: SalaryRaisePayload) -> AppResult<Employee> {
        validate_id(id)?;
        let data = input::raise_input(&payload)?;

        let mut tx = self.db.begin_write().await?;
        let mut current = load_employee(tx.conn(), id).await?;
        require_active(&current, "raise")?;

        let prior = current.salary.amount;
        current.salary.amount = money::apply_raise(prior, data.percentage);
        let saved = employee::save(tx.conn(), &current)
            .await
            .map_err(integrity_violation)?;

        record(
            tx.conn(),
            &saved,
            MovementType::Raise,
            format!("Salary raise: {}", data.reason),
            Some(prior),
        )
        .await?;
        tx.commit().await?;

        tracing::info!(
            employee_id = saved.id,
            prior = %prior,
            new = %saved.salary.amount,
            percentage = %data.percentage,
            "Salary raised"
        );
        Ok(saved)
    }

    pub async fn promote(&self, id: i64, payload: PromotionPayload) -> AppResult<Employee> {
        validate_id(id)?;
        let data = input::promotion_input(&payload)?;

        let mut tx = self.db.begin_write().await?;
        let mut current = load_employee(tx.conn(), id).await?;
        require_active(&current, "promote")?;

        let prior = current.salary.amount;
        current.job_title = data.new_job_title;
        current.salary.amount = money::apply_raise(prior, data.percentage);
        let saved = employee::save(tx.conn(), &current)
            .await
            .map_err(integrity_violation)?;

        record(
            tx.conn(),
            &saved,
            MovementType::Promotion,
            format!("Promotion: {}", data.reason),
            Some(prior),
        )
        .await?;
        tx.commit().await?;

        tracing::info!(
            employee_id = saved.id,
            job_title = %saved.job_title,
            prior = %prior,
            new = %saved.salary.amount,
            "Employee promoted"
        );
        Ok(saved)
    }

    pub async fn terminate(&self, id: i64, payload: TerminationPayload) -> AppResult<Employee> {
        validate_id(id)?;
        let data = input::termination_input(&payload)?;

        let mut tx = self.db.begin_write().await?;
        let mut current = load_employee(tx.conn(), id).await?;
        if current.status == EmployeeStatus::Inactive {
            tracing::warn!(employee_id = id, "Termination rejected: already inactive");
            return Err(AppError::new(ErrorCode::EmployeeAlreadyInactive));
        }

        current.status = EmployeeStatus::Inactive;
        current.termination_date = Some(shared::util::today());
        let saved = employee::save(tx.conn(), &current)
            .await
            .map_err(integrity_violation)?;

        let salary = saved.salary.amount;
        record(
            tx.conn(),
            &saved,
            MovementType::Termination,
            format!("Termination: {}", data.reason),
            Some(salary),
        )
        .await?;
        tx.commit().await?;

        tracing::info!(employee_id = saved.id, "Employee terminated");
        Ok(saved)
    }

    /// Permanently delete an employee and its whole movement trail
    pub async fn purge(&self, id: i64) -> AppResult<()> {
        validate_id(id)?;

        let mut tx = self.db.begin_write().await?;
        load_employee(tx.conn(), id).await?;
        let removed = movement::delete_by_employee(tx.conn(), id).await?;
        employee::delete(tx.conn(), id).await?;
        tx.commit().await?;

        tracing::info!(employee_id = id, movements = removed, "Employee purged");
        Ok(())
    }
}

// ============================================================================
// Steps shared by the transitions
// ============================================================================

async fn load_employee(conn: &mut SqliteConnection, id: i64) -> AppResult<Employee> {
    employee::find_by_id(conn, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))
}

async fn find_department(conn: &mut SqliteConnection, id: i64) -> AppResult<Department> {
    department::find_by_id(conn, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::DepartmentNotFound))
}

/// Email and cpf must not belong to any other employee, active or not
async fn ensure_unique(
    conn: &mut SqliteConnection,
    email: &str,
    cpf: &str,
    exclude_id: Option<i64>,
) -> AppResult<()> {
    let held_by_other = |e: &Employee| Some(e.id) != exclude_id;

    if let Some(existing) = employee::find_by_email(&mut *conn, email).await?
        && held_by_other(&existing)
    {
        tracing::warn!(existing_id = existing.id, "Email already in use");
        return Err(AppError::new(ErrorCode::EmployeeEmailExists));
    }
    if let Some(existing) = employee::find_by_cpf(&mut *conn, cpf).await?
        && held_by_other(&existing)
    {
        tracing::warn!(existing_id = existing.id, "CPF already in use");
        return Err(AppError::new(ErrorCode::EmployeeCpfExists));
    }
    Ok(())
}

fn require_active(employee: &Employee, operation: &str) -> AppResult<()> {
    if !employee.is_active() {
        tracing::warn!(employee_id = employee.id, operation, "Rejected: employee is inactive");
        return Err(AppError::new(ErrorCode::EmployeeNotActive));
    }
    Ok(())
}

/// The single write call site turns a unique-constraint clash into a duplicate error
pub(crate) fn integrity_violation(err: RepoError) -> AppError {
    match err {
        RepoError::Duplicate(detail) => {
            tracing::warn!(detail = %detail, "Integrity violation while saving employee");
            AppError::new(ErrorCode::EmployeeIntegrityViolation)
        }
        other => other.into(),
    }
}

/// Append the movement of one transition; `new_salary` is the saved salary
async fn record(
    conn: &mut SqliteConnection,
    employee: &Employee,
    movement_type: MovementType,
    description: String,
    prior_salary: Option<Decimal>,
) -> AppResult<Movement> {
    let created = movement::create(
        conn,
        MovementCreate {
            employee_id: employee.id,
            movement_type,
            description,
            prior_salary,
            new_salary: Some(employee.salary.amount),
        },
    )
    .await?;
    Ok(created)
}
