//! Employee Repository
//!
//! Employees are read joined with their department; the salary lives in the
//! same row (`salary_cents`, `salary_updated_at`).

use super::{RepoError, RepoResult, from_cents, to_cents};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{Department, Employee, EmployeeQuery, EmployeeStatus, Salary};
use sqlx::SqliteConnection;

const EMPLOYEE_SELECT: &str = "SELECT e.id, e.name, e.email, e.cpf, e.job_title, e.status, e.department_id, d.name AS department_name, d.code AS department_code, e.salary_cents, e.salary_updated_at, e.hire_date, e.termination_date, e.created_at, e.updated_at FROM employee e JOIN department d ON e.department_id = d.id";

#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id: i64,
    name: String,
    email: String,
    cpf: String,
    job_title: String,
    status: EmployeeStatus,
    department_id: i64,
    department_name: String,
    department_code: String,
    salary_cents: i64,
    salary_updated_at: i64,
    hire_date: NaiveDate,
    termination_date: Option<NaiveDate>,
    created_at: i64,
    updated_at: i64,
}

impl From<EmployeeRow> for Employee {
    fn from(r: EmployeeRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            email: r.email,
            cpf: r.cpf,
            job_title: r.job_title,
            status: r.status,
            department: Department {
                id: r.department_id,
                name: r.department_name,
                code: r.department_code,
            },
            salary: Salary {
                amount: from_cents(r.salary_cents),
                updated_at: r.salary_updated_at,
            },
            hire_date: r.hire_date,
            termination_date: r.termination_date,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// New employee row (id and timestamps are assigned on insert)
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub job_title: String,
    pub department_id: i64,
    pub salary: Decimal,
    pub hire_date: NaiveDate,
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Employee>> {
    let sql = format!("{EMPLOYEE_SELECT} WHERE e.id = ?");
    let row = sqlx::query_as::<_, EmployeeRow>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.map(Employee::from))
}

/// Case-insensitive email lookup
pub async fn find_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> RepoResult<Option<Employee>> {
    let sql = format!("{EMPLOYEE_SELECT} WHERE e.email = ? COLLATE NOCASE LIMIT 1");
    let row = sqlx::query_as::<_, EmployeeRow>(&sql)
        .bind(email)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.map(Employee::from))
}

pub async fn find_by_cpf(conn: &mut SqliteConnection, cpf: &str) -> RepoResult<Option<Employee>> {
    let sql = format!("{EMPLOYEE_SELECT} WHERE e.cpf = ? LIMIT 1");
    let row = sqlx::query_as::<_, EmployeeRow>(&sql)
        .bind(cpf)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.map(Employee::from))
}

/// Employees ordered by name, optionally filtered by status and name substring
pub async fn list(conn: &mut SqliteConnection, query: &EmployeeQuery) -> RepoResult<Vec<Employee>> {
    let rows = match query.status {
        Some(status) => {
            let sql = format!("{EMPLOYEE_SELECT} WHERE e.status = ? ORDER BY e.name, e.id");
            sqlx::query_as::<_, EmployeeRow>(&sql)
                .bind(status)
                .fetch_all(&mut *conn)
                .await?
        }
        None => {
            let sql = format!("{EMPLOYEE_SELECT} ORDER BY e.name, e.id");
            sqlx::query_as::<_, EmployeeRow>(&sql)
                .fetch_all(&mut *conn)
                .await?
        }
    };

    // SQLite's LIKE only folds ASCII; names carry accents
    let needle = query.name.as_deref().map(str::to_lowercase);
    Ok(rows
        .into_iter()
        .map(Employee::from)
        .filter(|e| match &needle {
            Some(n) => e.name.to_lowercase().contains(n.as_str()),
            None => true,
        })
        .collect())
}

pub async fn create(conn: &mut SqliteConnection, data: NewEmployee) -> RepoResult<Employee> {
    let now = shared::util::now_millis();
    let salary_cents = to_cents(data.salary)?;
    let id = sqlx::query(
        "INSERT INTO employee (name, email, cpf, job_title, status, department_id, salary_cents, salary_updated_at, hire_date, termination_date, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, NULL, ?8, ?8)",
    )
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.cpf)
    .bind(&data.job_title)
    .bind(EmployeeStatus::Active)
    .bind(data.department_id)
    .bind(salary_cents)
    .bind(now)
    .bind(data.hire_date)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    find_by_id(conn, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create employee".into()))
}

/// Persist the mutable state of an employee
///
/// `updated_at` is always refreshed; `salary.updated_at` only when the amount changed.
pub async fn save(conn: &mut SqliteConnection, employee: &Employee) -> RepoResult<Employee> {
    let now = shared::util::now_millis();
    let salary_cents = to_cents(employee.salary.amount)?;
    let rows = sqlx::query(
        "UPDATE employee SET name = ?1, email = ?2, cpf = ?3, job_title = ?4, status = ?5, department_id = ?6, salary_updated_at = CASE WHEN salary_cents != ?7 THEN ?9 ELSE salary_updated_at END, salary_cents = ?7, termination_date = ?8, updated_at = ?9 WHERE id = ?10",
    )
    .bind(&employee.name)
    .bind(&employee.email)
    .bind(&employee.cpf)
    .bind(&employee.job_title)
    .bind(employee.status)
    .bind(employee.department.id)
    .bind(salary_cents)
    .bind(employee.termination_date)
    .bind(now)
    .bind(employee.id)
    .execute(&mut *conn)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Employee {} not found", employee.id)));
    }
    find_by_id(conn, employee.id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", employee.id)))
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM employee WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}
