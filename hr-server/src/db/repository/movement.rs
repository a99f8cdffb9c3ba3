//! Movement Repository (append-only)

use super::{RepoError, RepoResult, from_cents, to_cents};
use shared::models::{Movement, MovementCreate, MovementType};
use sqlx::SqliteConnection;

const MOVEMENT_SELECT: &str = "SELECT id, employee_id, movement_type, description, prior_salary_cents, new_salary_cents, moved_at FROM movement";

#[derive(sqlx::FromRow)]
struct MovementRow {
    id: i64,
    employee_id: i64,
    movement_type: MovementType,
    description: String,
    prior_salary_cents: Option<i64>,
    new_salary_cents: Option<i64>,
    moved_at: i64,
}

impl From<MovementRow> for Movement {
    fn from(r: MovementRow) -> Self {
        Self {
            id: r.id,
            employee_id: r.employee_id,
            movement_type: r.movement_type,
            description: r.description,
            prior_salary: r.prior_salary_cents.map(from_cents),
            new_salary: r.new_salary_cents.map(from_cents),
            moved_at: r.moved_at,
        }
    }
}

pub async fn create(conn: &mut SqliteConnection, data: MovementCreate) -> RepoResult<Movement> {
    let now = shared::util::now_millis();
    let prior = data.prior_salary.map(to_cents).transpose()?;
    let new = data.new_salary.map(to_cents).transpose()?;
    let id = sqlx::query(
        "INSERT INTO movement (employee_id, movement_type, description, prior_salary_cents, new_salary_cents, moved_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(data.employee_id)
    .bind(data.movement_type)
    .bind(&data.description)
    .bind(prior)
    .bind(new)
    .bind(now)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    let sql = format!("{MOVEMENT_SELECT} WHERE id = ?");
    sqlx::query_as::<_, MovementRow>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .map(Movement::from)
        .ok_or_else(|| RepoError::Database("Failed to create movement".into()))
}

/// Movements of one employee, newest first
pub async fn list_by_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> RepoResult<Vec<Movement>> {
    let sql = format!("{MOVEMENT_SELECT} WHERE employee_id = ? ORDER BY moved_at DESC, id DESC");
    let rows = sqlx::query_as::<_, MovementRow>(&sql)
        .bind(employee_id)
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows.into_iter().map(Movement::from).collect())
}

/// Remove the whole trail of an employee (purge only)
pub async fn delete_by_employee(conn: &mut SqliteConnection, employee_id: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM movement WHERE employee_id = ?")
        .bind(employee_id)
        .execute(&mut *conn)
        .await?;
    Ok(rows.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::{department, employee};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use shared::models::DepartmentCreate;
    use std::str::FromStr;

    #[tokio::test]
    async fn test_trail_is_newest_first_and_purgeable() {
        let db = DbService::in_memory().await.unwrap();
        let mut conn = db.read().await.unwrap();
        let dept = department::create(
            &mut conn,
            DepartmentCreate {
                name: "Finance".into(),
                code: "FIN".into(),
            },
        )
        .await
        .unwrap();
        let emp = employee::create(
            &mut conn,
            employee::NewEmployee {
                name: "Camila Prado".into(),
                email: "camila@corp.com".into(),
                cpf: "12345678903".into(),
                job_title: "Financial Analyst".into(),
                department_id: dept.id,
                salary: Decimal::from_str("7100.00").unwrap(),
                hire_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            },
        )
        .await
        .unwrap();

        let hire = create(
            &mut conn,
            MovementCreate {
                employee_id: emp.id,
                movement_type: MovementType::Hire,
                description: "Hire completed".into(),
                prior_salary: None,
                new_salary: Some(emp.salary.amount),
            },
        )
        .await
        .unwrap();
        assert!(hire.prior_salary.is_none());
        assert_eq!(hire.new_salary.unwrap().to_string(), "7100.00");

        create(
            &mut conn,
            MovementCreate {
                employee_id: emp.id,
                movement_type: MovementType::Raise,
                description: "Salary raise: yearly review".into(),
                prior_salary: Some(emp.salary.amount),
                new_salary: Some(Decimal::from_str("7810.00").unwrap()),
            },
        )
        .await
        .unwrap();

        let trail = list_by_employee(&mut conn, emp.id).await.unwrap();
        let types: Vec<MovementType> = trail.iter().map(|m| m.movement_type).collect();
        assert_eq!(types, vec![MovementType::Raise, MovementType::Hire]);

        // Foreign key keeps the employee while movements exist
        assert!(employee::delete(&mut conn, emp.id).await.is_err());

        assert_eq!(delete_by_employee(&mut conn, emp.id).await.unwrap(), 2);
        assert!(employee::delete(&mut conn, emp.id).await.unwrap());
        assert!(list_by_employee(&mut conn, emp.id).await.unwrap().is_empty());
    }
}
