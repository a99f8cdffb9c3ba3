//! Department Repository

use super::RepoResult;
use shared::models::{Department, DepartmentCreate};
use sqlx::SqliteConnection;

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Department>> {
    let row = sqlx::query_as::<_, Department>("SELECT id, name, code FROM department WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

pub async fn find_by_code(
    conn: &mut SqliteConnection,
    code: &str,
) -> RepoResult<Option<Department>> {
    let row =
        sqlx::query_as::<_, Department>("SELECT id, name, code FROM department WHERE code = ?")
            .bind(code)
            .fetch_optional(&mut *conn)
            .await?;
    Ok(row)
}

/// All departments ordered by name
pub async fn list(conn: &mut SqliteConnection) -> RepoResult<Vec<Department>> {
    let rows =
        sqlx::query_as::<_, Department>("SELECT id, name, code FROM department ORDER BY name")
            .fetch_all(&mut *conn)
            .await?;
    Ok(rows)
}

pub async fn create(conn: &mut SqliteConnection, data: DepartmentCreate) -> RepoResult<Department> {
    let id = sqlx::query("INSERT INTO department (name, code) VALUES (?, ?)")
        .bind(&data.name)
        .bind(&data.code)
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();
    Ok(Department {
        id,
        name: data.name,
        code: data.code,
    })
}

pub async fn count(conn: &mut SqliteConnection) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM department")
        .fetch_one(&mut *conn)
        .await?;
    Ok(count)
}
