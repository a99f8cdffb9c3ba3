//! Department Model

use serde::{Deserialize, Serialize};

/// Department entity (reference data, never mutated by the lifecycle engine)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Department {
    pub id: i64,
    pub name: String,
    /// Short code, e.g. "HR"
    pub code: String,
}

/// Create department payload (bootstrap only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentCreate {
    pub name: String,
    pub code: String,
}
