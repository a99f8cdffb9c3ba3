//! Employee Model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Department;

/// Employment status
///
/// Hired employees start `Active`; termination moves them to `Inactive` for good.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Map the `active` query flag onto a status filter
    pub fn from_active_flag(active: Option<bool>) -> Option<Self> {
        active.map(|a| if a { Self::Active } else { Self::Inactive })
    }
}

/// Current salary, owned by exactly one employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Salary {
    /// Always non-negative with scale 2
    pub amount: Decimal,
    pub updated_at: i64,
}

/// Employee entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub job_title: String,
    pub status: EmployeeStatus,
    pub department: Department,
    pub salary: Salary,
    pub hire_date: NaiveDate,
    pub termination_date: Option<NaiveDate>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Employee {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Hire / profile update payload
///
/// `initial_salary` is required on hire and ignored on profile updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeePayload {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub cpf: Option<String>,
    pub job_title: Option<String>,
    pub department_id: Option<i64>,
    pub initial_salary: Option<Decimal>,
}

/// Salary raise payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalaryRaisePayload {
    pub percentage: Option<Decimal>,
    pub reason: Option<String>,
}

/// Promotion payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromotionPayload {
    pub new_job_title: Option<String>,
    pub percentage: Option<Decimal>,
    pub reason: Option<String>,
}

/// Termination payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerminationPayload {
    pub reason: Option<String>,
}

/// Employee list filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeQuery {
    /// Case-insensitive name substring
    pub name: Option<String>,
    pub status: Option<EmployeeStatus>,
}
