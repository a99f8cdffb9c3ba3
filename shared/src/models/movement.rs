//! Movement Model (append-only audit trail)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle event recorded by a movement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum MovementType {
    Hire,
    ProfileUpdate,
    Raise,
    Promotion,
    Termination,
}

/// Movement entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movement {
    pub id: i64,
    pub employee_id: i64,
    pub movement_type: MovementType,
    pub description: String,
    pub prior_salary: Option<Decimal>,
    pub new_salary: Option<Decimal>,
    pub moved_at: i64,
}

/// New movement (id and timestamp are assigned by the store)
#[derive(Debug, Clone)]
pub struct MovementCreate {
    pub employee_id: i64,
    pub movement_type: MovementType,
    pub description: String,
    pub prior_salary: Option<Decimal>,
    pub new_salary: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_type_serialization() {
        let json = serde_json::to_string(&MovementType::ProfileUpdate).unwrap();
        assert_eq!(json, "\"PROFILE_UPDATE\"");
        let ty: MovementType = serde_json::from_str("\"TERMINATION\"").unwrap();
        assert_eq!(ty, MovementType::Termination);
    }
}
