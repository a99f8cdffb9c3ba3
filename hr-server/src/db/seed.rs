//! Bootstrap data
//!
//! Reference departments and a handful of demo employees. Employees are hired
//! through the lifecycle engine so each one starts with its HIRE movement.

use rust_decimal::Decimal;
use shared::models::{Department, DepartmentCreate, EmployeePayload, EmployeeQuery};

use super::DbService;
use super::repository::department;
use crate::lifecycle::LifecycleEngine;
use crate::utils::{AppError, ErrorCode};

const DEPARTMENTS: &[(&str, &str)] = &[
    ("Human Resources", "HR"),
    ("Information Technology", "IT"),
    ("Finance", "FIN"),
    ("Operations", "OPS"),
];

struct DemoEmployee {
    name: &'static str,
    email: &'static str,
    cpf: &'static str,
    job_title: &'static str,
    department_code: &'static str,
    /// Cents
    salary: i64,
}

const DEMO_EMPLOYEES: &[DemoEmployee] = &[
    DemoEmployee {
        name: "Mariana Alves",
        email: "mariana.alves@empresa.com",
        cpf: "12345678901",
        job_title: "HR Analyst",
        department_code: "HR",
        salary: 540_000,
    },
    DemoEmployee {
        name: "Rafael Souza",
        email: "rafael.souza@empresa.com",
        cpf: "12345678902",
        job_title: "Backend Developer",
        department_code: "IT",
        salary: 890_000,
    },
    DemoEmployee {
        name: "Camila Prado",
        email: "camila.prado@empresa.com",
        cpf: "12345678903",
        job_title: "Financial Analyst",
        department_code: "FIN",
        salary: 710_000,
    },
    DemoEmployee {
        name: "Bruno Martins",
        email: "bruno.martins@empresa.com",
        cpf: "12345678904",
        job_title: "Operations Coordinator",
        department_code: "OPS",
        salary: 980_000,
    },
];

/// What the seed actually inserted
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub departments: usize,
    pub employees: usize,
}

/// Insert missing reference data; a no-op on an already populated database
pub async fn seed_demo_data(db: &DbService, engine: &LifecycleEngine) -> Result<SeedReport, AppError> {
    let mut report = SeedReport::default();

    {
        let mut tx = db.begin_write().await?;
        if department::count(tx.conn()).await? == 0 {
            for (name, code) in DEPARTMENTS {
                department::create(
                    tx.conn(),
                    DepartmentCreate {
                        name: (*name).into(),
                        code: (*code).into(),
                    },
                )
                .await?;
                report.departments += 1;
            }
        }
        tx.commit().await?;
    }

    if !engine.list_employees(EmployeeQuery::default()).await?.is_empty() {
        tracing::info!(departments = report.departments, "Seed skipped employees: already present");
        return Ok(report);
    }

    for demo in DEMO_EMPLOYEES {
        let dept = required_department(db, demo.department_code).await?;
        engine
            .hire(EmployeePayload {
                id: None,
                name: Some(demo.name.into()),
                email: Some(demo.email.into()),
                cpf: Some(demo.cpf.into()),
                job_title: Some(demo.job_title.into()),
                department_id: Some(dept.id),
                initial_salary: Some(Decimal::new(demo.salary, 2)),
            })
            .await?;
        report.employees += 1;
    }

    tracing::info!(
        departments = report.departments,
        employees = report.employees,
        "Demo data seeded"
    );
    Ok(report)
}

async fn required_department(db: &DbService, code: &str) -> Result<Department, AppError> {
    let mut conn = db.read().await?;
    department::find_by_code(&mut conn, code).await?.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::ConfigError,
            format!("Required department {code} is missing"),
        )
    })
}
