use crate::errors::{AppError, AppResult};
use crate::store::TableId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CollabStatus {
    Active,   // "Activo"
    Inactive, // "Inactivo"
}

impl CollabStatus {
    /// Convert enum → sheet string
    pub fn to_sheet_str(&self) -> &'static str {
        match self {
            CollabStatus::Active => "Activo",
            CollabStatus::Inactive => "Inactivo",
        }
    }

    /// Convert sheet string → enum. Anything that is not exactly "Activo"
    /// counts as inactive, the same rule the payroll filter applies.
    pub fn from_sheet_str(s: &str) -> Self {
        if s.trim() == "Activo" {
            CollabStatus::Active
        } else {
            CollabStatus::Inactive
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, CollabStatus::Active)
    }

    pub fn toggled(&self) -> Self {
        match self {
            CollabStatus::Active => CollabStatus::Inactive,
            CollabStatus::Inactive => CollabStatus::Active,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Collaborator {
    pub id: String,                   // ⇔ ID_Colaborador (unique, trimmed)
    pub name: String,                 // ⇔ NombreCompleto
    pub job_title: String,            // ⇔ Cargo
    pub department: String,           // ⇔ Departamento
    pub hire_date: Option<NaiveDate>, // ⇔ FechaIngreso ("YYYY-MM-DD")
    pub base_salary: Decimal,         // ⇔ SueldoBase
    pub status: CollabStatus,         // ⇔ Estado
    pub created_at: String,           // ⇔ FechaCreacion (ISO 8601)
}

/// Registration payload. Only id, name and base salary are mandatory.
#[derive(Debug, Clone, Default)]
pub struct NewCollaborator {
    pub id: String,
    pub name: String,
    pub job_title: String,
    pub department: String,
    pub hire_date: Option<NaiveDate>,
    pub base_salary: Option<Decimal>,
}

/// Slim (id, name) pair used by form lists and the bonus matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollabRef {
    pub id: String,
    pub name: String,
}

impl Collaborator {
    pub fn as_ref_entry(&self) -> CollabRef {
        CollabRef {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.job_title.clone(),
            self.department.clone(),
            self.hire_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            self.base_salary.to_string(),
            self.status.to_sheet_str().to_string(),
            self.created_at.clone(),
        ]
    }

    pub fn from_row(row: &[String]) -> AppResult<Self> {
        let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");

        let id = cell(0).trim().to_string();
        if id.is_empty() {
            return Err(AppError::InvalidRow {
                sheet: TableId::Collaborators.sheet_name().to_string(),
                detail: "empty collaborator id".to_string(),
            });
        }

        let hire_date = match cell(4).trim() {
            "" => None,
            s => Some(
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map_err(|_| AppError::InvalidDate(s.to_string()))?,
            ),
        };

        let salary_raw = cell(5).trim();
        let base_salary = if salary_raw.is_empty() {
            Decimal::ZERO
        } else {
            Decimal::from_str(salary_raw)
                .map_err(|_| AppError::InvalidAmount(salary_raw.to_string()))?
        };

        Ok(Collaborator {
            id,
            name: cell(1).to_string(),
            job_title: cell(2).to_string(),
            department: cell(3).to_string(),
            hire_date,
            base_salary,
            status: CollabStatus::from_sheet_str(cell(6)),
            created_at: cell(7).to_string(),
        })
    }
}
