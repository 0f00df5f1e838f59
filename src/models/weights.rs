use crate::errors::{AppError, AppResult};
use crate::store::TableId;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

/// Explicit bonus weight for one collaborator on one project,
/// a percentage between 0 and 100.
#[derive(Debug, Clone, Serialize)]
pub struct WeightEntry {
    pub project: String,         // ⇔ Proyecto
    pub collaborator_id: String, // ⇔ ID_Colaborador
    pub weight: Decimal,         // ⇔ Peso
}

/// Default weight derived from a job title, used when no explicit
/// per-project entry exists.
#[derive(Debug, Clone, Serialize)]
pub struct StandardWeight {
    pub job_title: String, // ⇔ Cargo
    pub weight: Decimal,   // ⇔ Peso
}

fn parse_weight(raw: &str, sheet: TableId) -> AppResult<Decimal> {
    let raw = raw.trim();
    let weight = if raw.is_empty() {
        Decimal::ZERO
    } else {
        Decimal::from_str(raw).map_err(|_| AppError::InvalidAmount(raw.to_string()))?
    };
    if weight < Decimal::ZERO || weight > Decimal::from(100) {
        return Err(AppError::InvalidRow {
            sheet: sheet.sheet_name().to_string(),
            detail: format!("weight {} outside 0..=100", weight),
        });
    }
    Ok(weight)
}

impl WeightEntry {
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.project.clone(),
            self.collaborator_id.clone(),
            self.weight.to_string(),
        ]
    }

    pub fn from_row(row: &[String]) -> AppResult<Self> {
        let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");
        Ok(WeightEntry {
            project: cell(0).trim().to_string(),
            collaborator_id: cell(1).trim().to_string(),
            weight: parse_weight(cell(2), TableId::Weights)?,
        })
    }
}

impl StandardWeight {
    pub fn to_row(&self) -> Vec<String> {
        vec![self.job_title.clone(), self.weight.to_string()]
    }

    pub fn from_row(row: &[String]) -> AppResult<Self> {
        let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");
        Ok(StandardWeight {
            job_title: cell(0).trim().to_string(),
            weight: parse_weight(cell(1), TableId::WeightsStandard)?,
        })
    }
}
