use crate::errors::{AppError, AppResult};
use crate::store::TableId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRecord {
    pub record_id: i64,           // ⇔ ID_Registro (max existing + 1)
    pub collaborator_id: String,  // ⇔ ID_Colaborador
    pub date: NaiveDate,          // ⇔ Fecha ("YYYY-MM-DD")
    pub status: String,           // ⇔ EstadoAsistencia (config list)
    pub assignment: String,       // ⇔ Asignacion (project / shift label)
    pub vehicle: String,          // ⇔ Vehiculo
    pub hours_worked: Decimal,    // ⇔ HorasTrabajadas
    pub observations: String,     // ⇔ Observaciones
    pub timestamp: String,        // ⇔ Timestamp (ISO 8601)
}

/// One entry of a batch registration; the date comes with the batch.
#[derive(Debug, Clone, Default)]
pub struct NewAttendance {
    pub collaborator_id: String,
    pub status: String,
    pub assignment: String,
    pub vehicle: String,
    pub hours_worked: Option<Decimal>,
    pub observations: String,
}

impl AttendanceRecord {
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.record_id.to_string(),
            self.collaborator_id.clone(),
            self.date.format("%Y-%m-%d").to_string(),
            self.status.clone(),
            self.assignment.clone(),
            self.vehicle.clone(),
            self.hours_worked.to_string(),
            self.observations.clone(),
            self.timestamp.clone(),
        ]
    }

    pub fn from_row(row: &[String]) -> AppResult<Self> {
        let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");
        let invalid = |detail: String| AppError::InvalidRow {
            sheet: TableId::Attendance.sheet_name().to_string(),
            detail,
        };

        let record_id = cell(0)
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid(format!("bad record id '{}'", cell(0))))?;

        let date = NaiveDate::parse_from_str(cell(2).trim(), "%Y-%m-%d")
            .map_err(|_| AppError::InvalidDate(cell(2).to_string()))?;

        let hours_raw = cell(6).trim();
        let hours_worked = if hours_raw.is_empty() {
            Decimal::ZERO
        } else {
            Decimal::from_str(hours_raw)
                .map_err(|_| AppError::InvalidAmount(hours_raw.to_string()))?
        };

        Ok(AttendanceRecord {
            record_id,
            collaborator_id: cell(1).trim().to_string(),
            date,
            status: cell(3).to_string(),
            assignment: cell(4).to_string(),
            vehicle: cell(5).to_string(),
            hours_worked,
            observations: cell(7).to_string(),
            timestamp: cell(8).to_string(),
        })
    }
}
