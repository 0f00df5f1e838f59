//! Daily attendance: batch registration with duplicate skipping,
//! filtered queries, and the role-gated record mutations.

use crate::config::AppConfig;
use crate::core::access::{AccessLogic, MutationAction};
use crate::core::collaborators::CollaboratorLogic;
use crate::core::lists::ListsLogic;
use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceRecord, CollabRef, Collaborator, NewAttendance, Role};
use crate::store::{Row, RowStore, TableId, audit};
use crate::utils::{now_stamp, today};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::debug;

// Attendance sheet columns touched by updates, 0-based.
const COL_STATUS: usize = 3;
const COL_ASSIGNMENT: usize = 4;
const COL_OBSERVATIONS: usize = 7;

/// Outcome of a batch registration: how many entries were stored and
/// how many were skipped as duplicates of (collaborator, date).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub saved: u32,
    pub skipped: u32,
}

/// Query result line, attendance joined with the collaborator name.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceView {
    pub record_id: i64,
    pub collaborator_id: String,
    pub collaborator_name: String,
    pub date: NaiveDate,
    pub status: String,
    pub assignment: String,
    pub observations: String,
}

/// Everything the daily attendance grid needs in one read.
#[derive(Debug, Clone, Serialize)]
pub struct DayGrid {
    pub collaborators: Vec<CollabRef>,
    pub statuses: Vec<String>,
    pub assignments: Vec<String>,
    pub vehicles: Vec<String>,
    pub records: Vec<AttendanceRecord>,
}

/// Fields an update may change. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default)]
pub struct AttendancePatch {
    pub status: Option<String>,
    pub assignment: Option<String>,
    pub observations: Option<String>,
}

pub struct AttendanceLogic;

impl AttendanceLogic {
    /// Register one day's entries in a single pass. At most one record
    /// per (collaborator, date) may exist: entries colliding with a
    /// stored record, or with an earlier entry of the same batch, are
    /// skipped and counted, never an error. Record ids continue from
    /// the highest stored id.
    pub fn register_batch(
        store: &mut dyn RowStore,
        role: Role,
        cfg: &AppConfig,
        date: NaiveDate,
        entries: &[NewAttendance],
    ) -> AppResult<BatchOutcome> {
        AccessLogic::require_access(role)?;
        if entries.is_empty() {
            return Ok(BatchOutcome::default());
        }

        let existing = Self::load_all(store)?;
        let mut next_id = existing.iter().map(|r| r.record_id).max().unwrap_or(0) + 1;
        let mut taken: HashSet<(String, NaiveDate)> = existing
            .iter()
            .map(|r| (r.collaborator_id.clone(), r.date))
            .collect();

        let mut outcome = BatchOutcome::default();
        for entry in entries {
            let collaborator_id = entry.collaborator_id.trim().to_string();
            if collaborator_id.is_empty() {
                return Err(AppError::Validation(
                    "attendance entry without collaborator id".to_string(),
                ));
            }
            if !taken.insert((collaborator_id.clone(), date)) {
                outcome.skipped += 1;
                continue;
            }

            let record = AttendanceRecord {
                record_id: next_id,
                collaborator_id,
                date,
                status: entry.status.clone(),
                assignment: entry.assignment.clone(),
                vehicle: entry.vehicle.clone(),
                hours_worked: entry.hours_worked.unwrap_or(cfg.default_worked_hours),
                observations: entry.observations.clone(),
                timestamp: now_stamp(),
            };
            store.append_row(TableId::Attendance, record.to_row())?;
            next_id += 1;
            outcome.saved += 1;
        }

        audit::record(
            store,
            "register_attendance_batch",
            "RegistrosAsistencia",
            &format!("{}: saved {}, skipped {}", date, outcome.saved, outcome.skipped),
        )?;
        debug!(%date, saved = outcome.saved, skipped = outcome.skipped, "attendance batch stored");
        Ok(outcome)
    }

    /// Records inside the inclusive window, optionally narrowed to one
    /// collaborator, joined with names and sorted newest first.
    pub fn query(
        store: &dyn RowStore,
        from: NaiveDate,
        to: NaiveDate,
        collaborator_id: Option<&str>,
    ) -> AppResult<Vec<AttendanceView>> {
        let names: HashMap<String, String> = CollaboratorLogic::list(store)?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let mut views: Vec<AttendanceView> = Self::load_all(store)?
            .into_iter()
            .filter(|r| r.date >= from && r.date <= to)
            .filter(|r| match collaborator_id {
                Some(id) if !id.trim().is_empty() => r.collaborator_id == id.trim(),
                _ => true,
            })
            .map(|r| AttendanceView {
                collaborator_name: names
                    .get(&r.collaborator_id)
                    .cloned()
                    .unwrap_or_else(|| "Desconocido".to_string()),
                record_id: r.record_id,
                collaborator_id: r.collaborator_id,
                date: r.date,
                status: r.status,
                assignment: r.assignment,
                observations: r.observations,
            })
            .collect();

        views.sort_by(|a, b| b.date.cmp(&a.date).then(b.record_id.cmp(&a.record_id)));
        Ok(views)
    }

    /// Change status, assignment or observations of one record.
    /// Gated per role and record date.
    pub fn update_record(
        store: &mut dyn RowStore,
        role: Role,
        record_id: i64,
        patch: &AttendancePatch,
    ) -> AppResult<()> {
        let (index, record) = Self::find_record(store, record_id)?;
        AccessLogic::authorize(role, MutationAction::Edit, record.date, today())?;

        if let Some(status) = &patch.status {
            store.update_cell(TableId::Attendance, index, COL_STATUS, status)?;
        }
        if let Some(assignment) = &patch.assignment {
            store.update_cell(TableId::Attendance, index, COL_ASSIGNMENT, assignment)?;
        }
        if let Some(observations) = &patch.observations {
            store.update_cell(TableId::Attendance, index, COL_OBSERVATIONS, observations)?;
        }

        audit::record(
            store,
            "update_attendance",
            "RegistrosAsistencia",
            &record_id.to_string(),
        )?;
        Ok(())
    }

    /// Delete one record. Removing it also removes the duplicate guard
    /// for its (collaborator, date), so the day can be entered again.
    pub fn delete_record(store: &mut dyn RowStore, role: Role, record_id: i64) -> AppResult<()> {
        let (index, record) = Self::find_record(store, record_id)?;
        AccessLogic::authorize(role, MutationAction::Delete, record.date, today())?;

        store.delete_row(TableId::Attendance, index)?;
        audit::record(
            store,
            "delete_attendance",
            "RegistrosAsistencia",
            &record_id.to_string(),
        )?;
        debug!(record_id, "attendance record deleted");
        Ok(())
    }

    /// Payload for the daily grid: active collaborators, the config
    /// lists, and the records already stored for the day.
    pub fn day_grid(store: &dyn RowStore, date: NaiveDate) -> AppResult<DayGrid> {
        let collaborators = CollaboratorLogic::active(store)?
            .iter()
            .map(Collaborator::as_ref_entry)
            .collect();
        let records = Self::load_all(store)?
            .into_iter()
            .filter(|r| r.date == date)
            .collect();

        Ok(DayGrid {
            collaborators,
            statuses: ListsLogic::config_list(store, "EstadosAsistencia")?,
            assignments: ListsLogic::config_list(store, "Asignaciones")?,
            vehicles: ListsLogic::config_list(store, "Vehiculos")?,
            records,
        })
    }

    pub fn load_all(store: &dyn RowStore) -> AppResult<Vec<AttendanceRecord>> {
        store
            .read_all(TableId::Attendance)?
            .iter()
            .map(|row: &Row| AttendanceRecord::from_row(row))
            .collect()
    }

    fn find_record(store: &dyn RowStore, record_id: i64) -> AppResult<(usize, AttendanceRecord)> {
        let index = store
            .find_row_index(TableId::Attendance, 0, &record_id.to_string())?
            .ok_or_else(|| AppError::NotFound(format!("attendance record {record_id}")))?;
        let rows = store.read_all(TableId::Attendance)?;
        Ok((index, AttendanceRecord::from_row(&rows[index])?))
    }
}
