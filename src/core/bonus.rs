//! Bonus weighting operations: the attendance matrix, the weight
//! tables, matrix snapshots, and the end-to-end distribution.

use crate::core::access::AccessLogic;
use crate::core::attendance::AttendanceLogic;
use crate::core::calculator::bonus::{
    AttendanceMatrix, BonusLine, build_attendance_matrix, distribute_bonuses,
};
use crate::core::collaborators::CollaboratorLogic;
use crate::errors::{AppError, AppResult};
use crate::models::{Role, StandardWeight, WeightEntry};
use crate::store::{RowStore, TableId, audit};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::debug;

// Peso column of the weights sheet, 0-based.
const COL_WEIGHT: usize = 2;

pub struct BonusLogic;

impl BonusLogic {
    /// Project × collaborator day counts over a window.
    pub fn attendance_matrix(
        store: &dyn RowStore,
        from: NaiveDate,
        to: NaiveDate,
        search: Option<&str>,
    ) -> AppResult<AttendanceMatrix> {
        let names: HashMap<String, String> = CollaboratorLogic::list(store)?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();
        let records = AttendanceLogic::load_all(store)?;
        Ok(build_attendance_matrix(&records, &names, from, to, search))
    }

    /// Upsert explicit weights, one row per (project, collaborator).
    pub fn save_weights(
        store: &mut dyn RowStore,
        role: Role,
        entries: &[WeightEntry],
    ) -> AppResult<()> {
        AccessLogic::require_access(role)?;

        for entry in entries {
            if entry.weight < Decimal::ZERO || entry.weight > Decimal::from(100) {
                return Err(AppError::Validation(format!(
                    "weight {} for ({}, {}) outside 0..=100",
                    entry.weight, entry.project, entry.collaborator_id
                )));
            }
        }

        for entry in entries {
            let existing = store
                .read_all(TableId::Weights)?
                .iter()
                .position(|row| {
                    row.first().map(|c| c.trim() == entry.project.trim()).unwrap_or(false)
                        && row
                            .get(1)
                            .map(|c| c.trim() == entry.collaborator_id.trim())
                            .unwrap_or(false)
                });
            match existing {
                Some(index) => store.update_cell(
                    TableId::Weights,
                    index,
                    COL_WEIGHT,
                    &entry.weight.to_string(),
                )?,
                None => {
                    store.append_row(TableId::Weights, entry.to_row())?;
                }
            }
        }

        audit::record(
            store,
            "save_weights",
            "Ponderaciones",
            &format!("{} entries", entries.len()),
        )?;
        Ok(())
    }

    pub fn weights(store: &dyn RowStore) -> AppResult<Vec<WeightEntry>> {
        store
            .read_all(TableId::Weights)?
            .iter()
            .map(|row| WeightEntry::from_row(row))
            .collect()
    }

    pub fn standard_weights(store: &dyn RowStore) -> AppResult<Vec<StandardWeight>> {
        store
            .read_all(TableId::WeightsStandard)?
            .iter()
            .map(|row| StandardWeight::from_row(row))
            .collect()
    }

    /// Persist a computed matrix snapshot, replacing any previous one.
    pub fn save_matrix(
        store: &mut dyn RowStore,
        role: Role,
        matrix: &AttendanceMatrix,
    ) -> AppResult<()> {
        AccessLogic::require_access(role)?;

        let mut remaining = store.read_all(TableId::BonusMatrix)?.len();
        while remaining > 0 {
            store.delete_row(TableId::BonusMatrix, remaining - 1)?;
            remaining -= 1;
        }

        for project in &matrix.projects {
            for collab in &matrix.collaborators {
                let days = matrix.days(project, &collab.id);
                if days == 0 {
                    continue;
                }
                store.append_row(
                    TableId::BonusMatrix,
                    vec![project.clone(), collab.id.clone(), days.to_string()],
                )?;
            }
        }

        audit::record(
            store,
            "save_matrix",
            "MatrizBonos",
            &format!("{} projects", matrix.projects.len()),
        )?;
        Ok(())
    }

    /// End-to-end distribution: build the matrix over the window, pull
    /// both weight tables and the job titles, then run the pure engine.
    pub fn distribute(
        store: &dyn RowStore,
        from: NaiveDate,
        to: NaiveDate,
        totals: &HashMap<String, Decimal>,
    ) -> AppResult<Vec<BonusLine>> {
        let matrix = Self::attendance_matrix(store, from, to, None)?;
        let weights = Self::weights(store)?;
        let standard = Self::standard_weights(store)?;
        let job_titles: HashMap<String, String> = CollaboratorLogic::list(store)?
            .into_iter()
            .map(|c| (c.id, c.job_title))
            .collect();

        let lines = distribute_bonuses(&matrix, &weights, &standard, &job_titles, totals);
        debug!(
            projects = matrix.projects.len(),
            lines = lines.len(),
            "bonuses distributed"
        );
        Ok(lines)
    }
}
