//! Configuration list reads for the entry forms.

use crate::core::collaborators::CollaboratorLogic;
use crate::errors::AppResult;
use crate::models::{CollabRef, Collaborator};
use crate::store::{RowStore, TableId};
use crate::utils::text::dedup_non_empty;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceLists {
    pub collaborators: Vec<CollabRef>,
    pub statuses: Vec<String>,
}

pub struct ListsLogic;

impl ListsLogic {
    /// One named list out of the `Configuracion` table, deduplicated,
    /// empty entries dropped, stored order kept.
    pub fn config_list(store: &dyn RowStore, list: &str) -> AppResult<Vec<String>> {
        let values = store
            .read_all(TableId::Config)?
            .into_iter()
            .filter(|row| row.first().map(|c| c.trim() == list.trim()).unwrap_or(false))
            .map(|row| row.get(1).cloned().unwrap_or_default());
        Ok(dedup_non_empty(values))
    }

    /// Active collaborators plus the status list, for the attendance
    /// entry form.
    pub fn attendance_lists(store: &dyn RowStore) -> AppResult<AttendanceLists> {
        Ok(AttendanceLists {
            collaborators: CollaboratorLogic::active(store)?
                .iter()
                .map(Collaborator::as_ref_entry)
                .collect(),
            statuses: Self::config_list(store, "EstadosAsistencia")?,
        })
    }
}
