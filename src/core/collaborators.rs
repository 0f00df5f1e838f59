//! Collaborator registry: registration, listing, status toggling.
//! Collaborators are never hard-deleted; deactivation is the only exit.

use crate::core::access::AccessLogic;
use crate::errors::{AppError, AppResult};
use crate::models::{CollabStatus, Collaborator, NewCollaborator, Role};
use crate::store::{RowStore, TableId, audit};
use crate::utils::now_stamp;
use tracing::debug;

// Estado column, 0-based.
const COL_STATUS: usize = 6;

pub struct CollaboratorLogic;

impl CollaboratorLogic {
    /// Register a new collaborator. Id, name and base salary are
    /// mandatory; the id is trimmed and must not exist yet. New
    /// collaborators always start out active.
    pub fn register(
        store: &mut dyn RowStore,
        role: Role,
        new: &NewCollaborator,
    ) -> AppResult<Collaborator> {
        AccessLogic::require_access(role)?;

        let id = new.id.trim().to_string();
        if id.is_empty() || new.name.trim().is_empty() {
            return Err(AppError::Validation(
                "id, name and base salary are mandatory".to_string(),
            ));
        }
        let base_salary = new.base_salary.ok_or_else(|| {
            AppError::Validation("id, name and base salary are mandatory".to_string())
        })?;

        if store
            .find_row_index(TableId::Collaborators, 0, &id)?
            .is_some()
        {
            return Err(AppError::Validation(format!(
                "a collaborator with id '{id}' already exists"
            )));
        }

        let collaborator = Collaborator {
            id: id.clone(),
            name: new.name.trim().to_string(),
            job_title: new.job_title.trim().to_string(),
            department: new.department.trim().to_string(),
            hire_date: new.hire_date,
            base_salary,
            status: CollabStatus::Active,
            created_at: now_stamp(),
        };
        store.append_row(TableId::Collaborators, collaborator.to_row())?;
        audit::record(store, "register_collaborator", "Colaboradores", &id)?;
        debug!(id = %id, "collaborator registered");
        Ok(collaborator)
    }

    pub fn list(store: &dyn RowStore) -> AppResult<Vec<Collaborator>> {
        store
            .read_all(TableId::Collaborators)?
            .iter()
            .map(|row| Collaborator::from_row(row))
            .collect()
    }

    pub fn active(store: &dyn RowStore) -> AppResult<Vec<Collaborator>> {
        Ok(Self::list(store)?
            .into_iter()
            .filter(|c| c.status.is_active())
            .collect())
    }

    pub fn find(store: &dyn RowStore, id: &str) -> AppResult<Collaborator> {
        let index = store
            .find_row_index(TableId::Collaborators, 0, id)?
            .ok_or_else(|| AppError::NotFound(format!("collaborator '{}'", id.trim())))?;
        let rows = store.read_all(TableId::Collaborators)?;
        Collaborator::from_row(&rows[index])
    }

    /// Flip a collaborator between active and inactive.
    pub fn set_status(
        store: &mut dyn RowStore,
        role: Role,
        id: &str,
        status: CollabStatus,
    ) -> AppResult<()> {
        AccessLogic::require_access(role)?;
        let index = store
            .find_row_index(TableId::Collaborators, 0, id)?
            .ok_or_else(|| AppError::NotFound(format!("collaborator '{}'", id.trim())))?;
        store.update_cell(
            TableId::Collaborators,
            index,
            COL_STATUS,
            status.to_sheet_str(),
        )?;
        audit::record(
            store,
            "set_collaborator_status",
            "Colaboradores",
            &format!("{} -> {}", id.trim(), status.to_sheet_str()),
        )?;
        Ok(())
    }
}
