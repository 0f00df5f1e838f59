//! Project registry.

use crate::core::access::AccessLogic;
use crate::errors::{AppError, AppResult};
use crate::models::{NewProject, Project, Role};
use crate::store::{RowStore, TableId, audit};
use crate::utils::{now_stamp, today};

pub struct ProjectLogic;

impl ProjectLogic {
    /// Register a project under a unique code.
    pub fn register(store: &mut dyn RowStore, role: Role, new: &NewProject) -> AppResult<Project> {
        AccessLogic::require_access(role)?;

        let code = new.code.trim().to_string();
        if code.is_empty() || new.name.trim().is_empty() {
            return Err(AppError::Validation(
                "project code and name are mandatory".to_string(),
            ));
        }
        if store.find_row_index(TableId::Projects, 0, &code)?.is_some() {
            return Err(AppError::Validation(format!(
                "a project with code '{code}' already exists"
            )));
        }

        let project = Project {
            code: code.clone(),
            name: new.name.trim().to_string(),
            registration_date: Some(today()),
            status: "Activo".to_string(),
            client: new.client.trim().to_string(),
            contact: new.contact.trim().to_string(),
            phone: new.phone.trim().to_string(),
            timestamp: now_stamp(),
        };
        store.append_row(TableId::Projects, project.to_row())?;
        audit::record(store, "register_project", "Proyectos", &code)?;
        Ok(project)
    }

    pub fn list(store: &dyn RowStore) -> AppResult<Vec<Project>> {
        store
            .read_all(TableId::Projects)?
            .iter()
            .map(|row| Project::from_row(row))
            .collect()
    }

    pub fn find(store: &dyn RowStore, code: &str) -> AppResult<Project> {
        let index = store
            .find_row_index(TableId::Projects, 0, code)?
            .ok_or_else(|| AppError::NotFound(format!("project '{}'", code.trim())))?;
        let rows = store.read_all(TableId::Projects)?;
        Project::from_row(&rows[index])
    }
}
