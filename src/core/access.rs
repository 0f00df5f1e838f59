//! Identity → role resolution and the mutation gate.

use crate::errors::{AppError, AppResult};
use crate::models::Role;
use crate::store::{RowStore, TableId};
use crate::utils::text::norm_email;
use chrono::NaiveDate;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessProfile {
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationAction {
    Edit,
    Delete,
}

pub struct AccessLogic;

impl AccessLogic {
    /// Look the identity up in the user table. Emails compare trimmed
    /// and case-insensitive; an unknown identity, or a row carrying a
    /// role string the table should not contain, resolves to `NoAccess`.
    pub fn resolve_role(store: &dyn RowStore, email: &str) -> AppResult<Role> {
        let email = norm_email(email);
        for row in store.read_all(TableId::Users)? {
            let stored = row.first().map(String::as_str).unwrap_or("");
            if norm_email(stored) != email {
                continue;
            }
            let raw = row.get(1).map(String::as_str).unwrap_or("");
            return Ok(Role::from_sheet_str(raw).unwrap_or_else(|| {
                warn!(email = %email, role = %raw, "unknown role string, treating as no access");
                Role::NoAccess
            }));
        }
        Ok(Role::NoAccess)
    }

    pub fn verify_access(store: &dyn RowStore, email: &str) -> AppResult<AccessProfile> {
        Ok(AccessProfile {
            email: norm_email(email),
            role: Self::resolve_role(store, email)?,
        })
    }

    /// Gate for editing or deleting an attendance record.
    /// Admins may always; assistants only when the record is dated
    /// today; no-access identities never.
    pub fn authorize(
        role: Role,
        action: MutationAction,
        record_date: NaiveDate,
        today: NaiveDate,
    ) -> AppResult<()> {
        match role {
            Role::Admin => Ok(()),
            Role::Assistant if record_date == today => Ok(()),
            Role::Assistant => Err(AppError::Permission(format!(
                "assistants may only {} records of the current day",
                match action {
                    MutationAction::Edit => "edit",
                    MutationAction::Delete => "delete",
                }
            ))),
            Role::NoAccess => Err(AppError::Permission(
                "identity has no access to this system".to_string(),
            )),
        }
    }

    /// Gate for every other mutation: any recognized role may proceed.
    pub fn require_access(role: Role) -> AppResult<()> {
        if role.can_mutate() {
            Ok(())
        } else {
            Err(AppError::Permission(
                "identity has no access to this system".to_string(),
            ))
        }
    }
}
