//! Monthly pre-payroll: one read of collaborators and attendance, then
//! the pure engines. Store failures surface before anything is
//! computed, so a payroll result is never partial.

use crate::config::AppConfig;
use crate::core::attendance::AttendanceLogic;
use crate::core::calculator::{aggregate, payroll};
use crate::core::collaborators::CollaboratorLogic;
use crate::errors::AppResult;
use crate::models::PayrollLine;
use crate::store::RowStore;
use tracing::debug;

pub struct PayrollLogic;

impl PayrollLogic {
    /// Pre-payroll for one calendar month over the active collaborators.
    pub fn compute(
        store: &dyn RowStore,
        cfg: &AppConfig,
        month: u32,
        year: i32,
    ) -> AppResult<Vec<PayrollLine>> {
        let collaborators = CollaboratorLogic::active(store)?;
        let records = AttendanceLogic::load_all(store)?;

        let counts = aggregate::aggregate(&records, month, year, &cfg.classification_rules);
        let lines = payroll::compute_payroll(&collaborators, &counts);
        debug!(month, year, lines = lines.len(), "payroll computed");
        Ok(lines)
    }
}
