//! Salary computation over aggregated attendance.

use crate::models::{AttendanceCounts, Collaborator, PayrollLine};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Value of one payable day: base salary over a fixed 30-day commercial
/// month, whatever the calendar month's real length.
pub fn day_value(base_salary: Decimal) -> Decimal {
    base_salary / Decimal::from(30)
}

/// One payroll line per collaborator passed in (callers pass the active
/// ones). A collaborator without counts still gets a line with zeros.
pub fn compute_payroll(
    collaborators: &[Collaborator],
    counts: &HashMap<String, AttendanceCounts>,
) -> Vec<PayrollLine> {
    collaborators
        .iter()
        .map(|collab| {
            let c = counts.get(&collab.id).copied().unwrap_or_default();
            let payable_days = c.payable_days();
            let computed_salary =
                (day_value(collab.base_salary) * Decimal::from(payable_days)).round_dp(2);
            PayrollLine {
                collaborator_id: collab.id.clone(),
                name: collab.name.clone(),
                base_salary: collab.base_salary,
                worked: c.worked,
                justified_absence: c.justified_absence,
                unjustified_absence: c.unjustified_absence,
                medical_leave: c.medical_leave,
                payable_days,
                computed_salary,
            }
        })
        .collect()
}
