use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Bucket an attendance status string falls into once classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceCategory {
    Worked,
    JustifiedAbsence,
    UnjustifiedAbsence,
    MedicalLeave,
}

/// Per-collaborator counters for one calendar month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceCounts {
    pub worked: u32,
    pub justified_absence: u32,
    pub unjustified_absence: u32,
    pub medical_leave: u32,
}

impl AttendanceCounts {
    pub fn bump(&mut self, category: AttendanceCategory) {
        match category {
            AttendanceCategory::Worked => self.worked += 1,
            AttendanceCategory::JustifiedAbsence => self.justified_absence += 1,
            AttendanceCategory::UnjustifiedAbsence => self.unjustified_absence += 1,
            AttendanceCategory::MedicalLeave => self.medical_leave += 1,
        }
    }

    /// Days that count toward salary. Unjustified absences never do.
    pub fn payable_days(&self) -> u32 {
        self.worked + self.justified_absence + self.medical_leave
    }
}

/// One collaborator's line in the monthly pre-payroll report. Counts are
/// carried alongside the amounts so the result can be audited.
#[derive(Debug, Clone, Serialize)]
pub struct PayrollLine {
    pub collaborator_id: String,
    pub name: String,
    pub base_salary: Decimal,
    pub worked: u32,
    pub justified_absence: u32,
    pub unjustified_absence: u32,
    pub medical_leave: u32,
    pub payable_days: u32,
    pub computed_salary: Decimal,
}
