//! Typed records for every table of the row store.
//! These are thin wrappers around sheet rows: each type knows how to
//! serialize itself to a row of cells and how to deserialize-then-validate
//! a row coming back from the store.

pub mod attendance;
pub mod collaborator;
pub mod movement;
pub mod payroll;
pub mod project;
pub mod user;
pub mod weights;

pub use attendance::{AttendanceRecord, NewAttendance};
pub use collaborator::{CollabRef, CollabStatus, Collaborator, NewCollaborator};
pub use movement::{CashMovement, MovementKind, NewMovement, VoucherStatus};
pub use payroll::{AttendanceCategory, AttendanceCounts, PayrollLine};
pub use project::{NewProject, Project};
pub use user::Role;
pub use weights::{StandardWeight, WeightEntry};
