//! Request-scoped operations, one module per domain. Each logic struct
//! takes the row store (and the caller's resolved role where mutation
//! gating applies) and returns `AppResult`.

pub mod access;
pub mod attendance;
pub mod bonus;
pub mod calculator;
pub mod collaborators;
pub mod ledger;
pub mod lists;
pub mod payroll;
pub mod projects;
