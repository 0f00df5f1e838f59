//! Pure, stateless computation engines. Everything here works on data
//! already fetched into memory and never touches the row store.

pub mod aggregate;
pub mod balance;
pub mod bonus;
pub mod payroll;
