//! rNomina library root.
//! Payroll, attendance and petty-cash engine over a tabular row store.

pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod models;
pub mod store;
pub mod utils;
pub mod voucher;

pub use config::AppConfig;
pub use errors::{AppError, AppResult};
