//! Unified application error type.
//! All modules (store, core, config, export) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Row store
    // ---------------------------
    #[error("Store error: {0}")]
    Store(String),

    // ---------------------------
    // Validation
    // ---------------------------
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Malformed row in '{sheet}': {detail}")]
    InvalidRow { sheet: String, detail: String },

    // ---------------------------
    // Lookups
    // ---------------------------
    #[error("Not found: {0}")]
    NotFound(String),

    // ---------------------------
    // Access control
    // ---------------------------
    #[error("Permission denied: {0}")]
    Permission(String),

    // ---------------------------
    // External collaborators (vouchers, notifications)
    // ---------------------------
    #[error("External service error: {0}")]
    External(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;

// Row-store failures are converted at the operation boundary into a single
// Store variant carrying the backend's message.
impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Store(e.to_string())
    }
}

impl AppError {
    /// True for errors produced by bad caller input rather than by the
    /// store or an external collaborator.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::InvalidDate(_)
                | AppError::InvalidAmount(_)
                | AppError::InvalidRole(_)
                | AppError::InvalidRow { .. }
        )
    }
}
