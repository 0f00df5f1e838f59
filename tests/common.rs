#![allow(dead_code)]
use chrono::NaiveDate;
use rnomina::config::AppConfig;
use rnomina::core::collaborators::CollaboratorLogic;
use rnomina::errors::AppResult;
use rnomina::models::{
    AttendanceRecord, CashMovement, Collaborator, NewCollaborator, Role, VoucherStatus,
};
use rnomina::store::{MemoryStore, RowStore, TableId, seed};
use rnomina::voucher::{VoucherRefs, VoucherService};
use rust_decimal::Decimal;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
}

pub fn cfg() -> AppConfig {
    AppConfig::default()
}

/// Fresh in-memory store with the config lists, standard weights and an
/// initial administrator seeded.
pub fn seeded_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    seed(&mut store, &cfg(), "admin@example.com").expect("seed store");
    store
}

pub fn add_collaborator(
    store: &mut dyn RowStore,
    id: &str,
    name: &str,
    job_title: &str,
    base_salary: i64,
) -> Collaborator {
    CollaboratorLogic::register(
        store,
        Role::Admin,
        &NewCollaborator {
            id: id.to_string(),
            name: name.to_string(),
            job_title: job_title.to_string(),
            department: "Producción".to_string(),
            hire_date: None,
            base_salary: Some(Decimal::from(base_salary)),
        },
    )
    .expect("register collaborator")
}

/// Append an attendance row directly, with a chosen record id.
pub fn push_attendance(
    store: &mut dyn RowStore,
    record_id: i64,
    collaborator_id: &str,
    date: &str,
    status: &str,
    assignment: &str,
) {
    let record = AttendanceRecord {
        record_id,
        collaborator_id: collaborator_id.to_string(),
        date: d(date),
        status: status.to_string(),
        assignment: assignment.to_string(),
        vehicle: String::new(),
        hours_worked: Decimal::from(8),
        observations: String::new(),
        timestamp: format!("{date}T08:00:00+00:00"),
    };
    store
        .append_row(TableId::Attendance, record.to_row())
        .expect("append attendance");
}

/// Build a ledger movement in memory (entry XOR exit nonzero).
pub fn movement(
    tx: &str,
    collaborator_id: &str,
    name: &str,
    record_type: &str,
    entry: i64,
    exit: i64,
    date: &str,
) -> CashMovement {
    CashMovement {
        transaction_id: tx.to_string(),
        collaborator_id: collaborator_id.to_string(),
        collaborator_name: name.to_string(),
        record_type: record_type.to_string(),
        entry: Decimal::from(entry),
        exit: Decimal::from(exit),
        detail: String::new(),
        timestamp: format!("{date}T10:00:00+00:00"),
        voucher_url: String::new(),
        voucher_pdf_id: String::new(),
        voucher_status: VoucherStatus::NotRequired,
    }
}

pub fn push_movement(store: &mut dyn RowStore, mv: &CashMovement) {
    store
        .append_row(TableId::Ledger, mv.to_row())
        .expect("append movement");
}

/// Unique output path inside the system temp dir, removed up front.
pub fn temp_out(name: &str, ext: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{name}_rnomina_out.{ext}"));
    fs::remove_file(&path).ok();
    path
}

/// Voucher stub that issues fixed references and records nothing.
pub struct StubVoucher;

impl VoucherService for StubVoucher {
    fn issue(
        &self,
        _movement: &CashMovement,
        _collaborator: &Collaborator,
        transaction_id: &str,
    ) -> AppResult<VoucherRefs> {
        Ok(VoucherRefs {
            document_url: format!("https://docs.example/{transaction_id}"),
            pdf_file_id: format!("pdf-{transaction_id}"),
            pdf_url: format!("https://pdf.example/{transaction_id}"),
        })
    }

    fn notify(
        &self,
        _recipients: &[String],
        _subject: &str,
        _body: &str,
        _pdf_file_id: &str,
    ) -> AppResult<()> {
        Ok(())
    }
}

/// Voucher stub whose delivery always fails.
pub struct FailingNotify;

impl VoucherService for FailingNotify {
    fn issue(
        &self,
        _movement: &CashMovement,
        _collaborator: &Collaborator,
        transaction_id: &str,
    ) -> AppResult<VoucherRefs> {
        Ok(VoucherRefs {
            document_url: format!("https://docs.example/{transaction_id}"),
            pdf_file_id: format!("pdf-{transaction_id}"),
            pdf_url: format!("https://pdf.example/{transaction_id}"),
        })
    }

    fn notify(
        &self,
        _recipients: &[String],
        _subject: &str,
        _body: &str,
        _pdf_file_id: &str,
    ) -> AppResult<()> {
        Err(rnomina::AppError::External("smtp unavailable".to_string()))
    }
}
