//! Petty-cash ledger: movement recording, voucher side effects, and
//! the balance reports.
//!
//! A movement is persisted before any voucher work starts; a failing
//! voucher or notification never rolls the ledger entry back. Failures
//! surface in the receipt so the caller can re-trigger delivery by
//! hand, there are no automatic retries.

use crate::config::AppConfig;
use crate::core::access::AccessLogic;
use crate::core::calculator::balance::{
    BalanceLine, LedgerTotals, RunningLine, compute_balances, compute_running_balance,
};
use crate::core::collaborators::CollaboratorLogic;
use crate::core::lists::ListsLogic;
use crate::errors::{AppError, AppResult};
use crate::models::{CashMovement, MovementKind, NewMovement, Role, VoucherStatus};
use crate::store::{RowStore, TableId, audit};
use crate::utils::now_stamp;
use crate::voucher::{VoucherRefs, VoucherService};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::{debug, warn};

// Ledger sheet columns touched after the append, 0-based.
const COL_VOUCHER_URL: usize = 8;
const COL_VOUCHER_PDF: usize = 9;
const COL_VOUCHER_STATUS: usize = 10;

static LAST_TX_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Time-based transaction id, strictly increasing within the process
/// even when two movements land on the same millisecond.
fn next_transaction_id() -> String {
    let now = chrono::Utc::now().timestamp_millis();
    // fetch_update hands back the previous value; the stored (and used)
    // id is now, bumped past the previous one on a collision.
    let unique = match LAST_TX_MILLIS.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
        Some(now.max(last + 1))
    }) {
        Ok(previous) => now.max(previous + 1),
        Err(_) => now,
    };
    format!("TX-{unique}")
}

/// What `record_movement` hands back: the persisted movement plus the
/// outcome of the voucher side effects.
#[derive(Debug, Clone)]
pub struct MovementReceipt {
    pub movement: CashMovement,
    pub voucher: Option<VoucherRefs>,
    /// Set when issuing or delivering the voucher failed; the movement
    /// itself is already stored.
    pub voucher_error: Option<String>,
}

pub struct LedgerLogic;

impl LedgerLogic {
    /// Validate and persist a movement, then run the voucher side
    /// effects for exits.
    pub fn record_movement(
        store: &mut dyn RowStore,
        role: Role,
        voucher: &dyn VoucherService,
        cfg: &AppConfig,
        new: &NewMovement,
    ) -> AppResult<MovementReceipt> {
        AccessLogic::require_access(role)?;

        if new.amount <= Decimal::ZERO {
            return Err(AppError::InvalidAmount(new.amount.to_string()));
        }
        let record_type = new.record_type.trim().to_string();
        let known_types = ListsLogic::config_list(store, "TiposMovimientoCaja")?;
        if !known_types.iter().any(|t| t == &record_type) {
            return Err(AppError::Validation(format!(
                "unknown cash record type '{record_type}'"
            )));
        }
        let collaborator = CollaboratorLogic::find(store, &new.collaborator_id)?;

        let transaction_id = next_transaction_id();
        let (entry, exit) = match new.kind {
            MovementKind::Entry => (new.amount, Decimal::ZERO),
            MovementKind::Exit => (Decimal::ZERO, new.amount),
        };
        let mut movement = CashMovement {
            transaction_id: transaction_id.clone(),
            collaborator_id: collaborator.id.clone(),
            collaborator_name: collaborator.name.clone(),
            record_type,
            entry,
            exit,
            detail: new.detail.trim().to_string(),
            timestamp: now_stamp(),
            voucher_url: String::new(),
            voucher_pdf_id: String::new(),
            voucher_status: VoucherStatus::NotRequired,
        };

        let index = store.append_row(TableId::Ledger, movement.to_row())?;
        audit::record(store, "record_movement", "CajaChica", &transaction_id)?;
        debug!(tx = %transaction_id, "movement persisted");

        if new.kind == MovementKind::Entry {
            return Ok(MovementReceipt {
                movement,
                voucher: None,
                voucher_error: None,
            });
        }

        // Exit: issue the voucher and deliver it. Both steps are
        // non-fatal; the movement stays persisted either way.
        match voucher.issue(&movement, &collaborator, &transaction_id) {
            Ok(refs) => {
                movement.voucher_url = refs.document_url.clone();
                movement.voucher_pdf_id = refs.pdf_file_id.clone();
                store.update_cell(TableId::Ledger, index, COL_VOUCHER_URL, &refs.document_url)?;
                store.update_cell(TableId::Ledger, index, COL_VOUCHER_PDF, &refs.pdf_file_id)?;

                let delivery = Self::deliver(voucher, cfg, &movement, &refs.pdf_file_id);
                let status = match delivery {
                    Ok(()) => VoucherStatus::Issued,
                    Err(_) => VoucherStatus::Failed,
                };
                movement.voucher_status = status;
                store.update_cell(
                    TableId::Ledger,
                    index,
                    COL_VOUCHER_STATUS,
                    status.to_sheet_str(),
                )?;

                let voucher_error = delivery.err().map(|e| e.to_string());
                if let Some(err) = &voucher_error {
                    warn!(tx = %transaction_id, error = %err, "voucher delivery failed");
                }
                Ok(MovementReceipt {
                    movement,
                    voucher: Some(refs),
                    voucher_error,
                })
            }
            Err(e) => {
                movement.voucher_status = VoucherStatus::Failed;
                store.update_cell(
                    TableId::Ledger,
                    index,
                    COL_VOUCHER_STATUS,
                    VoucherStatus::Failed.to_sheet_str(),
                )?;
                warn!(tx = %transaction_id, error = %e, "voucher issue failed");
                Ok(MovementReceipt {
                    movement,
                    voucher: None,
                    voucher_error: Some(e.to_string()),
                })
            }
        }
    }

    /// Manual re-trigger after a failed delivery. Only exit movements
    /// carry vouchers.
    pub fn resend_voucher(
        store: &mut dyn RowStore,
        role: Role,
        voucher: &dyn VoucherService,
        cfg: &AppConfig,
        transaction_id: &str,
    ) -> AppResult<()> {
        AccessLogic::require_access(role)?;

        let index = store
            .find_row_index(TableId::Ledger, 0, transaction_id)?
            .ok_or_else(|| AppError::NotFound(format!("movement '{transaction_id}'")))?;
        let rows = store.read_all(TableId::Ledger)?;
        let movement = CashMovement::from_row(&rows[index])?;

        if movement.kind() != MovementKind::Exit {
            return Err(AppError::Validation(
                "only exit movements carry a voucher".to_string(),
            ));
        }

        Self::deliver(voucher, cfg, &movement, &movement.voucher_pdf_id)?;
        store.update_cell(
            TableId::Ledger,
            index,
            COL_VOUCHER_STATUS,
            VoucherStatus::Issued.to_sheet_str(),
        )?;
        audit::record(store, "resend_voucher", "CajaChica", transaction_id)?;
        Ok(())
    }

    pub fn movements(store: &dyn RowStore) -> AppResult<Vec<CashMovement>> {
        store
            .read_all(TableId::Ledger)?
            .iter()
            .map(|row| CashMovement::from_row(row))
            .collect()
    }

    /// Outstanding debt balances, see [`compute_balances`].
    pub fn balances(store: &dyn RowStore, filter: Option<&str>) -> AppResult<Vec<BalanceLine>> {
        Ok(compute_balances(&Self::movements(store)?, filter))
    }

    /// Chronological running balance, see [`compute_running_balance`].
    pub fn running_balance(
        store: &dyn RowStore,
        from: NaiveDate,
        to: NaiveDate,
        type_filter: Option<&str>,
    ) -> AppResult<(Vec<RunningLine>, LedgerTotals)> {
        Ok(compute_running_balance(
            &Self::movements(store)?,
            from,
            to,
            type_filter,
        ))
    }

    fn deliver(
        voucher: &dyn VoucherService,
        cfg: &AppConfig,
        movement: &CashMovement,
        pdf_file_id: &str,
    ) -> AppResult<()> {
        let subject = format!(
            "Comprobante {} - {}",
            movement.transaction_id, movement.collaborator_name
        );
        let body = format!(
            "Egreso de caja chica por {} ({}) para {}.",
            movement.exit, movement.record_type, movement.collaborator_name
        );
        voucher.notify(&cfg.notify_recipients, &subject, &body, pdf_file_id)
    }
}
