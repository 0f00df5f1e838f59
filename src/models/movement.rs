use crate::errors::{AppError, AppResult};
use crate::store::TableId;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

/// Direction of a petty-cash movement. The stored row keeps two amount
/// columns; exactly one of them is nonzero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementKind {
    Entry, // money returned to the fund
    Exit,  // money handed out (triggers a voucher)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VoucherStatus {
    NotRequired, // "No Aplica", entry movements
    Issued,      // "Emitido"
    Failed,      // "Fallido"
}

impl VoucherStatus {
    pub fn to_sheet_str(&self) -> &'static str {
        match self {
            VoucherStatus::NotRequired => "No Aplica",
            VoucherStatus::Issued => "Emitido",
            VoucherStatus::Failed => "Fallido",
        }
    }

    pub fn from_sheet_str(s: &str) -> Self {
        match s.trim() {
            "Emitido" => VoucherStatus::Issued,
            "Fallido" => VoucherStatus::Failed,
            _ => VoucherStatus::NotRequired,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CashMovement {
    pub transaction_id: String,      // ⇔ ID_Transaccion
    pub collaborator_id: String,     // ⇔ ID_Colaborador
    pub collaborator_name: String,   // ⇔ NombreColaborador (denormalized)
    pub record_type: String,         // ⇔ TipoRegistro (config list)
    pub entry: Decimal,              // ⇔ Entrada
    pub exit: Decimal,               // ⇔ Salida
    pub detail: String,              // ⇔ Detalle
    pub timestamp: String,           // ⇔ Timestamp
    pub voucher_url: String,         // ⇔ UrlComprobante
    pub voucher_pdf_id: String,      // ⇔ ID_PDF
    pub voucher_status: VoucherStatus, // ⇔ EstadoComprobante
}

/// Input to `record_movement`; the ledger splits `amount` into the
/// entry or exit column and generates the transaction id.
#[derive(Debug, Clone)]
pub struct NewMovement {
    pub collaborator_id: String,
    pub record_type: String,
    pub kind: MovementKind,
    pub amount: Decimal,
    pub detail: String,
}

impl CashMovement {
    pub fn kind(&self) -> MovementKind {
        if self.exit > Decimal::ZERO {
            MovementKind::Exit
        } else {
            MovementKind::Entry
        }
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.transaction_id.clone(),
            self.collaborator_id.clone(),
            self.collaborator_name.clone(),
            self.record_type.clone(),
            self.entry.to_string(),
            self.exit.to_string(),
            self.detail.clone(),
            self.timestamp.clone(),
            self.voucher_url.clone(),
            self.voucher_pdf_id.clone(),
            self.voucher_status.to_sheet_str().to_string(),
        ]
    }

    pub fn from_row(row: &[String]) -> AppResult<Self> {
        let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");

        let transaction_id = cell(0).trim().to_string();
        if transaction_id.is_empty() {
            return Err(AppError::InvalidRow {
                sheet: TableId::Ledger.sheet_name().to_string(),
                detail: "empty transaction id".to_string(),
            });
        }

        let amount = |i: usize| -> AppResult<Decimal> {
            let raw = cell(i).trim();
            if raw.is_empty() {
                Ok(Decimal::ZERO)
            } else {
                Decimal::from_str(raw).map_err(|_| AppError::InvalidAmount(raw.to_string()))
            }
        };

        Ok(CashMovement {
            transaction_id,
            collaborator_id: cell(1).trim().to_string(),
            collaborator_name: cell(2).to_string(),
            record_type: cell(3).to_string(),
            entry: amount(4)?,
            exit: amount(5)?,
            detail: cell(6).to_string(),
            timestamp: cell(7).to_string(),
            voucher_url: cell(8).to_string(),
            voucher_pdf_id: cell(9).to_string(),
            voucher_status: VoucherStatus::from_sheet_str(cell(10)),
        })
    }
}
