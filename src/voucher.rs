//! Voucher collaborator seam. Document rendering, PDF conversion and
//! mail delivery live behind this trait, outside the crate; the ledger
//! only persists the references an implementation returns.

use crate::errors::AppResult;
use crate::models::{CashMovement, Collaborator};

/// References to the generated voucher artifacts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoucherRefs {
    pub document_url: String,
    pub pdf_file_id: String,
    pub pdf_url: String,
}

pub trait VoucherService {
    /// Produce the voucher documents for an exit movement.
    fn issue(
        &self,
        movement: &CashMovement,
        collaborator: &Collaborator,
        transaction_id: &str,
    ) -> AppResult<VoucherRefs>;

    /// Deliver the voucher to the recipients.
    fn notify(
        &self,
        recipients: &[String],
        subject: &str,
        body: &str,
        pdf_file_id: &str,
    ) -> AppResult<()>;
}

/// Default implementation: produces empty references and delivers
/// nothing. Deployments wire a real backend here.
#[derive(Debug, Default)]
pub struct NoopVoucher;

impl VoucherService for NoopVoucher {
    fn issue(
        &self,
        _movement: &CashMovement,
        _collaborator: &Collaborator,
        _transaction_id: &str,
    ) -> AppResult<VoucherRefs> {
        Ok(VoucherRefs::default())
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
