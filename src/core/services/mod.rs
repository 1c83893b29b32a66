pub mod invoice_service;
pub mod payment_service;
pub mod purchase_order_service;
pub mod summary_service;

pub use invoice_service::InvoiceService;
pub use payment_service::PaymentService;
pub use purchase_order_service::PurchaseOrderService;
pub use summary_service::SummaryService;

use uuid::Uuid;

use crate::domain::{Project, SubcontractorAccount};
use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    Invalid(String),
}

fn account_ref(project: &Project, account_id: Uuid) -> ServiceResult<&SubcontractorAccount> {
    project
        .account(account_id)
        .ok_or_else(|| ServiceError::Invalid("Subcontractor account not found".into()))
}

fn account_mut(project: &mut Project, account_id: Uuid) -> ServiceResult<&mut SubcontractorAccount> {
    project
        .account_mut(account_id)
        .ok_or_else(|| ServiceError::Invalid("Subcontractor account not found".into()))
}
