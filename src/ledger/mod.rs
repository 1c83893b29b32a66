//! The reconciliation engine: pure derivations over domain snapshots.

pub mod change_orders;
pub mod invoices;
pub mod project;
pub mod purchase_orders;
pub mod subcontractor;

pub use change_orders::{net_delta, ChangeOrderDelta};
pub use invoices::{
    invoice_reports, is_overdue, outstanding_amount, paid_portions, settlement_status,
    InvoiceReport, PaidPortions,
};
pub use project::{build_project_summary, ProjectSummary, SubcontractorTotals};
pub use purchase_orders::{
    contract_totals, contract_value, purchase_order_reports, ContractTotals, ContractValue,
    PurchaseOrderReport,
};
pub use subcontractor::{build_summary, LedgerSummary};
