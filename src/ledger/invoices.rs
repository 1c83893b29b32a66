use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Invoice, InvoiceStatus, PaymentAllocation};
use crate::money;

/// Principal and tax portions of an invoice's settlement trail.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaidPortions {
    pub principal: Decimal,
    pub tax: Decimal,
}

impl PaidPortions {
    pub fn total(&self) -> Decimal {
        self.principal + self.tax
    }
}

/// Sums allocation rows into principal and tax portions; an empty trail
/// yields zeros.
pub fn paid_portions(allocations: &[PaymentAllocation]) -> PaidPortions {
    let mut portions = PaidPortions::default();
    for allocation in allocations {
        portions.principal += allocation.amount;
        portions.tax += allocation.tax_amount;
    }
    portions
}

/// Settlement state of an invoice.
///
/// A persisted status wins; otherwise the state is derived from the
/// allocation trail within the settlement tolerance. Every "is this
/// invoice paid" decision goes through here.
pub fn settlement_status(invoice: &Invoice) -> InvoiceStatus {
    if let Some(status) = invoice.status {
        return status;
    }
    let paid = paid_portions(&invoice.allocations).total();
    let tolerance = money::settlement_tolerance();
    if paid >= invoice.total_amount - tolerance {
        InvoiceStatus::Paid
    } else if paid > tolerance {
        InvoiceStatus::PartiallyPaid
    } else {
        InvoiceStatus::Unpaid
    }
}

/// Unpaid remainder of an invoice, floored at zero.
///
/// Computed from the raw allocation trail regardless of any persisted
/// status; an overpaid invoice never reports a negative remainder.
pub fn outstanding_amount(invoice: &Invoice) -> Decimal {
    let remaining = invoice.total_amount - paid_portions(&invoice.allocations).total();
    remaining.max(Decimal::ZERO)
}

/// Strict date-only comparison; an invoice without a due date is never
/// overdue.
pub fn is_overdue(invoice: &Invoice, today: NaiveDate) -> bool {
    match invoice.due_date {
        Some(due_date) => due_date < today,
        None => false,
    }
}

/// One row of the invoice listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceReport {
    pub invoice_id: Uuid,
    pub number: String,
    pub total_amount: Decimal,
    pub due_date: Option<NaiveDate>,
    pub status: InvoiceStatus,
    pub paid: PaidPortions,
    pub outstanding: Decimal,
    pub overdue: bool,
}

pub fn invoice_reports(invoices: &[Invoice], today: NaiveDate) -> Vec<InvoiceReport> {
    invoices
        .iter()
        .map(|invoice| InvoiceReport {
            invoice_id: invoice.id,
            number: invoice.number.clone(),
            total_amount: invoice.total_amount,
            due_date: invoice.due_date,
            status: settlement_status(invoice),
            paid: paid_portions(&invoice.allocations),
            outstanding: outstanding_amount(invoice),
            overdue: is_overdue(invoice, today),
        })
        .collect()
}
