use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{InvoiceStatus, PaymentType, SubcontractorAccount};
use crate::money;

use super::{invoices, purchase_orders};

/// Flat reconciliation summary for one subcontractor account.
///
/// Every field is a plain currency amount in the project currency,
/// summed independently so each figure stays auditable on its own.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerSummary {
    pub po_amount: Decimal,
    pub change_order_amount: Decimal,
    pub contract_pre_tax: Decimal,
    pub vat_amount: Decimal,
    pub total_contract_amount: Decimal,
    pub total_invoiced: Decimal,
    pub total_paid: Decimal,
    pub committed_payments: Decimal,
    pub balance_to_pay: Decimal,
    pub due_amount: Decimal,
    pub lpo_balance: Decimal,
    pub certified_amount: Decimal,
    pub balance_to_certify: Decimal,
    pub total_advance_payments: Decimal,
    pub total_advance_recoveries: Decimal,
    pub remaining_advance_recovery: Decimal,
    pub retention_held: Decimal,
    pub total_contra_charges: Decimal,
}

impl LedgerSummary {
    /// Field-wise accumulation; the project rollup is nothing else.
    pub fn add(&mut self, other: &LedgerSummary) {
        self.po_amount += other.po_amount;
        self.change_order_amount += other.change_order_amount;
        self.contract_pre_tax += other.contract_pre_tax;
        self.vat_amount += other.vat_amount;
        self.total_contract_amount += other.total_contract_amount;
        self.total_invoiced += other.total_invoiced;
        self.total_paid += other.total_paid;
        self.committed_payments += other.committed_payments;
        self.balance_to_pay += other.balance_to_pay;
        self.due_amount += other.due_amount;
        self.lpo_balance += other.lpo_balance;
        self.certified_amount += other.certified_amount;
        self.balance_to_certify += other.balance_to_certify;
        self.total_advance_payments += other.total_advance_payments;
        self.total_advance_recoveries += other.total_advance_recoveries;
        self.remaining_advance_recovery += other.remaining_advance_recovery;
        self.retention_held += other.retention_held;
        self.total_contra_charges += other.total_contra_charges;
    }
}

/// Derives the full reconciliation summary for one subcontractor.
///
/// Pure function of the account snapshot, the project VAT rate, and the
/// caller-supplied reference date. Two deliberate policy asymmetries are
/// reproduced from the source rules:
/// - Total Paid counts only invoices the classifier settles as paid
///   (fully-reconciled cash), while Balance to be Paid and Due Amount sum
///   raw per-invoice shortfalls regardless of status.
/// - The LPO-balance contra deduction is grossed up by the project VAT
///   rate over every invoice, while Total Contra Charges counts
///   progress-payment invoices only.
pub fn build_summary(
    account: &SubcontractorAccount,
    vat_rate_percent: Decimal,
    today: NaiveDate,
) -> LedgerSummary {
    let contract = purchase_orders::contract_totals(&account.purchase_orders);

    let mut summary = LedgerSummary {
        po_amount: contract.po_amount,
        change_order_amount: contract.change_order_amount,
        contract_pre_tax: contract.pre_tax,
        vat_amount: contract.tax,
        total_contract_amount: contract.post_tax,
        ..LedgerSummary::default()
    };

    let mut contra_charges_all = Decimal::ZERO;

    for invoice in &account.invoices {
        summary.total_invoiced += invoice.total_amount;

        let shortfall = invoices::outstanding_amount(invoice);
        summary.balance_to_pay += shortfall;
        if invoices::is_overdue(invoice, today) {
            summary.due_amount += shortfall;
        }

        if invoices::settlement_status(invoice) == InvoiceStatus::Paid {
            summary.total_paid += invoices::paid_portions(&invoice.allocations).total();
        }

        contra_charges_all += invoice.contra_charges;

        match invoice.payment_type {
            PaymentType::Progress => {
                summary.certified_amount += invoice.pre_tax_amount;
                summary.total_advance_recoveries += invoice.advance_recovery;
                summary.retention_held += invoice.retention;
                summary.total_contra_charges += invoice.contra_charges;
            }
            PaymentType::Advance => {
                summary.total_advance_payments += invoice.pre_tax_amount;
            }
            PaymentType::Other(_) => {}
        }
    }

    for payment in &account.payments {
        if payment.is_committed() {
            summary.committed_payments += payment.total();
        }
    }

    summary.lpo_balance = contract.post_tax
        - summary.total_invoiced
        - money::gross_up(contra_charges_all, vat_rate_percent);
    summary.balance_to_certify = contract.pre_tax - summary.certified_amount;
    summary.remaining_advance_recovery =
        summary.total_advance_payments - summary.total_advance_recoveries;

    tracing::debug!(
        "Summarized subcontractor '{}': {} invoices, {} payments.",
        account.subcontractor,
        account.invoices.len(),
        account.payments.len()
    );

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ChangeOrder, ChangeOrderKind, Invoice, Payment, PaymentAllocation, PaymentMethod,
        PurchaseOrder,
    };
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn progress_invoice(number: &str, total: Decimal, paid: &[Decimal]) -> Invoice {
        let mut invoice = Invoice::new(number, day(2024, 3, 1), PaymentType::Progress, total, dec!(0));
        for amount in paid {
            let row = PaymentAllocation::new(Uuid::new_v4(), invoice.id, *amount, dec!(0));
            invoice = invoice.with_allocation(row);
        }
        invoice
    }

    #[test]
    fn empty_account_summarizes_to_zeros() {
        let account = SubcontractorAccount::new("Al Noor Electrical");
        let summary = build_summary(&account, dec!(5), day(2024, 6, 1));
        assert_eq!(summary, LedgerSummary::default());
    }

    #[test]
    fn contract_block_follows_po_totals() {
        let mut account = SubcontractorAccount::new("Al Noor Electrical");
        account.add_purchase_order(
            PurchaseOrder::new("LPO-001", day(2024, 1, 10), dec!(100_000), dec!(5))
                .with_change_order(ChangeOrder::new(
                    ChangeOrderKind::Addition,
                    dec!(10_000),
                    dec!(5),
                )),
        );
        let summary = build_summary(&account, dec!(5), day(2024, 6, 1));
        assert_eq!(summary.po_amount, dec!(100_000));
        assert_eq!(summary.change_order_amount, dec!(10_000));
        assert_eq!(summary.contract_pre_tax, dec!(110_000));
        assert_eq!(summary.vat_amount, dec!(5_500));
        assert_eq!(summary.total_contract_amount, dec!(115_500));
    }

    #[test]
    fn total_paid_counts_only_settled_invoices() {
        let mut account = SubcontractorAccount::new("Gulf Interiors");
        account.add_invoice(progress_invoice("INV-1", dec!(1_000), &[dec!(400)]));
        account.add_invoice(progress_invoice("INV-2", dec!(500), &[dec!(600)]));

        let summary = build_summary(&account, dec!(5), day(2024, 6, 1));
        assert_eq!(summary.total_paid, dec!(600));
        assert_eq!(summary.balance_to_pay, dec!(600));
    }

    #[test]
    fn persisted_status_gates_total_paid() {
        let mut account = SubcontractorAccount::new("Gulf Interiors");
        account.add_invoice(
            progress_invoice("INV-3", dec!(1_000), &[dec!(1_000)]).with_status(InvoiceStatus::Unpaid),
        );

        let summary = build_summary(&account, dec!(5), day(2024, 6, 1));
        assert_eq!(summary.total_paid, dec!(0));
        // The shortfall path ignores the persisted veto.
        assert_eq!(summary.balance_to_pay, dec!(0));
    }

    #[test]
    fn committed_payments_track_uncleared_post_dated_instruments() {
        let mut account = SubcontractorAccount::new("Marhaba Scaffolding");
        account.add_payment(Payment::new(
            dec!(20_000),
            dec!(1_000),
            PaymentMethod::PostDated,
            day(2024, 4, 1),
        ));
        account.add_payment(Payment::new(
            dec!(7_000),
            dec!(350),
            PaymentMethod::Other("Bank Transfer".to_string()),
            day(2024, 4, 2),
        ));

        let summary = build_summary(&account, dec!(5), day(2024, 6, 1));
        assert_eq!(summary.committed_payments, dec!(21_000));
    }

    #[test]
    fn due_amount_restricted_to_past_due_invoices() {
        let today = day(2024, 6, 15);
        let mut account = SubcontractorAccount::new("Marhaba Scaffolding");
        account.add_invoice(
            Invoice::new("INV-4", day(2024, 5, 1), PaymentType::Progress, dec!(800), dec!(0))
                .with_due_date(day(2024, 6, 1)),
        );
        account.add_invoice(
            Invoice::new("INV-5", day(2024, 5, 2), PaymentType::Progress, dec!(900), dec!(0))
                .with_due_date(day(2024, 7, 1)),
        );
        account.add_invoice(Invoice::new(
            "INV-6",
            day(2024, 5, 3),
            PaymentType::Progress,
            dec!(700),
            dec!(0),
        ));

        let summary = build_summary(&account, dec!(5), today);
        assert_eq!(summary.due_amount, dec!(800));
        assert_eq!(summary.balance_to_pay, dec!(2_400));
    }

    #[test]
    fn progress_only_sums_exclude_advance_invoices() {
        let mut account = SubcontractorAccount::new("Desert Line Paints");
        account.add_invoice(
            Invoice::new("ADV-1", day(2024, 2, 1), PaymentType::Advance, dec!(30_000), dec!(1_500))
                .with_deductions(dec!(0), dec!(0), dec!(250)),
        );
        account.add_invoice(
            Invoice::new("INV-7", day(2024, 3, 1), PaymentType::Progress, dec!(50_000), dec!(2_500))
                .with_deductions(dec!(5_000), dec!(2_500), dec!(1_000)),
        );

        let summary = build_summary(&account, dec!(5), day(2024, 6, 1));
        assert_eq!(summary.certified_amount, dec!(50_000));
        assert_eq!(summary.total_advance_payments, dec!(30_000));
        assert_eq!(summary.total_advance_recoveries, dec!(5_000));
        assert_eq!(summary.remaining_advance_recovery, dec!(25_000));
        assert_eq!(summary.retention_held, dec!(2_500));
        // Progress-only, so the advance invoice's contra charge is out.
        assert_eq!(summary.total_contra_charges, dec!(1_000));
    }

    #[test]
    fn lpo_balance_grosses_up_contra_charges_across_all_invoices() {
        let mut account = SubcontractorAccount::new("Desert Line Paints");
        account.add_purchase_order(PurchaseOrder::new(
            "LPO-002",
            day(2024, 1, 5),
            dec!(100_000),
            dec!(5),
        ));
        account.add_invoice(
            Invoice::new("ADV-2", day(2024, 2, 1), PaymentType::Advance, dec!(10_000), dec!(500))
                .with_deductions(dec!(0), dec!(0), dec!(200)),
        );
        account.add_invoice(
            Invoice::new("INV-8", day(2024, 3, 1), PaymentType::Progress, dec!(20_000), dec!(1_000))
                .with_deductions(dec!(0), dec!(0), dec!(300)),
        );

        let summary = build_summary(&account, dec!(5), day(2024, 6, 1));
        // 105_000 - 31_500 - 1.05 * 500
        assert_eq!(summary.lpo_balance, dec!(72_975));
        assert_eq!(summary.total_contra_charges, dec!(300));
    }

    #[test]
    fn rollup_add_is_field_wise() {
        let mut left = LedgerSummary {
            po_amount: dec!(10),
            due_amount: dec!(3),
            ..LedgerSummary::default()
        };
        let right = LedgerSummary {
            po_amount: dec!(5),
            remaining_advance_recovery: dec!(-2),
            ..LedgerSummary::default()
        };
        left.add(&right);
        assert_eq!(left.po_amount, dec!(15));
        assert_eq!(left.due_amount, dec!(3));
        assert_eq!(left.remaining_advance_recovery, dec!(-2));
    }
}
