use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Project;

use super::subcontractor::{self, LedgerSummary};

/// Display pair listed alongside each subcontractor record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubcontractorTotals {
    pub account_id: Uuid,
    pub subcontractor: String,
    pub total_order_amount: Decimal,
    pub total_due_amount: Decimal,
}

/// Project-wide rollup of the per-account summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub totals: LedgerSummary,
    pub per_subcontractor: Vec<SubcontractorTotals>,
}

/// Sums every account summary into the project totals.
///
/// Strictly a field-wise sum of builder outputs; nothing is re-derived
/// against project-level collections, so a single-account project rolls
/// up to exactly that account's own summary.
pub fn build_project_summary(project: &Project, today: NaiveDate) -> ProjectSummary {
    let mut totals = LedgerSummary::default();
    let mut per_subcontractor = Vec::with_capacity(project.accounts.len());

    for account in &project.accounts {
        let summary = subcontractor::build_summary(account, project.vat_rate_percent, today);
        totals.add(&summary);
        per_subcontractor.push(SubcontractorTotals {
            account_id: account.id,
            subcontractor: account.subcontractor.clone(),
            total_order_amount: summary.total_contract_amount,
            total_due_amount: summary.due_amount,
        });
    }

    ProjectSummary {
        totals,
        per_subcontractor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PurchaseOrder, SubcontractorAccount};
    use rust_decimal_macros::dec;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_project_rolls_up_to_zeros() {
        let project = Project::new("Marina Tower", dec!(5));
        let summary = build_project_summary(&project, day(2024, 6, 1));
        assert_eq!(summary.totals, LedgerSummary::default());
        assert!(summary.per_subcontractor.is_empty());
    }

    #[test]
    fn single_account_rollup_is_the_identity() {
        let mut project = Project::new("Marina Tower", dec!(5));
        let mut account = SubcontractorAccount::new("Al Noor Electrical");
        account.add_purchase_order(PurchaseOrder::new(
            "LPO-001",
            day(2024, 1, 10),
            dec!(100_000),
            dec!(5),
        ));
        let account_summary =
            subcontractor::build_summary(&account, project.vat_rate_percent, day(2024, 6, 1));
        project.add_account(account);

        let summary = build_project_summary(&project, day(2024, 6, 1));
        assert_eq!(summary.totals, account_summary);
        assert_eq!(summary.per_subcontractor.len(), 1);
        assert_eq!(summary.per_subcontractor[0].subcontractor, "Al Noor Electrical");
        assert_eq!(
            summary.per_subcontractor[0].total_order_amount,
            dec!(105_000)
        );
    }

    #[test]
    fn accounts_sum_field_wise() {
        let mut project = Project::new("Marina Tower", dec!(5));
        for (reference, value) in [("LPO-001", dec!(10_000)), ("LPO-002", dec!(30_000))] {
            let mut account = SubcontractorAccount::new(reference.to_string());
            account.add_purchase_order(PurchaseOrder::new(
                reference,
                day(2024, 1, 10),
                value,
                dec!(5),
            ));
            project.add_account(account);
        }

        let summary = build_project_summary(&project, day(2024, 6, 1));
        assert_eq!(summary.totals.po_amount, dec!(40_000));
        assert_eq!(summary.totals.total_contract_amount, dec!(42_000));
        assert_eq!(summary.per_subcontractor.len(), 2);
    }
}
