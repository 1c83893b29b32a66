use chrono::NaiveDate;
use rust_decimal_macros::dec;
use uuid::Uuid;

use subledger_core::{
    domain::{
        Invoice, PaymentAllocation, PaymentType, Project, PurchaseOrder, SubcontractorAccount,
    },
    ledger::{build_project_summary, build_summary},
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn account_with_activity(name: &str, contract: rust_decimal::Decimal) -> SubcontractorAccount {
    let mut account = SubcontractorAccount::new(name);
    account.add_purchase_order(PurchaseOrder::new(
        format!("LPO-{name}"),
        day(2024, 1, 5),
        contract,
        dec!(5),
    ));
    let mut invoice = Invoice::new(
        format!("INV-{name}"),
        day(2024, 3, 1),
        PaymentType::Progress,
        dec!(10_000),
        dec!(500),
    )
    .with_due_date(day(2024, 4, 1));
    invoice.allocations.push(PaymentAllocation::new(
        Uuid::new_v4(),
        invoice.id,
        dec!(4_000),
        dec!(0),
    ));
    account.add_invoice(invoice);
    account
}

#[test]
fn single_account_rollup_is_the_identity() {
    let mut project = Project::new("Corniche Plaza", dec!(5));
    let account_id = project.add_account(account_with_activity("A", dec!(100_000)));
    let today = day(2024, 6, 1);

    let rollup = build_project_summary(&project, today);
    let account = project.account(account_id).unwrap();
    let direct = build_summary(account, project.vat_rate_percent, today);

    assert_eq!(rollup.totals, direct);
    assert_eq!(rollup.per_subcontractor.len(), 1);
    assert_eq!(rollup.per_subcontractor[0].account_id, account_id);
    assert_eq!(
        rollup.per_subcontractor[0].total_order_amount,
        direct.total_contract_amount
    );
    assert_eq!(rollup.per_subcontractor[0].total_due_amount, direct.due_amount);
}

#[test]
fn multi_account_rollup_sums_field_by_field() {
    let mut project = Project::new("Corniche Plaza", dec!(5));
    project.add_account(account_with_activity("A", dec!(100_000)));
    project.add_account(account_with_activity("B", dec!(60_000)));
    let today = day(2024, 6, 1);

    let rollup = build_project_summary(&project, today);

    assert_eq!(rollup.totals.po_amount, dec!(160_000));
    assert_eq!(rollup.totals.total_contract_amount, dec!(168_000));
    assert_eq!(rollup.totals.total_invoiced, dec!(21_000));
    assert_eq!(rollup.totals.due_amount, dec!(13_000));
    assert_eq!(rollup.per_subcontractor.len(), 2);
}

#[test]
fn empty_project_rolls_up_to_zeroes() {
    let project = Project::new("Corniche Plaza", dec!(5));
    let rollup = build_project_summary(&project, day(2024, 6, 1));

    assert_eq!(rollup.totals, Default::default());
    assert!(rollup.per_subcontractor.is_empty());
}

#[test]
fn rows_keep_the_subcontractor_names() {
    let mut project = Project::new("Corniche Plaza", dec!(5));
    project.add_account(account_with_activity("Falcon", dec!(50_000)));
    project.add_account(account_with_activity("Gulf", dec!(80_000)));

    let rollup = build_project_summary(&project, day(2024, 6, 1));
    let names: Vec<&str> = rollup
        .per_subcontractor
        .iter()
        .map(|row| row.subcontractor.as_str())
        .collect();

    assert_eq!(names, vec!["Falcon", "Gulf"]);
}
