//! Data-loading boundary: raw upstream export records normalized into
//! engine-ready domain values.

use std::{collections::HashSet, fs, path::Path};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    config::SiteConfig,
    domain::{
        ChangeOrder, ChangeOrderKind, Invoice, InvoiceStatus, LiquidationState, Payment,
        PaymentAllocation, PaymentMethod, PaymentType, Project, PurchaseOrder,
        SubcontractorAccount,
    },
    errors::LedgerError,
    ledger, money,
};

/// Loads a project snapshot from disk, returning structured errors on failure.
pub fn load_project_from_path(path: &Path) -> Result<Project, LedgerError> {
    let data = fs::read_to_string(path)?;
    load_project_from_str(&data)
}

/// Parses and normalizes a raw snapshot document.
///
/// Inconsistencies the engine can tolerate (overpaid invoices, post-tax
/// drift beyond the settlement tolerance, dangling PO references) are
/// logged and kept; malformed change orders are rejected.
pub fn load_project_from_str(data: &str) -> Result<Project, LedgerError> {
    let record: ProjectRecord = serde_json::from_str(data)?;
    let project = normalize_project(record)?;
    for warning in snapshot_warnings(&project) {
        tracing::warn!("{}", warning);
    }
    Ok(project)
}

/// Raw project export. Field names accept both the normalized snake_case
/// form and the upstream camelCase form.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRecord {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "vatRate")]
    pub vat_rate_percent: Option<Decimal>,
    #[serde(default)]
    pub accounts: Vec<AccountRecord>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountRecord {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub subcontractor: String,
    #[serde(default, alias = "purchaseOrders")]
    pub purchase_orders: Vec<PurchaseOrderRecord>,
    #[serde(default)]
    pub invoices: Vec<InvoiceRecord>,
    #[serde(default)]
    pub payments: Vec<PaymentRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseOrderRecord {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default, alias = "preTaxValue")]
    pub pre_tax_value: Option<Decimal>,
    #[serde(default, alias = "taxRate")]
    pub tax_rate_percent: Option<Decimal>,
    #[serde(default, alias = "postTaxValue")]
    pub post_tax_value: Option<Decimal>,
    #[serde(default, alias = "changeOrders")]
    pub change_orders: Vec<ChangeOrderRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangeOrderRecord {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default, alias = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default, alias = "taxRate")]
    pub tax_rate_percent: Option<Decimal>,
    #[serde(default, alias = "taxAmount")]
    pub tax_amount: Option<Decimal>,
    #[serde(default, alias = "postTaxAmount", alias = "amountWithVat")]
    pub post_tax_amount: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceRecord {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default, alias = "purchaseOrderId")]
    pub purchase_order_id: Option<Uuid>,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default, alias = "dueDate")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, alias = "paymentType")]
    pub payment_type: Option<String>,
    #[serde(default, alias = "invoiceAmount", alias = "preTaxAmount")]
    pub pre_tax_amount: Option<Decimal>,
    #[serde(default, alias = "taxAmount")]
    pub tax_amount: Option<Decimal>,
    #[serde(default, alias = "advanceRecovery")]
    pub advance_recovery: Option<Decimal>,
    #[serde(default)]
    pub retention: Option<Decimal>,
    #[serde(default, alias = "contraCharges", alias = "contraChargesAmount")]
    pub contra_charges: Option<Decimal>,
    #[serde(default, alias = "totalAmount")]
    pub total_amount: Option<Decimal>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub allocations: Vec<AllocationRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRecord {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default, alias = "taxAmount")]
    pub tax_amount: Option<Decimal>,
    #[serde(default, alias = "paymentMethod")]
    pub method: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default, alias = "dueDate")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, alias = "liquidation")]
    pub liquidated: Option<bool>,
    #[serde(default)]
    pub allocations: Vec<AllocationRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AllocationRecord {
    #[serde(default, alias = "paymentId")]
    pub payment_id: Option<Uuid>,
    #[serde(default, alias = "invoiceId")]
    pub invoice_id: Option<Uuid>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default, alias = "taxAmount")]
    pub tax_amount: Option<Decimal>,
}

pub fn normalize_project(record: ProjectRecord) -> Result<Project, LedgerError> {
    let now = Utc::now();
    let mut accounts = Vec::with_capacity(record.accounts.len());
    for account in record.accounts {
        accounts.push(normalize_account(account)?);
    }
    Ok(Project {
        id: record.id.unwrap_or_else(Uuid::new_v4),
        name: record.name,
        vat_rate_percent: record
            .vat_rate_percent
            .unwrap_or_else(|| SiteConfig::default().vat_rate_percent),
        accounts,
        created_at: record.created_at.unwrap_or(now),
        updated_at: record.updated_at.unwrap_or(now),
        schema_version: Project::schema_version_default(),
    })
}

fn normalize_account(record: AccountRecord) -> Result<SubcontractorAccount, LedgerError> {
    let mut purchase_orders = Vec::with_capacity(record.purchase_orders.len());
    for purchase_order in record.purchase_orders {
        purchase_orders.push(normalize_purchase_order(purchase_order)?);
    }
    Ok(SubcontractorAccount {
        id: record.id.unwrap_or_else(Uuid::new_v4),
        subcontractor: record.subcontractor,
        purchase_orders,
        invoices: record.invoices.into_iter().map(normalize_invoice).collect(),
        payments: record.payments.into_iter().map(normalize_payment).collect(),
    })
}

fn normalize_purchase_order(record: PurchaseOrderRecord) -> Result<PurchaseOrder, LedgerError> {
    let pre_tax_value = record.pre_tax_value.unwrap_or(Decimal::ZERO);
    let tax_rate_percent = record.tax_rate_percent.unwrap_or(Decimal::ZERO);
    let post_tax_value = record
        .post_tax_value
        .unwrap_or_else(|| money::gross_up(pre_tax_value, tax_rate_percent));
    let mut change_orders = Vec::with_capacity(record.change_orders.len());
    for change_order in record.change_orders {
        change_orders.push(normalize_change_order(change_order)?);
    }
    Ok(PurchaseOrder {
        id: record.id.unwrap_or_else(Uuid::new_v4),
        reference: record.reference,
        date: record.date.unwrap_or_default(),
        pre_tax_value,
        tax_rate_percent,
        post_tax_value,
        change_orders,
    })
}

fn normalize_change_order(record: ChangeOrderRecord) -> Result<ChangeOrder, LedgerError> {
    let amount = record.amount.unwrap_or(Decimal::ZERO);
    if amount < Decimal::ZERO {
        return Err(LedgerError::InvalidRecord(format!(
            "change order amount {} is negative; direction belongs in the type field",
            amount
        )));
    }
    let kind_label = record.kind.unwrap_or_default();
    let kind = ChangeOrderKind::from_label(&kind_label).ok_or_else(|| {
        LedgerError::InvalidRecord(format!("unknown change order type `{}`", kind_label))
    })?;
    let tax_rate_percent = record.tax_rate_percent.unwrap_or(Decimal::ZERO);
    let tax_amount = record
        .tax_amount
        .unwrap_or_else(|| money::tax_on(amount, tax_rate_percent));
    let post_tax_amount = record.post_tax_amount.unwrap_or(amount + tax_amount);
    Ok(ChangeOrder {
        id: record.id.unwrap_or_else(Uuid::new_v4),
        kind,
        amount,
        tax_rate_percent,
        tax_amount,
        post_tax_amount,
    })
}

fn normalize_invoice(record: InvoiceRecord) -> Invoice {
    let id = record.id.unwrap_or_else(Uuid::new_v4);
    let pre_tax_amount = record.pre_tax_amount.unwrap_or(Decimal::ZERO);
    let tax_amount = record.tax_amount.unwrap_or(Decimal::ZERO);
    Invoice {
        id,
        purchase_order_id: record.purchase_order_id,
        number: record.number,
        date: record.date.unwrap_or_default(),
        due_date: record.due_date,
        payment_type: record
            .payment_type
            .map(PaymentType::from)
            .unwrap_or_default(),
        pre_tax_amount,
        tax_amount,
        advance_recovery: record.advance_recovery.unwrap_or(Decimal::ZERO),
        retention: record.retention.unwrap_or(Decimal::ZERO),
        contra_charges: record.contra_charges.unwrap_or(Decimal::ZERO),
        total_amount: record.total_amount.unwrap_or(pre_tax_amount + tax_amount),
        status: record.status.as_deref().and_then(InvoiceStatus::from_label),
        allocations: record
            .allocations
            .into_iter()
            .map(|allocation| normalize_allocation(allocation, Uuid::nil(), id))
            .collect(),
    }
}

fn normalize_payment(record: PaymentRecord) -> Payment {
    let id = record.id.unwrap_or_else(Uuid::new_v4);
    Payment {
        id,
        amount: record.amount.unwrap_or(Decimal::ZERO),
        tax_amount: record.tax_amount.unwrap_or(Decimal::ZERO),
        method: record.method.map(PaymentMethod::from).unwrap_or_default(),
        date: record.date.unwrap_or_default(),
        due_date: record.due_date,
        liquidation: LiquidationState::from(record.liquidated),
        allocations: record
            .allocations
            .into_iter()
            .map(|allocation| normalize_allocation(allocation, id, Uuid::nil()))
            .collect(),
    }
}

fn normalize_allocation(
    record: AllocationRecord,
    payment_id: Uuid,
    invoice_id: Uuid,
) -> PaymentAllocation {
    PaymentAllocation {
        payment_id: record.payment_id.unwrap_or(payment_id),
        invoice_id: record.invoice_id.unwrap_or(invoice_id),
        amount: record.amount.unwrap_or(Decimal::ZERO),
        tax_amount: record.tax_amount.unwrap_or(Decimal::ZERO),
    }
}

/// Collects the tolerated inconsistencies in a normalized snapshot.
pub fn snapshot_warnings(project: &Project) -> Vec<String> {
    let mut warnings = Vec::new();
    for account in &project.accounts {
        let po_ids: HashSet<Uuid> = account.purchase_orders.iter().map(|po| po.id).collect();
        for purchase_order in &account.purchase_orders {
            let expected = money::gross_up(
                purchase_order.pre_tax_value,
                purchase_order.tax_rate_percent,
            );
            if !money::within_tolerance(purchase_order.post_tax_value, expected) {
                warnings.push(format!(
                    "purchase order {} post-tax value {} disagrees with {} derived from rate {}",
                    purchase_order.reference,
                    purchase_order.post_tax_value,
                    expected,
                    purchase_order.tax_rate_percent
                ));
            }
        }
        for invoice in &account.invoices {
            let paid = ledger::invoices::paid_portions(&invoice.allocations).total();
            if paid > invoice.total_amount + money::settlement_tolerance() {
                warnings.push(format!(
                    "invoice {} allocations total {} exceeds invoice total {}",
                    invoice.number, paid, invoice.total_amount
                ));
            }
            if let Some(po_id) = invoice.purchase_order_id {
                if !po_ids.contains(&po_id) {
                    warnings.push(format!(
                        "invoice {} references unknown purchase order {}",
                        invoice.number, po_id
                    ));
                }
            }
        }
    }
    warnings
}
