use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::PurchaseOrder;

use super::change_orders::{self, ChangeOrderDelta};

/// Effective value of one purchase order with its change orders applied.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContractValue {
    pub pre_tax: Decimal,
    pub post_tax: Decimal,
}

impl ContractValue {
    pub fn tax_portion(&self) -> Decimal {
        self.post_tax - self.pre_tax
    }
}

/// Base PO value plus the net change-order delta, per basis.
pub fn contract_value(purchase_order: &PurchaseOrder) -> ContractValue {
    let delta = change_orders::net_delta(&purchase_order.change_orders);
    ContractValue {
        pre_tax: purchase_order.pre_tax_value + delta.pre_tax,
        post_tax: purchase_order.post_tax_value + delta.post_tax,
    }
}

/// Contract-level totals across an account's purchase orders.
///
/// Tax rates may differ per PO and per change order, so each field is
/// accumulated from per-PO figures, never recomputed from a blended
/// rate.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContractTotals {
    pub po_amount: Decimal,
    pub change_order_amount: Decimal,
    pub pre_tax: Decimal,
    pub tax: Decimal,
    pub post_tax: Decimal,
}

pub fn contract_totals(purchase_orders: &[PurchaseOrder]) -> ContractTotals {
    let mut totals = ContractTotals::default();
    for purchase_order in purchase_orders {
        let delta = change_orders::net_delta(&purchase_order.change_orders);
        let value = contract_value(purchase_order);
        totals.po_amount += purchase_order.pre_tax_value;
        totals.change_order_amount += delta.pre_tax;
        totals.pre_tax += value.pre_tax;
        totals.tax += value.tax_portion();
        totals.post_tax += value.post_tax;
    }
    totals
}

/// One row of the purchase-order listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrderReport {
    pub purchase_order_id: Uuid,
    pub reference: String,
    pub base_pre_tax: Decimal,
    pub change_order_delta: ChangeOrderDelta,
    pub contract_value: ContractValue,
    pub change_order_count: usize,
}

pub fn purchase_order_reports(purchase_orders: &[PurchaseOrder]) -> Vec<PurchaseOrderReport> {
    purchase_orders
        .iter()
        .map(|purchase_order| PurchaseOrderReport {
            purchase_order_id: purchase_order.id,
            reference: purchase_order.reference.clone(),
            base_pre_tax: purchase_order.pre_tax_value,
            change_order_delta: change_orders::net_delta(&purchase_order.change_orders),
            contract_value: contract_value(purchase_order),
            change_order_count: purchase_order.change_orders.len(),
        })
        .collect()
}
