use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money;

/// Agreed scope of work for one subcontractor, tax split out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: Uuid,
    pub reference: String,
    pub date: NaiveDate,
    pub pre_tax_value: Decimal,
    pub tax_rate_percent: Decimal,
    pub post_tax_value: Decimal,
    #[serde(default)]
    pub change_orders: Vec<ChangeOrder>,
}

impl PurchaseOrder {
    pub fn new(
        reference: impl Into<String>,
        date: NaiveDate,
        pre_tax_value: Decimal,
        tax_rate_percent: Decimal,
    ) -> Self {
        let taxed = money::apply_tax(pre_tax_value, tax_rate_percent);
        Self {
            id: Uuid::new_v4(),
            reference: reference.into(),
            date,
            pre_tax_value,
            tax_rate_percent,
            post_tax_value: taxed.gross,
            change_orders: Vec::new(),
        }
    }

    pub fn with_change_order(mut self, change_order: ChangeOrder) -> Self {
        self.change_orders.push(change_order);
        self
    }
}

/// Post-award scope adjustment nested under a purchase order.
///
/// `amount` is always the non-negative magnitude; the direction of the
/// adjustment lives in `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeOrder {
    pub id: Uuid,
    pub kind: ChangeOrderKind,
    pub amount: Decimal,
    pub tax_rate_percent: Decimal,
    pub tax_amount: Decimal,
    pub post_tax_amount: Decimal,
}

impl ChangeOrder {
    pub fn new(kind: ChangeOrderKind, amount: Decimal, tax_rate_percent: Decimal) -> Self {
        let taxed = money::apply_tax(amount, tax_rate_percent);
        Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            tax_rate_percent,
            tax_amount: taxed.tax,
            post_tax_amount: taxed.gross,
        }
    }

    /// Signed pre-tax delta this change order contributes.
    pub fn signed_amount(&self) -> Decimal {
        self.kind.apply(self.amount)
    }

    /// Signed tax-inclusive delta this change order contributes.
    pub fn signed_post_tax(&self) -> Decimal {
        self.kind.apply(self.post_tax_amount)
    }
}

/// Direction of a change order; owns the sign convention.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOrderKind {
    Addition,
    Omission,
}

impl ChangeOrderKind {
    /// Applies this variant's sign to a non-negative magnitude.
    pub fn apply(self, magnitude: Decimal) -> Decimal {
        match self {
            ChangeOrderKind::Addition => magnitude,
            ChangeOrderKind::Omission => -magnitude,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "addition" => Some(ChangeOrderKind::Addition),
            "omission" => Some(ChangeOrderKind::Omission),
            _ => None,
        }
    }
}
