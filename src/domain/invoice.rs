use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Certified work (or advance claim) billed by a subcontractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_order_id: Option<Uuid>,
    pub number: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub payment_type: PaymentType,
    pub pre_tax_amount: Decimal,
    pub tax_amount: Decimal,
    #[serde(default)]
    pub advance_recovery: Decimal,
    #[serde(default)]
    pub retention: Decimal,
    #[serde(default)]
    pub contra_charges: Decimal,
    pub total_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<InvoiceStatus>,
    #[serde(default)]
    pub allocations: Vec<PaymentAllocation>,
}

impl Invoice {
    pub fn new(
        number: impl Into<String>,
        date: NaiveDate,
        payment_type: PaymentType,
        pre_tax_amount: Decimal,
        tax_amount: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            purchase_order_id: None,
            number: number.into(),
            date,
            due_date: None,
            payment_type,
            pre_tax_amount,
            tax_amount,
            advance_recovery: Decimal::ZERO,
            retention: Decimal::ZERO,
            contra_charges: Decimal::ZERO,
            total_amount: pre_tax_amount + tax_amount,
            status: None,
            allocations: Vec::new(),
        }
    }

    pub fn for_purchase_order(mut self, purchase_order_id: Uuid) -> Self {
        self.purchase_order_id = Some(purchase_order_id);
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the contract deductions withheld against this invoice.
    pub fn with_deductions(
        mut self,
        advance_recovery: Decimal,
        retention: Decimal,
        contra_charges: Decimal,
    ) -> Self {
        self.advance_recovery = advance_recovery;
        self.retention = retention;
        self.contra_charges = contra_charges;
        self
    }

    pub fn with_status(mut self, status: InvoiceStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_allocation(mut self, allocation: PaymentAllocation) -> Self {
        self.allocations.push(allocation);
        self
    }
}

/// Persisted settlement state; absent means "derive from allocations".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Unpaid,
    PartiallyPaid,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            InvoiceStatus::Unpaid => "unpaid",
            InvoiceStatus::PartiallyPaid => "partially_paid",
            InvoiceStatus::Paid => "paid",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().replace(' ', "_").as_str() {
            "unpaid" => Some(InvoiceStatus::Unpaid),
            "partially_paid" => Some(InvoiceStatus::PartiallyPaid),
            "paid" => Some(InvoiceStatus::Paid),
            _ => None,
        }
    }
}

/// Commercial nature of an invoice; unknown labels are carried as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum PaymentType {
    Advance,
    Progress,
    Other(String),
}

impl PaymentType {
    pub fn label(&self) -> &str {
        match self {
            PaymentType::Advance => "Advance Payment",
            PaymentType::Progress => "Progress Payment",
            PaymentType::Other(label) => label,
        }
    }
}

impl Default for PaymentType {
    fn default() -> Self {
        PaymentType::Other(String::new())
    }
}

impl From<String> for PaymentType {
    fn from(value: String) -> Self {
        match value.trim() {
            "Advance Payment" => PaymentType::Advance,
            "Progress Payment" => PaymentType::Progress,
            _ => PaymentType::Other(value),
        }
    }
}

impl From<PaymentType> for String {
    fn from(value: PaymentType) -> Self {
        value.label().to_string()
    }
}

/// Slice of a payment applied against one invoice.
///
/// The invoice-side rows are the source of truth for how much of an
/// invoice has been settled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentAllocation {
    pub payment_id: Uuid,
    pub invoice_id: Uuid,
    pub amount: Decimal,
    #[serde(default)]
    pub tax_amount: Decimal,
}

impl PaymentAllocation {
    pub fn new(payment_id: Uuid, invoice_id: Uuid, amount: Decimal, tax_amount: Decimal) -> Self {
        Self {
            payment_id,
            invoice_id,
            amount,
            tax_amount,
        }
    }

    pub fn total(&self) -> Decimal {
        self.amount + self.tax_amount
    }
}
