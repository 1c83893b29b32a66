use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{invoice::Invoice, payment::Payment, purchase_order::PurchaseOrder};

/// One subcontractor assignment: the POs, invoices, and payments that
/// belong to a single subcontractor on a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubcontractorAccount {
    pub id: Uuid,
    pub subcontractor: String,
    #[serde(default)]
    pub purchase_orders: Vec<PurchaseOrder>,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl SubcontractorAccount {
    pub fn new(subcontractor: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            subcontractor: subcontractor.into(),
            purchase_orders: Vec::new(),
            invoices: Vec::new(),
            payments: Vec::new(),
        }
    }

    pub fn add_purchase_order(&mut self, purchase_order: PurchaseOrder) -> Uuid {
        let id = purchase_order.id;
        self.purchase_orders.push(purchase_order);
        id
    }

    pub fn add_invoice(&mut self, invoice: Invoice) -> Uuid {
        let id = invoice.id;
        self.invoices.push(invoice);
        id
    }

    pub fn add_payment(&mut self, payment: Payment) -> Uuid {
        let id = payment.id;
        self.payments.push(payment);
        id
    }

    pub fn purchase_order(&self, id: Uuid) -> Option<&PurchaseOrder> {
        self.purchase_orders.iter().find(|po| po.id == id)
    }

    pub fn invoice(&self, id: Uuid) -> Option<&Invoice> {
        self.invoices.iter().find(|invoice| invoice.id == id)
    }

    pub fn payment(&self, id: Uuid) -> Option<&Payment> {
        self.payments.iter().find(|payment| payment.id == id)
    }
}
