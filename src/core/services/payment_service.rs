use uuid::Uuid;

use crate::domain::{Payment, Project};

use super::{account_mut, account_ref, ServiceError, ServiceResult};

pub struct PaymentService;

impl PaymentService {
    /// Adds a payment. Every allocation row must point at an invoice in the
    /// same account; accepted rows are mirrored onto the invoice side so both
    /// records agree on where the money went.
    pub fn add(project: &mut Project, account_id: Uuid, payment: Payment) -> ServiceResult<()> {
        let account = account_mut(project, account_id)?;
        for allocation in &payment.allocations {
            if account.invoice(allocation.invoice_id).is_none() {
                return Err(ServiceError::Invalid(
                    "Payment allocation references an unknown invoice".into(),
                ));
            }
        }
        let payment_id = payment.id;
        let mut rows = payment.allocations.clone();
        for row in rows.iter_mut() {
            row.payment_id = payment_id;
        }
        account.add_payment(payment);
        for row in rows {
            if let Some(invoice) = account
                .invoices
                .iter_mut()
                .find(|invoice| invoice.id == row.invoice_id)
            {
                invoice.allocations.push(row);
            }
        }
        project.touch();
        Ok(())
    }

    /// Removes a payment and strips its allocation rows from every invoice.
    pub fn remove(project: &mut Project, account_id: Uuid, id: Uuid) -> ServiceResult<()> {
        let account = account_mut(project, account_id)?;
        let before = account.payments.len();
        account.payments.retain(|payment| payment.id != id);
        if account.payments.len() == before {
            return Err(ServiceError::Invalid("Payment not found".into()));
        }
        for invoice in account.invoices.iter_mut() {
            invoice
                .allocations
                .retain(|allocation| allocation.payment_id != id);
        }
        project.touch();
        Ok(())
    }

    pub fn list(project: &Project, account_id: Uuid) -> ServiceResult<Vec<&Payment>> {
        Ok(account_ref(project, account_id)?.payments.iter().collect())
    }
}
