use uuid::Uuid;

use crate::domain::{Invoice, Project, SubcontractorAccount};

use super::{account_mut, account_ref, ServiceError, ServiceResult};

pub struct InvoiceService;

impl InvoiceService {
    pub fn add(project: &mut Project, account_id: Uuid, invoice: Invoice) -> ServiceResult<()> {
        let account = account_mut(project, account_id)?;
        Self::validate_number(account, None, &invoice.number)?;
        Self::validate_purchase_order(account, &invoice)?;
        account.add_invoice(invoice);
        project.touch();
        Ok(())
    }

    pub fn edit(
        project: &mut Project,
        account_id: Uuid,
        id: Uuid,
        changes: Invoice,
    ) -> ServiceResult<()> {
        let account = account_mut(project, account_id)?;
        Self::validate_number(account, Some(id), &changes.number)?;
        Self::validate_purchase_order(account, &changes)?;
        let invoice = account
            .invoices
            .iter_mut()
            .find(|invoice| invoice.id == id)
            .ok_or_else(|| ServiceError::Invalid("Invoice not found".into()))?;
        invoice.number = changes.number;
        invoice.date = changes.date;
        invoice.due_date = changes.due_date;
        invoice.payment_type = changes.payment_type;
        invoice.purchase_order_id = changes.purchase_order_id;
        invoice.pre_tax_amount = changes.pre_tax_amount;
        invoice.tax_amount = changes.tax_amount;
        invoice.total_amount = changes.total_amount;
        invoice.advance_recovery = changes.advance_recovery;
        invoice.retention = changes.retention;
        invoice.contra_charges = changes.contra_charges;
        invoice.status = changes.status;
        project.touch();
        Ok(())
    }

    /// Removes an invoice and strips its allocation rows from the payment side,
    /// so no payment keeps pointing at a record that no longer exists.
    pub fn remove(project: &mut Project, account_id: Uuid, id: Uuid) -> ServiceResult<()> {
        let account = account_mut(project, account_id)?;
        let before = account.invoices.len();
        account.invoices.retain(|invoice| invoice.id != id);
        if account.invoices.len() == before {
            return Err(ServiceError::Invalid("Invoice not found".into()));
        }
        for payment in account.payments.iter_mut() {
            payment
                .allocations
                .retain(|allocation| allocation.invoice_id != id);
        }
        project.touch();
        Ok(())
    }

    pub fn list(project: &Project, account_id: Uuid) -> ServiceResult<Vec<&Invoice>> {
        Ok(account_ref(project, account_id)?.invoices.iter().collect())
    }

    fn validate_number(
        account: &SubcontractorAccount,
        exclude: Option<Uuid>,
        candidate: &str,
    ) -> ServiceResult<()> {
        let normalized = candidate.trim().to_ascii_lowercase();
        let duplicate = account.invoices.iter().any(|invoice| {
            let number = invoice.number.trim().to_ascii_lowercase();
            number == normalized && exclude.map_or(true, |id| invoice.id != id)
        });
        if duplicate {
            Err(ServiceError::Invalid(format!(
                "Invoice `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }

    fn validate_purchase_order(
        account: &SubcontractorAccount,
        invoice: &Invoice,
    ) -> ServiceResult<()> {
        match invoice.purchase_order_id {
            Some(po_id) if account.purchase_order(po_id).is_none() => Err(ServiceError::Invalid(
                "Invoice references an unknown purchase order".into(),
            )),
            _ => Ok(()),
        }
    }
}
