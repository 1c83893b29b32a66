use uuid::Uuid;

use crate::domain::{Project, PurchaseOrder, SubcontractorAccount};

use super::{account_mut, account_ref, ServiceError, ServiceResult};

pub struct PurchaseOrderService;

impl PurchaseOrderService {
    pub fn add(
        project: &mut Project,
        account_id: Uuid,
        purchase_order: PurchaseOrder,
    ) -> ServiceResult<()> {
        let account = account_mut(project, account_id)?;
        Self::validate_reference(account, None, &purchase_order.reference)?;
        account.add_purchase_order(purchase_order);
        project.touch();
        Ok(())
    }

    pub fn edit(
        project: &mut Project,
        account_id: Uuid,
        id: Uuid,
        changes: PurchaseOrder,
    ) -> ServiceResult<()> {
        let account = account_mut(project, account_id)?;
        Self::validate_reference(account, Some(id), &changes.reference)?;
        let purchase_order = account
            .purchase_orders
            .iter_mut()
            .find(|po| po.id == id)
            .ok_or_else(|| ServiceError::Invalid("Purchase order not found".into()))?;
        purchase_order.reference = changes.reference;
        purchase_order.date = changes.date;
        purchase_order.pre_tax_value = changes.pre_tax_value;
        purchase_order.tax_rate_percent = changes.tax_rate_percent;
        purchase_order.post_tax_value = changes.post_tax_value;
        purchase_order.change_orders = changes.change_orders;
        project.touch();
        Ok(())
    }

    /// Removes a purchase order and, with it, its nested change orders.
    /// Refused while any invoice still references the order.
    pub fn remove(project: &mut Project, account_id: Uuid, id: Uuid) -> ServiceResult<()> {
        let account = account_mut(project, account_id)?;
        if account
            .invoices
            .iter()
            .any(|invoice| invoice.purchase_order_id == Some(id))
        {
            return Err(ServiceError::Invalid(
                "Purchase order has linked invoices".into(),
            ));
        }
        let before = account.purchase_orders.len();
        account.purchase_orders.retain(|po| po.id != id);
        if account.purchase_orders.len() == before {
            return Err(ServiceError::Invalid("Purchase order not found".into()));
        }
        project.touch();
        Ok(())
    }

    pub fn list(project: &Project, account_id: Uuid) -> ServiceResult<Vec<&PurchaseOrder>> {
        Ok(account_ref(project, account_id)?.purchase_orders.iter().collect())
    }

    fn validate_reference(
        account: &SubcontractorAccount,
        exclude: Option<Uuid>,
        candidate: &str,
    ) -> ServiceResult<()> {
        let normalized = candidate.trim().to_ascii_lowercase();
        let duplicate = account.purchase_orders.iter().any(|po| {
            let reference = po.reference.trim().to_ascii_lowercase();
            reference == normalized && exclude.map_or(true, |id| po.id != id)
        });
        if duplicate {
            Err(ServiceError::Invalid(format!(
                "Purchase order `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }
}
