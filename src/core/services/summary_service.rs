use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::Project;
use crate::ledger::{
    build_project_summary, build_summary, invoice_reports, purchase_order_reports, InvoiceReport,
    LedgerSummary, ProjectSummary, PurchaseOrderReport,
};

use super::{account_ref, ServiceResult};

pub struct SummaryService;

impl SummaryService {
    pub fn subcontractor(
        project: &Project,
        account_id: Uuid,
        today: NaiveDate,
    ) -> ServiceResult<LedgerSummary> {
        let account = account_ref(project, account_id)?;
        Ok(build_summary(account, project.vat_rate_percent, today))
    }

    pub fn project(project: &Project, today: NaiveDate) -> ProjectSummary {
        build_project_summary(project, today)
    }

    pub fn purchase_orders(
        project: &Project,
        account_id: Uuid,
    ) -> ServiceResult<Vec<PurchaseOrderReport>> {
        let account = account_ref(project, account_id)?;
        Ok(purchase_order_reports(&account.purchase_orders))
    }

    pub fn invoices(
        project: &Project,
        account_id: Uuid,
        today: NaiveDate,
    ) -> ServiceResult<Vec<InvoiceReport>> {
        let account = account_ref(project, account_id)?;
        Ok(invoice_reports(&account.invoices, today))
    }
}
