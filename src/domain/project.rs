use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::SubcontractorAccount;

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// In-memory snapshot root: one construction project and its
/// subcontractor accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub vat_rate_percent: Decimal,
    #[serde(default)]
    pub accounts: Vec<SubcontractorAccount>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Project::schema_version_default")]
    pub schema_version: u8,
}

impl Project {
    pub fn new(name: impl Into<String>, vat_rate_percent: Decimal) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            vat_rate_percent,
            accounts: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_account(&mut self, account: SubcontractorAccount) -> Uuid {
        let id = account.id;
        self.accounts.push(account);
        self.touch();
        id
    }

    pub fn account(&self, id: Uuid) -> Option<&SubcontractorAccount> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn account_mut(&mut self, id: Uuid) -> Option<&mut SubcontractorAccount> {
        self.accounts.iter_mut().find(|account| account.id == id)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
