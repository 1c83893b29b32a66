pub mod account;
pub mod invoice;
pub mod payment;
pub mod project;
pub mod purchase_order;

pub use account::SubcontractorAccount;
pub use invoice::{Invoice, InvoiceStatus, PaymentAllocation, PaymentType};
pub use payment::{LiquidationState, Payment, PaymentMethod};
pub use project::Project;
pub use purchase_order::{ChangeOrder, ChangeOrderKind, PurchaseOrder};
