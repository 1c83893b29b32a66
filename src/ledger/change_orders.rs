use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ChangeOrder;

/// Net signed effect of a set of change orders, per tax basis.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeOrderDelta {
    pub pre_tax: Decimal,
    pub post_tax: Decimal,
}

/// Folds change orders into one signed delta per basis.
///
/// Additions add, omissions subtract, each basis summed independently.
/// An empty slice yields zeros; a net-negative result is legitimate
/// output when omissions outweigh additions.
pub fn net_delta(change_orders: &[ChangeOrder]) -> ChangeOrderDelta {
    let mut delta = ChangeOrderDelta::default();
    for change_order in change_orders {
        delta.pre_tax += change_order.signed_amount();
        delta.post_tax += change_order.signed_post_tax();
    }
    delta
}
