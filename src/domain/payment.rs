use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::invoice::PaymentAllocation;

/// Money released to a subcontractor, independent of invoicing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub amount: Decimal,
    #[serde(default)]
    pub tax_amount: Decimal,
    #[serde(default)]
    pub method: PaymentMethod,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub liquidation: LiquidationState,
    #[serde(default)]
    pub allocations: Vec<PaymentAllocation>,
}

impl Payment {
    pub fn new(amount: Decimal, tax_amount: Decimal, method: PaymentMethod, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            tax_amount,
            method,
            date,
            due_date: None,
            liquidation: LiquidationState::NotLiquidated,
            allocations: Vec::new(),
        }
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_liquidation(mut self, liquidation: LiquidationState) -> Self {
        self.liquidation = liquidation;
        self
    }

    pub fn total(&self) -> Decimal {
        self.amount + self.tax_amount
    }

    /// Post-dated and not yet cleared: issued but still an obligation.
    pub fn is_committed(&self) -> bool {
        matches!(self.method, PaymentMethod::PostDated) && !self.liquidation.is_liquidated()
    }
}

/// How a payment was issued; unknown labels are carried as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    PostDated,
    Other(String),
}

impl PaymentMethod {
    pub fn label(&self) -> &str {
        match self {
            PaymentMethod::PostDated => "Post Dated",
            PaymentMethod::Other(label) => label,
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Other(String::new())
    }
}

impl From<String> for PaymentMethod {
    fn from(value: String) -> Self {
        match value.trim() {
            "Post Dated" => PaymentMethod::PostDated,
            _ => PaymentMethod::Other(value),
        }
    }
}

impl From<PaymentMethod> for String {
    fn from(value: PaymentMethod) -> Self {
        value.label().to_string()
    }
}

/// Whether a post-dated instrument has cleared.
///
/// Upstream stores this as a nullable boolean; the loading boundary
/// collapses absent and `false` to `NotLiquidated`, so the engine only
/// ever sees the two-state form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum LiquidationState {
    Liquidated,
    #[default]
    NotLiquidated,
}

impl LiquidationState {
    pub fn is_liquidated(self) -> bool {
        matches!(self, LiquidationState::Liquidated)
    }
}

impl From<Option<bool>> for LiquidationState {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => LiquidationState::Liquidated,
            _ => LiquidationState::NotLiquidated,
        }
    }
}

impl From<LiquidationState> for Option<bool> {
    fn from(value: LiquidationState) -> Self {
        Some(value.is_liquidated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 15).unwrap()
    }

    #[test]
    fn tri_state_collapses_to_two() {
        assert_eq!(
            LiquidationState::from(Some(true)),
            LiquidationState::Liquidated
        );
        assert_eq!(
            LiquidationState::from(Some(false)),
            LiquidationState::NotLiquidated
        );
        assert_eq!(LiquidationState::from(None), LiquidationState::NotLiquidated);
    }

    #[test]
    fn committed_means_post_dated_and_uncleared() {
        let committed = Payment::new(dec!(20_000), dec!(1_000), PaymentMethod::PostDated, sample_date());
        assert!(committed.is_committed());
        assert_eq!(committed.total(), dec!(21_000));

        let cleared = committed
            .clone()
            .with_liquidation(LiquidationState::Liquidated);
        assert!(!cleared.is_committed());

        let transfer = Payment::new(
            dec!(20_000),
            dec!(1_000),
            PaymentMethod::Other("Bank Transfer".to_string()),
            sample_date(),
        );
        assert!(!transfer.is_committed());
    }

    #[test]
    fn method_labels_round_trip() {
        assert_eq!(
            PaymentMethod::from("Post Dated".to_string()),
            PaymentMethod::PostDated
        );
        assert_eq!(
            PaymentMethod::from("Cheque".to_string()),
            PaymentMethod::Other("Cheque".to_string())
        );
        assert_eq!(PaymentMethod::PostDated.label(), "Post Dated");
    }
}
