use once_cell::sync::Lazy;
use rust_decimal::{Decimal, RoundingStrategy};

/// Two minor units of slack between "paid" and "owed" figures.
static SETTLEMENT_TOLERANCE: Lazy<Decimal> = Lazy::new(|| Decimal::new(1, 2));

/// Pre-tax, tax, and tax-inclusive views of a single amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxedAmount {
    pub net: Decimal,
    pub tax: Decimal,
    pub gross: Decimal,
}

/// Splits a pre-tax amount into net, tax, and gross figures.
///
/// The tax component is rounded half-up to two decimal places; the gross
/// figure is the sum of the rounded parts, never a blended-rate product.
pub fn apply_tax(pre_tax: Decimal, rate_percent: Decimal) -> TaxedAmount {
    let tax = tax_on(pre_tax, rate_percent);
    TaxedAmount {
        net: pre_tax,
        tax,
        gross: pre_tax + tax,
    }
}

/// Tax owed on a pre-tax amount, rounded half-up to two decimal places.
pub fn tax_on(pre_tax: Decimal, rate_percent: Decimal) -> Decimal {
    (pre_tax * rate_percent / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Net amount plus the tax it attracts.
pub fn gross_up(net: Decimal, rate_percent: Decimal) -> Decimal {
    net + tax_on(net, rate_percent)
}

pub fn settlement_tolerance() -> Decimal {
    *SETTLEMENT_TOLERANCE
}

/// Whether two amounts agree within the settlement tolerance.
pub fn within_tolerance(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() <= settlement_tolerance()
}

/// Renders an amount with two decimal places and thousands grouping.
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let body = format!("{:.2}", rounded);
    let (sign, digits) = match body.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", body.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));
    format!("{}{}.{}", sign, group_digits(int_part, ','), frac_part)
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn tax_is_rounded_half_up() {
        assert_eq!(tax_on(dec!(33.33), dec!(5)), dec!(1.67));
        assert_eq!(tax_on(dec!(100.10), dec!(5)), dec!(5.01));
        assert_eq!(tax_on(dec!(0), dec!(5)), dec!(0));
    }

    #[test]
    fn apply_tax_splits_net_tax_gross() {
        let taxed = apply_tax(dec!(100_000), dec!(5));
        assert_eq!(taxed.net, dec!(100_000));
        assert_eq!(taxed.tax, dec!(5_000));
        assert_eq!(taxed.gross, dec!(105_000));
    }

    #[test]
    fn gross_up_adds_tax() {
        assert_eq!(gross_up(dec!(1_000), dec!(5)), dec!(1_050));
        assert_eq!(gross_up(dec!(1_000), dec!(0)), dec!(1_000));
    }

    #[test]
    fn tolerance_absorbs_sub_cent_drift() {
        assert!(within_tolerance(dec!(999.995), dec!(1000)));
        assert!(within_tolerance(dec!(1000.01), dec!(1000)));
        assert!(!within_tolerance(dec!(1000.02), dec!(1000)));
    }

    #[test]
    fn amounts_render_with_grouping() {
        insta::assert_snapshot!(format_amount(dec!(1234567.891)), @"1,234,567.89");
        insta::assert_snapshot!(format_amount(dec!(-52500)), @"-52,500.00");
        insta::assert_snapshot!(format_amount(dec!(0)), @"0.00");
        insta::assert_snapshot!(format_amount(dec!(999.9)), @"999.90");
    }
}
