//! Money and date text for tables and messages.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{AtelierError, Result};

/// Group an integer with commas: 1234567 -> "1,234,567"
pub fn format_grouped_int(value: i128) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    let mut grouped: String = out.chars().rev().collect();
    if negative {
        grouped.insert(0, '-');
    }
    grouped
}

/// Two decimals with thousands separators, sign before the symbol:
/// `-₹10,000.00`
pub fn format_money(value: Decimal, currency_symbol: &str) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let cents = (rounded * Decimal::ONE_HUNDRED).trunc().mantissa();
    let whole = cents.abs() / 100;
    let frac = cents.abs() % 100;
    let sign = if cents < 0 { "-" } else { "" };
    format!(
        "{}{}{}.{:02}",
        sign,
        currency_symbol,
        format_grouped_int(whole),
        frac
    )
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AtelierError::InvalidDate(value.to_string()))
}

pub fn parse_amount(field: &'static str, value: &str) -> Result<Decimal> {
    value
        .trim()
        .replace(',', "")
        .parse::<Decimal>()
        .map_err(|_| AtelierError::InvalidChoice {
            what: field,
            value: value.to_string(),
            expected: "a decimal number",
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_grouped_int(0), "0");
        assert_eq!(format_grouped_int(1_250), "1,250");
        assert_eq!(format_grouped_int(-1_234_567), "-1,234,567");
    }

    #[test]
    fn money_keeps_sign_and_cents() {
        assert_eq!(format_money(Decimal::new(3_000_000, 2), "₹"), "₹30,000.00");
        assert_eq!(format_money(Decimal::new(-10_000, 0), "₹"), "-₹10,000.00");
        assert_eq!(format_money(Decimal::new(12_345, 3), "$"), "$12.35");
    }

    #[test]
    fn amounts_accept_separators() {
        assert_eq!(parse_amount("amount", "1,20,000.50").unwrap(), Decimal::new(12_000_050, 2));
        assert!(parse_amount("amount", "lots").is_err());
        assert!(parse_date("2026-13-01").is_err());
    }
}
