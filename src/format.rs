//! Display formatting shared by the on-screen tables and the export.
//!
//! Currency rounds half away from zero to whole units, margins to one
//! decimal place, caseloads to whole cases.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a currency amount to whole units.
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a margin percentage to one decimal place.
pub fn round_margin(value: Decimal) -> Decimal {
    let rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

/// Format a currency value without cents, with thousands separators.
///
/// ```
/// use aba_proforma::format::format_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(format_currency(Decimal::from_str("1234567.5").unwrap()), "$1,234,568");
/// assert_eq!(format_currency(Decimal::from_str("-950.49").unwrap()), "-$950");
/// ```
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_currency(value);
    let digits = rounded.abs().trunc().to_string();
    let grouped = group_thousands(&digits);

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Format a margin percentage with one decimal place.
pub fn format_margin(value: Decimal) -> String {
    format!("{:.1}%", round_margin(value))
}

/// Format a caseload as a whole number of cases.
pub fn format_cases(value: Decimal) -> String {
    group_thousands(&round_currency(value).trunc().normalize().to_string())
}

/// Whole-unit number (currency, hours) for spreadsheet cells.
pub fn whole_cell(value: Decimal) -> String {
    let rounded = round_currency(value);
    if rounded.is_zero() {
        return "0".to_string();
    }
    rounded.trunc().normalize().to_string()
}

/// Margin as a plain number with one decimal place for spreadsheet cells.
pub fn margin_cell(value: Decimal) -> String {
    format!("{:.1}", round_margin(value))
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    let grouped: String = result.chars().rev().collect();
    format!("{}{}", sign, grouped)
}
