//! Currency text formatting

use super::currency::CurrencyCode;
use rust_decimal::{Decimal, RoundingStrategy};

const MIN_FRACTION_DIGITS: u32 = 2;

/// Formats `amount` as currency text for `currency`, e.g. `€1,234.50` or `CHF 12.00`.
///
/// At least two fraction digits are always shown; currencies with a finer
/// minor unit keep their own precision.
pub fn format_currency(amount: Decimal, currency: CurrencyCode) -> String {
    let digits = MIN_FRACTION_DIGITS.max(currency.minor_units());
    let rounded = amount.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);

    let plain = format!("{:.*}", digits as usize, rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), ""));

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let separator = if currency.has_symbol() { "" } else { "\u{a0}" };

    format!(
        "{sign}{}{separator}{}.{frac_part}",
        currency.symbol(),
        group_thousands(int_part)
    )
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
