//! Fixed BRL currency formatting.
//!
//! Every money value is presented as `R$ 1.234,56`: two decimal places,
//! dot as the thousands separator, comma as the decimal separator. This
//! is deliberately not locale-aware; the fixed format is part of the
//! output contract.

use rust_decimal::Decimal;

/// Formats a monetary value as fixed-format BRL.
pub fn brl(value: Decimal) -> String {
    let rounded =
        value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let abs = rounded.abs();

    // "1234.56" -> ("1234", "56")
    let text = format!("{abs:.2}");
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac_part}")
}
