//! Amount normalization to integer minor units

use crate::app::models::DecimalConvention;
use crate::{Error, Result};

/// Parse locale-formatted amount text into signed cents
///
/// A leading `-` is re-applied at the end, a leading `+` is dropped, every
/// thousands separator is removed and the fraction is cut or padded to two
/// digits (no rounding).
pub fn parse_amount_cents(
    text: &str,
    decimal: DecimalConvention,
    thousands_sep: &str,
) -> Result<i64> {
    let input = text.trim();
    if input.is_empty() {
        return Err(Error::invalid_amount(text, "empty amount"));
    }

    let (negative, unsigned) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };
    let unsigned = unsigned.strip_prefix('+').unwrap_or(unsigned).trim();

    let mut numeral = if thousands_sep.is_empty() {
        unsigned.to_string()
    } else {
        unsigned.replace(thousands_sep, "")
    };
    if decimal == DecimalConvention::Comma {
        numeral = numeral.replace(',', ".");
    }

    let (whole, fraction) = numeral.split_once('.').unwrap_or((numeral.as_str(), ""));
    let whole = if whole.is_empty() { "0" } else { whole };
    let fraction: String = match fraction.chars().count() {
        0 => "00".to_string(),
        1 => format!("{}0", fraction),
        _ => fraction.chars().take(2).collect(),
    };

    let whole_value = parse_digits(whole)
        .ok_or_else(|| Error::invalid_amount(text, format!("invalid whole part: {:?}", whole)))?;
    let fraction_value = parse_digits(&fraction).ok_or_else(|| {
        Error::invalid_amount(text, format!("invalid fractional part: {:?}", fraction))
    })?;

    let cents = whole_value
        .checked_mul(100)
        .and_then(|w| w.checked_add(fraction_value))
        .ok_or_else(|| Error::invalid_amount(text, "amount out of range"))?;

    Ok(if negative { -cents } else { cents })
}

/// Unsigned base-10 integer made only of ASCII digits
fn parse_digits(digits: &str) -> Option<i64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<i64>().ok()
}
