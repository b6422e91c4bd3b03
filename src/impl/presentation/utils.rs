use iso_currency::Currency;
use num_format::{Locale, ToFormattedString as _};

/// Standard number decimal places for the given currency
/// (ex. JPY = 0, MYR = 2).
fn decimal_places(currency: Currency) -> u32 {
    currency.exponent().unwrap_or(0) as u32
}

/// Rounds to the currency's minor unit, returning (is_negative, digits). The
/// sign is dropped when the rounded amount is zero.
fn format_magnitude(amount: f64, currency: Currency) -> (bool, String) {
    let decimal_places = decimal_places(currency);
    let scale = 10_i64.pow(decimal_places);
    let minor_units = (amount.abs() * scale as f64).round() as i64;
    let integer_part = (minor_units / scale).to_formatted_string(&Locale::en);
    let digits = if decimal_places == 0 {
        integer_part
    } else {
        format!(
            "{}.{:0width$}",
            integer_part,
            minor_units % scale,
            width = decimal_places as usize
        )
    };
    (amount < 0.0 && minor_units != 0, digits)
}

/// Format cash amount with currency symbol prefix, correct number of decimal
/// places, and thousands separators (ex. `RM 1,234.50`, `-RM 20.00`).
///
/// For consistency, uses en locale ('.' as decimal mark, i.e. 1,000.00)
/// regardless of user's locale or currency.
pub fn format_amount(amount: f64, currency: Currency) -> String {
    let (negative, digits) = format_magnitude(amount, currency);
    format!(
        "{}{} {}",
        if negative { "-" } else { "" },
        currency.symbol(),
        digits
    )
}

/// Same as [`format_amount`], but negatives are wrapped in parentheses
/// (ex. `(RM 20.00)`).
pub fn format_accounting(amount: f64, currency: Currency) -> String {
    let (negative, digits) = format_magnitude(amount, currency);
    if negative {
        format!("({} {})", currency.symbol(), digits)
    } else {
        format!("{} {}", currency.symbol(), digits)
    }
}

/// Plain number rounded to the currency's decimal places, without symbol or
/// separators (ex. `-1234.50`). Used for machine-readable output.
pub(crate) fn format_plain(amount: f64, currency: Currency) -> String {
    let (negative, digits) = format_magnitude(amount, currency);
    format!(
        "{}{}",
        if negative { "-" } else { "" },
        digits.replace(',', "")
    )
}
