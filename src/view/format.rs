//! Number Formatting
//!
//! pt-BR number, currency and quantity formatting for dashboard text.
//! Mirrors what `toLocaleString("pt-BR")` produces for the values the
//! panels display.

/// Separator between groups of three integer digits
pub const THOUSANDS_SEPARATOR: char = '.';

/// Separator between the integer and fractional parts
pub const DECIMAL_SEPARATOR: char = ',';

/// Prefix for Brazilian real amounts
pub const CURRENCY_PREFIX: &str = "R$ ";

/// Round half away from zero to `places` fractional digits
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Format a number with between `min_fraction` and `max_fraction` digits after the decimal separator
///
/// Trailing zeros are trimmed until `min_fraction` digits remain.
pub fn format_number(value: f64, min_fraction: usize, max_fraction: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let max_fraction = max_fraction.max(min_fraction);
    let rounded = round_to(value, max_fraction as u32);
    let fixed = format!("{:.*}", max_fraction, rounded.abs());

    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut fraction = frac_part.trim_end_matches('0').to_string();
    while fraction.len() < min_fraction {
        fraction.push('0');
    }

    let mut out = String::with_capacity(fixed.len() + 8);
    if rounded < 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !fraction.is_empty() {
        out.push(DECIMAL_SEPARATOR);
        out.push_str(&fraction);
    }
    out
}

/// Currency with up to three fractional digits, e.g. `R$ 10.000` or `R$ 79,9`
pub fn format_currency(value: f64) -> String {
    format!("{}{}", CURRENCY_PREFIX, format_number(value, 0, 3))
}

/// Currency with at least two fractional digits, e.g. `R$ 8.000,00`
pub fn format_currency_cents(value: f64) -> String {
    format!("{}{}", CURRENCY_PREFIX, format_number(value, 2, 3))
}

/// Plain quantity, e.g. `12.500`
pub fn format_quantity(value: f64) -> String {
    format_number(value, 0, 3)
}

/// Item count, e.g. `3 itens`
pub fn format_count(count: u64) -> String {
    format!("{} itens", count)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(ch);
    }
    out
}
