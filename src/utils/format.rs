use crate::types::Currency;
use indexmap::IndexMap;

pub const NOT_AVAILABLE: &str = "N/A";

/// Integer with thousands separators, e.g. `331,002,651`
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Decimal with thousands separators and at most three fraction digits
pub fn format_decimal(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }

    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let sign = if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        "-"
    } else {
        ""
    };

    if frac_part.is_empty() {
        format!("{}{}", sign, group_thousands(int_part))
    } else {
        format!("{}{}.{}", sign, group_thousands(int_part), frac_part)
    }
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

/// Comma-joined list, or `N/A` when there is nothing to show
pub fn format_list<'a, I>(items: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let joined = items.into_iter().collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        joined
    }
}

/// `Name (symbol)` per currency, falling back to the code when there is no symbol
pub fn format_currencies(currencies: &IndexMap<String, Currency>) -> String {
    if currencies.is_empty() {
        return NOT_AVAILABLE.to_string();
    }
    currencies
        .iter()
        .map(|(code, currency)| {
            let symbol = currency
                .symbol
                .as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or(code.as_str());
            format!("{} ({})", currency.name, symbol)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn or_not_available(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(NOT_AVAILABLE)
}
