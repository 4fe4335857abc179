//! Locale-aware numeric parsing and formatting for table columns.
//!
//! Parsing is tolerant: it strips group separators, currency symbols, and a
//! trailing percent sign before reading the value. Formatting groups the
//! integer digits and uses the locale's decimal separator.

/// Formatting conventions for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub decimal: char,
    pub group: char,
    pub currency_symbol: &'static str,
    /// Symbol before the amount (`$1,200.00`) or after (`1.200,00 €`).
    pub symbol_first: bool,
}

impl Locale {
    pub fn en_us() -> Self {
        Locale {
            decimal: '.',
            group: ',',
            currency_symbol: "$",
            symbol_first: true,
        }
    }

    pub fn de_de() -> Self {
        Locale {
            decimal: ',',
            group: '.',
            currency_symbol: "€",
            symbol_first: false,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::en_us()
    }
}

/// A number read out of cell text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedNumber {
    pub value: f64,
    /// The source carried a trailing `%`.
    pub percent: bool,
}

const KNOWN_CURRENCY_SYMBOLS: [&str; 4] = ["$", "€", "£", "¥"];

/// Read a number from cell text, tolerating group separators, a currency
/// symbol, a trailing `%`, and surrounding whitespace. `None` when the
/// remainder is not a plain number.
pub fn parse_numeric(text: &str, locale: &Locale) -> Option<ParsedNumber> {
    let mut cleaned = text.trim().to_string();
    if cleaned.is_empty() {
        return None;
    }

    cleaned = cleaned.replace(locale.currency_symbol, "");
    for symbol in KNOWN_CURRENCY_SYMBOLS {
        cleaned = cleaned.replace(symbol, "");
    }

    cleaned = cleaned.trim().to_string();
    let percent = cleaned.ends_with('%');
    if percent {
        cleaned.pop();
    }

    cleaned.retain(|c| c != locale.group && !c.is_whitespace());
    if locale.decimal != '.' {
        cleaned = cleaned.replace(locale.decimal, ".");
    }
    if cleaned.is_empty() {
        return None;
    }

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(|value| ParsedNumber { value, percent })
}

/// Group integer digits in threes with the locale separator; up to two
/// fraction digits, trailing zeros trimmed.
pub fn format_number(value: f64, locale: &Locale) -> String {
    let fixed = format!("{:.2}", value);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let grouped = group_digits(int_part, locale.group);
    if frac_part.is_empty() {
        grouped
    } else {
        format!("{}{}{}", grouped, locale.decimal, frac_part)
    }
}

/// Fixed two fraction digits, symbol placed per locale.
pub fn format_currency(value: f64, locale: &Locale) -> String {
    let fixed = format!("{:.2}", value);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let amount = format!(
        "{}{}{}",
        group_digits(int_part, locale.group),
        locale.decimal,
        frac_part
    );
    if locale.symbol_first {
        format!("{}{}", locale.currency_symbol, amount)
    } else {
        format!("{} {}", amount, locale.currency_symbol)
    }
}

/// Format a fraction (0.035 → `3.5%`).
pub fn format_percent(fraction: f64, locale: &Locale) -> String {
    format!("{}%", format_number(fraction * 100.0, locale))
}

fn group_digits(int_part: &str, group: char) -> String {
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    let count = digits.len();
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (count - index) % 3 == 0 {
            grouped.push(group);
        }
        grouped.push(ch);
    }
    format!("{}{}", sign, grouped)
}
