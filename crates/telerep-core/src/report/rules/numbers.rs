//! Numeric coercion for French-formatted report values.

/// Thousands separators found in French reports (space, no-break spaces).
const GROUP_SEPARATORS: [char; 3] = [' ', '\u{00a0}', '\u{202f}'];

/// Parse a non-negative integer cell such as `"594"` or `"1 234"`.
pub fn parse_count(s: &str) -> Option<u64> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| !GROUP_SEPARATORS.contains(c))
        .collect();

    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    cleaned.parse().ok()
}

/// Parse a French-formatted decimal (e.g., `"12,3"`, `"1 234,56"` or `"95,4 %"`).
///
/// Negative and non-finite values are rejected.
pub fn parse_french_decimal(s: &str) -> Option<f64> {
    let cleaned: String = s
        .trim()
        .trim_end_matches('%')
        .chars()
        .filter(|c| !GROUP_SEPARATORS.contains(c))
        .collect();

    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.') {
        return None;
    }

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(_), None) => cleaned.replace(',', "."),
        // Both present: the last one is the decimal separator
        (Some(c), Some(d)) if c > d => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        _ => cleaned,
    };

    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a number French style: no decimals, space as thousands separator.
pub fn format_number_french(number: f64) -> String {
    let rounded = format!("{:.0}", number.abs());
    let chars: Vec<char> = rounded.chars().collect();
    let mut formatted = String::new();

    if number < 0.0 && rounded != "0" {
        formatted.push('-');
    }
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(' ');
        }
        formatted.push(*c);
    }

    formatted
}
