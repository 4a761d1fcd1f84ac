/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Half-ULP nudge so exact midpoints round away from zero.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    let grouped = group_thousands(&integer_part.to_string());

    let result = if decimals == 0 {
        grouped
    } else {
        // `frac_str` starts with "0.", e.g. "0.50".
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        format!("{}{}", grouped, &frac_str[1..])
    };

    if negative && rounded != 0.0 {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a raw usage count (tokens, pages, executions) with thousands
/// separators.
///
/// ```
/// use dashboard_core::formatting::format_count;
///
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// assert_eq!(format_count(0), "0");
/// ```
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Format the weighted consumption score: two decimals, thousands separators,
/// never a currency symbol.
///
/// ```
/// use dashboard_core::formatting::format_score;
///
/// assert_eq!(format_score(1234.567), "1,234.57");
/// assert_eq!(format_score(0.03), "0.03");
/// ```
pub fn format_score(value: f64) -> String {
    format_number(value, 2)
}

/// Format a plan multiplier with at least two and at most eight decimals.
///
/// Per-token multipliers are tiny, so trailing zeros are trimmed down to the
/// two-decimal minimum instead of rounding them away.
///
/// ```
/// use dashboard_core::formatting::format_multiplier;
///
/// assert_eq!(format_multiplier(0.000015), "0.000015");
/// assert_eq!(format_multiplier(0.08), "0.08");
/// assert_eq!(format_multiplier(0.0), "0.00");
/// ```
pub fn format_multiplier(value: f64) -> String {
    let full = format_number(value, 8);
    let Some(dot) = full.find('.') else {
        return full;
    };
    let min_len = dot + 3;
    let trimmed = full.trim_end_matches('0');
    if trimmed.len() < min_len {
        full[..min_len].to_string()
    } else {
        trimmed.to_string()
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
