//! Number formatting for axis labels, legends and stat cards

use num_format::{Locale, ToFormattedString};

/// Group the integer part with commas and keep up to three fraction digits,
/// the way `Number.prototype.toLocaleString()` does for en-US.
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return format_plain(value);
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let grouped = match int_part.parse::<u64>() {
        Ok(whole) => whole.to_formatted_string(&Locale::en),
        Err(_) => int_part.to_string(),
    };

    let negative = value < 0.0 && (int_part != "0" || !frac_part.is_empty());
    let mut out = String::with_capacity(grouped.len() + frac_part.len() + 2);
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Print a number without grouping and without a trailing `.0`
pub fn format_plain(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(73_000.0), "73,000");
        assert_eq!(format_thousands(1_234_567.0), "1,234,567");
        assert_eq!(format_thousands(-45_000.0), "-45,000");
    }

    #[test]
    fn keeps_three_fraction_digits() {
        assert_eq!(format_thousands(1234.5), "1,234.5");
        assert_eq!(format_thousands(0.12345), "0.123");
        assert_eq!(format_thousands(-0.0001), "0");
        assert_eq!(format_thousands(1_234_567.25), "1,234,567.25");
        assert_eq!(format_thousands(-9_999.9999), "-10,000");
    }

    #[test]
    fn plain_numbers_drop_trailing_zero() {
        assert_eq!(format_plain(40.0), "40");
        assert_eq!(format_plain(45.5), "45.5");
        assert_eq!(format_plain(-3.0), "-3");
    }
}
