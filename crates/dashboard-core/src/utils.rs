//! Display formatting helpers

use chrono::{DateTime, Utc};

const NOT_AVAILABLE: &str = "N/A";

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Format an amount as US dollars with thousands separators and two decimals
#[must_use]
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${}.{fraction}", group_thousands(whole))
}

/// Currency for an optional amount
#[must_use]
pub fn format_optional_currency(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), format_currency)
}

/// Abbreviate with T/B/M/K suffixes and two decimals
#[must_use]
pub fn format_large_number(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let magnitude = value.abs();
    if magnitude >= 1e12 {
        format!("{:.2}T", value / 1e12)
    } else if magnitude >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if magnitude >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if magnitude >= 1e3 {
        format!("{:.2}K", value / 1e3)
    } else {
        value.to_string()
    }
}

/// Large number prefixed with a dollar sign, `N/A` when missing
#[must_use]
pub fn format_large_currency(value: Option<f64>) -> String {
    value.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |v| format!("${}", format_large_number(v)),
    )
}

/// Supply figures: missing or zero renders `N/A`
#[must_use]
pub fn format_supply(value: Option<f64>) -> String {
    match value {
        Some(v) if v.abs() > f64::EPSILON => format_large_number(v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// 24h change: `+1.23%`, `-0.50%`, `N/A`
#[must_use]
pub fn format_percent_change(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => {
            let sign = if v > 0.0 { "+" } else { "" };
            format!("{sign}{v:.2}%")
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// `YYYY-MM-DD HH:MM:SS UTC`
#[must_use]
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// `YYYY-MM-DD`
#[must_use]
pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Shorten an opaque id for table display
#[must_use]
pub fn truncate_id(id: &str, max_chars: usize) -> String {
    if id.chars().count() <= max_chars {
        id.to_string()
    } else {
        let head: String = id.chars().take(max_chars).collect();
        format!("{head}...")
    }
}

/// Upper-case the first character
#[must_use]
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::unreadable_literal)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, "$0.00")]
    #[case(1.0, "$1.00")]
    #[case(999.999, "$1,000.00")]
    #[case(1234.567, "$1,234.57")]
    #[case(64123.5, "$64,123.50")]
    #[case(1234567890.1, "$1,234,567,890.10")]
    #[case(-42.5, "-$42.50")]
    #[case(0.00001234, "$0.00")]
    #[case(-0.001, "$0.00")]
    fn test_format_currency(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_currency(value), expected);
    }

    #[test]
    fn test_format_currency_non_finite() {
        assert_eq!(format_currency(f64::NAN), "N/A");
        assert_eq!(format_optional_currency(None), "N/A");
        assert_eq!(format_optional_currency(Some(2.0)), "$2.00");
    }

    #[rstest]
    #[case(1_260_000_000_000.0, "1.26T")]
    #[case(32_500_000_000.0, "32.50B")]
    #[case(21_000_000.0, "21.00M")]
    #[case(1_500.0, "1.50K")]
    #[case(999.0, "999")]
    #[case(12.5, "12.5")]
    fn test_format_large_number(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_large_number(value), expected);
    }

    #[test]
    fn test_format_large_currency() {
        assert_eq!(format_large_currency(Some(1_260_000_000_000.0)), "$1.26T");
        assert_eq!(format_large_currency(None), "N/A");
    }

    #[rstest]
    #[case(Some(21_000_000.0), "21.00M")]
    #[case(Some(0.0), "N/A")]
    #[case(None, "N/A")]
    fn test_format_supply(#[case] value: Option<f64>, #[case] expected: &str) {
        assert_eq!(format_supply(value), expected);
    }

    #[rstest]
    #[case(Some(2.346), "+2.35%")]
    #[case(Some(-1.5), "-1.50%")]
    #[case(Some(0.0), "0.00%")]
    #[case(None, "N/A")]
    fn test_format_percent_change(#[case] value: Option<f64>, #[case] expected: &str) {
        assert_eq!(format_percent_change(value), expected);
    }

    #[test]
    fn test_format_timestamps() {
        let at = Utc.with_ymd_and_hms(2024, 3, 15, 14, 25, 30).unwrap();
        assert_eq!(format_timestamp(&at), "2024-03-15 14:25:30 UTC");
        assert_eq!(format_date(&at), "2024-03-15");
    }

    #[rstest]
    #[case("abc123", "abc123")]
    #[case("65f1c0de9a1b2c3d4e5f6a7b", "65f1c0de...")]
    #[case("ééééééééé", "éééééééé...")]
    fn test_truncate_id(#[case] id: &str, #[case] expected: &str) {
        assert_eq!(truncate_id(id, 8), expected);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("pending"), "Pending");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("éclair"), "Éclair");
    }

    proptest! {
        #[test]
        fn prop_currency_round_trips_to_cents(cents in 0u64..10_000_000_000) {
            #[allow(clippy::cast_precision_loss)]
            let value = cents as f64 / 100.0;
            let formatted = format_currency(value);
            let digits: String = formatted.chars().filter(char::is_ascii_digit).collect();
            prop_assert_eq!(digits.parse::<u64>().unwrap(), cents);
        }
    }
}
