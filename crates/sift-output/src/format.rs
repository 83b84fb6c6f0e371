//! Cell formatting shared by the console and HTML renderers.

/// Placeholder for values a source could not supply.
pub const MISSING: &str = "-";

/// Dollar amount in compact form: `$2.87T`, `$1.50B`, `$12.30M`.
///
/// Amounts under one million are printed with two decimals.
pub fn compact_currency(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1e12 {
        format!("${:.2}T", value / 1e12)
    } else if magnitude >= 1e9 {
        format!("${:.2}B", value / 1e9)
    } else if magnitude >= 1e6 {
        format!("${:.2}M", value / 1e6)
    } else {
        format!("${:.2}", value)
    }
}

/// Share or unit count in compact form: `12.3M`, `950.0K`.
pub fn compact_count(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if magnitude >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if magnitude >= 1e3 {
        format!("{:.1}K", value / 1e3)
    } else {
        format!("{:.0}", value)
    }
}

/// Percentage with an explicit sign for gains: `+12.50%`, `-3.00%`.
pub fn signed_percent(value: f64) -> String {
    if value > 0.0 {
        format!("+{:.2}%", value)
    } else {
        format!("{:.2}%", value)
    }
}

/// Format `value` with `f`, or the placeholder when absent.
pub fn or_missing(value: Option<f64>, f: impl Fn(f64) -> String) -> String {
    value.map_or_else(|| MISSING.to_string(), f)
}

/// Truncate `text` to `width` characters, marking the cut with `...`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2.87e12, "$2.87T")]
    #[case(1.5e9, "$1.50B")]
    #[case(12_300_000.0, "$12.30M")]
    #[case(950.0, "$950.00")]
    fn test_compact_currency(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(compact_currency(value), expected);
    }

    #[rstest]
    #[case(5_000_000.0, "5.0M")]
    #[case(2_500.0, "2.5K")]
    #[case(42.0, "42")]
    fn test_compact_count(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(compact_count(value), expected);
    }

    #[test]
    fn test_signed_percent() {
        assert_eq!(signed_percent(12.5), "+12.50%");
        assert_eq!(signed_percent(-3.0), "-3.00%");
        assert_eq!(signed_percent(0.0), "0.00%");
    }

    #[test]
    fn test_missing_and_truncate() {
        assert_eq!(or_missing(None, |v| v.to_string()), "-");
        assert_eq!(truncate("Advanced Micro Devices Inc", 12), "Advanced ...");
        assert_eq!(truncate("Apple", 12), "Apple");
    }
}
