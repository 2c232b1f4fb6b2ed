/// Compact currency label used by chart legends and center totals.
///
/// `1_250_000 -> "$1.3M"`, `350_000 -> "$350K"`, `999 -> "$999"`.
#[must_use]
pub fn format_currency_compact(value: f64) -> String {
    if !value.is_finite() {
        return "$0".to_owned();
    }
    if value >= 1_000_000.0 {
        format!("${:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("${:.0}K", value / 1_000.0)
    } else {
        format!("${}", super::format_number(value))
    }
}

/// Whole-number percentage label for a `0..=1` ratio.
#[must_use]
pub fn format_percent(ratio: f64) -> String {
    if !ratio.is_finite() {
        return "0%".to_owned();
    }
    format!("{:.0}%", ratio * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_thresholds() {
        assert_eq!(format_currency_compact(2_460_000.0), "$2.5M");
        assert_eq!(format_currency_compact(350_000.0), "$350K");
        assert_eq!(format_currency_compact(999.0), "$999");
        assert_eq!(format_currency_compact(f64::INFINITY), "$0");
    }

    #[test]
    fn percent_rounds_to_whole_numbers() {
        assert_eq!(format_percent(0.456), "46%");
        assert_eq!(format_percent(f64::NAN), "0%");
    }
}
