/// Monetary helpers.
///
/// All amounts are stored in integer minor units (1 unit = 100 minor units)
/// to avoid floating-point precision issues.

/// Format minor units as a display string with thousands separators
pub fn format_amount(minor: i64) -> String {
    let major = minor / 100;
    let cents = (minor % 100).abs();
    let mut digits = major.abs().to_string();
    let mut grouped = String::new();
    while digits.len() > 3 {
        let split = digits.len() - 3;
        grouped = format!(",{}{}", &digits[split..], grouped);
        digits.truncate(split);
    }
    let sign = if minor < 0 { "-" } else { "" };
    format!("{}{}{}.{:02}", sign, digits, grouped, cents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(10000), "100.00");
        assert_eq!(format_amount(45_000_000_000), "450,000,000.00");
        assert_eq!(format_amount(-150), "-1.50");
    }

    #[test]
    fn test_format_amount_small_values() {
        assert_eq!(format_amount(0), "0.00");
        assert_eq!(format_amount(5), "0.05");
        assert_eq!(format_amount(99_999), "999.99");
    }
}
