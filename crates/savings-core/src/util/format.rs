//! Display formatting for hours and amounts.
//!
//! Rounding happens here and nowhere else; stored and computed values keep
//! full precision.

/// Format a value with exactly two fraction digits and comma thousands
/// separators. Non-finite values render as `-`.
///
/// # Examples
///
/// ```
/// use savings_core::util::format::format_amount;
///
/// assert_eq!(format_amount(9166.666666), "9,166.67");
/// assert_eq!(format_amount(0.0), "0.00");
/// assert_eq!(format_amount(f64::NAN), "-");
/// ```
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}
