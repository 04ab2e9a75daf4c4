//! Display formatting for computed values
//!
//! The display holds ten significant places. Values outside
//! `1e-7 ..= 9_999_999_999` switch to exponential notation.

/// Text shown in place of a value that cannot be displayed
pub const ERROR_TEXT: &str = "ERROR";

/// Largest magnitude rendered in plain notation
pub const MAX_PLAIN_MAGNITUDE: f64 = 9_999_999_999.0;

/// Smallest non-zero magnitude rendered in plain notation
pub const MIN_PLAIN_MAGNITUDE: f64 = 1e-7;

/// Fractional digits kept in plain notation
pub const MAX_FRACTION_DIGITS: usize = 10;

/// Mantissa digits after the point in exponential notation
pub const EXPONENT_MANTISSA_DIGITS: usize = 8;

/// Formats a computed value for the main display
///
/// ```rust
/// use fx82_engine::core::format::format_result;
///
/// assert_eq!(format_result(4.0), "4");
/// assert_eq!(format_result(0.1 + 0.2), "0.3");
/// assert_eq!(format_result(12_345_678_901.0), "1.23456789e+10");
/// assert_eq!(format_result(f64::NAN), "ERROR");
/// ```
#[must_use]
pub fn format_result(n: f64) -> String {
    if !n.is_finite() {
        return ERROR_TEXT.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if magnitude > MAX_PLAIN_MAGNITUDE || magnitude < MIN_PLAIN_MAGNITUDE {
        return to_exponential(n, EXPONENT_MANTISSA_DIGITS);
    }

    if n.fract() == 0.0 {
        return format!("{n}");
    }

    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, n);
    trim_fraction(&fixed).to_string()
}

/// Renders `n` as `d.ddd…e±x` with `fraction_digits` digits after the point
///
/// The exponent always carries a sign: `1.235e+3`, `5.00000000e-8`.
#[must_use]
pub fn to_exponential(n: f64, fraction_digits: usize) -> String {
    if !n.is_finite() {
        return ERROR_TEXT.to_string();
    }
    let raw = format!("{:.*e}", fraction_digits, n);
    match raw.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => raw,
    }
}

/// Drops trailing zeros and a dangling decimal point
fn trim_fraction(fixed: &str) -> &str {
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed
    }
}
