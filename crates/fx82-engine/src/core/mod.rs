//! Core calculator types: errors, operators, functions, formatting, history
//!
//! Every failure the engine can report is a [`CalcError`] variant, so callers
//! match on a closed set instead of inspecting message strings.

pub mod format;
pub mod functions;
pub mod history;
mod operations;

pub use functions::{AngleUnit, FunctionKind};
pub use operations::OperatorKind;

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error kinds
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Right operand of a division was exactly zero
    #[error("Math ERROR: division by zero")]
    DivisionByZero,

    /// Arithmetic or function result was not finite
    #[error("Math ERROR: result out of range")]
    ResultOutOfRange,

    /// Square or cube root of a negative operand
    #[error("Math ERROR: negative radicand")]
    NegativeRadicand,

    /// Logarithm of zero or a negative operand
    #[error("Math ERROR: logarithm argument must be positive")]
    NonPositiveLogArgument,

    /// Second decimal point in the same operand
    #[error("Syntax ERROR: operand already has a decimal point")]
    DuplicateDecimalPoint,

    /// Decimal point typed after the exponent marker
    #[error("Syntax ERROR: exponent must be a whole number")]
    DecimalPointInExponent,

    /// Non-numeric entry in a comma-separated list
    #[error("Syntax ERROR: invalid list entry '{0}'")]
    InvalidListToken(String),

    /// Nothing to operate on
    #[error("Syntax ERROR: empty input")]
    EmptyInput,

    /// Operand text that does not start with a number
    #[error("Math ERROR: cannot read operand '{0}'")]
    InvalidOperand(String),

    /// String tag that names no known key, operator or function
    #[error("Unknown key: '{0}'")]
    UnknownToken(String),
}

impl CalcError {
    /// Returns true for errors that reject a keystroke without touching state.
    ///
    /// Everything else is a computation error: the display switches to
    /// `ERROR` and a reset is scheduled.
    #[must_use]
    pub const fn is_input_rejection(&self) -> bool {
        matches!(
            self,
            Self::DuplicateDecimalPoint | Self::DecimalPointInExponent | Self::UnknownToken(_)
        )
    }
}

/// Parses operand text the way a browser's `parseFloat` does.
///
/// Leading whitespace is skipped and the longest numeric prefix wins, so
/// `"12("` reads as 12 and `"1E"` as 1. Overflowing input such as `"1E400"`
/// is [`CalcError::ResultOutOfRange`].
pub fn parse_operand(text: &str) -> CalcResult<f64> {
    let trimmed = text.trim_start();
    let prefix_len = numeric_prefix_len(trimmed);
    let value = trimmed[..prefix_len]
        .parse::<f64>()
        .map_err(|_| CalcError::InvalidOperand(text.to_string()))?;
    operations::check_finite(value)
}

/// Length of the longest prefix shaped like `[+-]digits[.digits][e[+-]digits]`.
fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        mantissa_digits += j - frac_start;
        if mantissa_digits > 0 {
            i = j;
        }
    }
    if mantissa_digits == 0 {
        return 0;
    }
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    i
}
