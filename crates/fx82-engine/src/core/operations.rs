//! Binary operators of the keypad
//!
//! Operators are a closed enum; string tags from the keypad are validated by
//! [`FromStr`] so an unknown tag fails at the boundary.

use crate::core::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Binary operator awaiting its right operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorKind {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
    /// Power (x^y)
    Power,
}

impl OperatorKind {
    /// All operators in keypad order
    pub const ALL: [Self; 5] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Power,
    ];

    /// Returns the operator symbol shown on the secondary display
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Power => "^",
        }
    }

    /// Returns the keypad tag for this operator
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Add => "plus",
            Self::Subtract => "minus",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Power => "power",
        }
    }

    /// Applies the operator to `lhs` and `rhs`
    ///
    /// Operands are evaluated strictly as given; chaining order is the
    /// caller's business.
    pub fn apply(self, lhs: f64, rhs: f64) -> CalcResult<f64> {
        let result = match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => {
                if rhs == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                lhs / rhs
            }
            Self::Power => lhs.powf(rhs),
        };
        check_finite(result)
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for OperatorKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plus" | "+" => Ok(Self::Add),
            "minus" | "-" => Ok(Self::Subtract),
            "multiply" | "*" | "×" => Ok(Self::Multiply),
            "divide" | "/" | "÷" => Ok(Self::Divide),
            "power" | "xy" | "^" => Ok(Self::Power),
            other => Err(CalcError::UnknownToken(other.to_string())),
        }
    }
}

/// Rejects NaN and infinities
pub(crate) fn check_finite(result: f64) -> CalcResult<f64> {
    if result.is_finite() {
        Ok(result)
    } else {
        Err(CalcError::ResultOutOfRange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // --- OperatorKind tags ---

    #[test]
    fn test_operator_symbols() {
        assert_eq!(OperatorKind::Add.symbol(), "+");
        assert_eq!(OperatorKind::Subtract.symbol(), "-");
        assert_eq!(OperatorKind::Multiply.symbol(), "×");
        assert_eq!(OperatorKind::Divide.symbol(), "÷");
        assert_eq!(OperatorKind::Power.symbol(), "^");
    }

    #[test]
    fn test_operator_display_uses_symbol() {
        assert_eq!(OperatorKind::Multiply.to_string(), "×");
    }

    #[test]
    fn test_operator_from_tag() {
        for op in OperatorKind::ALL {
            assert_eq!(op.tag().parse::<OperatorKind>(), Ok(op));
        }
        assert_eq!("xy".parse::<OperatorKind>(), Ok(OperatorKind::Power));
        assert_eq!("*".parse::<OperatorKind>(), Ok(OperatorKind::Multiply));
    }

    #[test]
    fn test_operator_from_unknown_tag() {
        assert_eq!(
            "modulo".parse::<OperatorKind>(),
            Err(CalcError::UnknownToken("modulo".into()))
        );
    }

    // --- Arithmetic ---

    #[test]
    fn test_add_subtract_multiply() {
        assert_eq!(OperatorKind::Add.apply(2.0, 3.0), Ok(5.0));
        assert_eq!(OperatorKind::Subtract.apply(3.0, 5.0), Ok(-2.0));
        assert_eq!(OperatorKind::Multiply.apply(-2.0, 3.0), Ok(-6.0));
    }

    #[test]
    fn test_add_decimals() {
        let result = OperatorKind::Add.apply(0.1, 0.2).unwrap();
        assert!((result - 0.3).abs() < 1e-10);
    }

    #[test]
    fn test_divide() {
        assert_eq!(OperatorKind::Divide.apply(6.0, 2.0), Ok(3.0));
        assert_eq!(OperatorKind::Divide.apply(0.0, 5.0), Ok(0.0));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(
            OperatorKind::Divide.apply(5.0, 0.0),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(
            OperatorKind::Divide.apply(5.0, -0.0),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn test_power() {
        assert_eq!(OperatorKind::Power.apply(2.0, 10.0), Ok(1024.0));
        assert_eq!(OperatorKind::Power.apply(2.0, -1.0), Ok(0.5));
        assert_eq!(OperatorKind::Power.apply(-2.0, 3.0), Ok(-8.0));
    }

    #[test]
    fn test_power_out_of_range() {
        assert_eq!(
            OperatorKind::Power.apply(10.0, 1000.0),
            Err(CalcError::ResultOutOfRange)
        );
        assert_eq!(
            OperatorKind::Power.apply(0.0, -1.0),
            Err(CalcError::ResultOutOfRange)
        );
        assert_eq!(
            OperatorKind::Power.apply(-8.0, 0.5),
            Err(CalcError::ResultOutOfRange)
        );
    }

    #[test]
    fn test_multiply_overflow() {
        assert_eq!(
            OperatorKind::Multiply.apply(f64::MAX, 2.0),
            Err(CalcError::ResultOutOfRange)
        );
    }

    // --- Property-based tests ---

    proptest! {
        #[test]
        fn prop_add_commutative(a in -1e10f64..1e10f64, b in -1e10f64..1e10f64) {
            prop_assert_eq!(OperatorKind::Add.apply(a, b), OperatorKind::Add.apply(b, a));
        }

        #[test]
        fn prop_multiply_identity(a in -1e10f64..1e10f64) {
            prop_assert_eq!(OperatorKind::Multiply.apply(a, 1.0), Ok(a));
        }

        #[test]
        fn prop_divide_by_self(a in -1e10f64..1e10f64) {
            prop_assume!(a != 0.0);
            let result = OperatorKind::Divide.apply(a, a).unwrap();
            prop_assert!((result - 1.0).abs() < 1e-10);
        }

        #[test]
        fn prop_power_zero_exponent(a in 1.0f64..1e5f64) {
            prop_assert_eq!(OperatorKind::Power.apply(a, 0.0), Ok(1.0));
        }
    }
}
