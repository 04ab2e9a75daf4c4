//! Closed set of engine inputs
//!
//! Keypad buttons arrive as string tags (`plus`, `sqrt`, `open-paren`, ...).
//! They are parsed into a [`Command`] at the boundary; an unknown tag is a
//! [`CalcError::UnknownToken`] instead of a silently ignored click.

use crate::core::{CalcError, FunctionKind, OperatorKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Characters that can be keyed into the current operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigitToken {
    /// 0-9
    Digit(u8),
    /// `.`
    DecimalPoint,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `E`, the EXP key
    Exponent,
}

impl DigitToken {
    /// Returns the digit token for `d`, if `d` is 0-9
    #[must_use]
    pub const fn digit(d: u8) -> Option<Self> {
        if d <= 9 {
            Some(Self::Digit(d))
        } else {
            None
        }
    }

    /// Character appended to the operand
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Digit(d) => char::from(b'0' + d.min(9)),
            Self::DecimalPoint => '.',
            Self::OpenParen => '(',
            Self::CloseParen => ')',
            Self::Exponent => 'E',
        }
    }
}

impl fmt::Display for DigitToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for DigitToken {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "." | "decimal" => Ok(Self::DecimalPoint),
            "(" | "open-paren" => Ok(Self::OpenParen),
            ")" | "close-paren" => Ok(Self::CloseParen),
            "E" | "exp" => Ok(Self::Exponent),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Ok(Self::Digit(c as u8 - b'0')),
                    _ => Err(CalcError::UnknownToken(s.to_string())),
                }
            }
        }
    }
}

/// One engine input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Key a digit, decimal point, parenthesis or exponent marker
    Digit(DigitToken),
    /// Enter a binary operator
    Operator(OperatorKind),
    /// Resolve the pending operator
    Equals,
    /// AC
    Clear,
    /// DEL
    Delete,
    /// Apply a scientific function
    Function(FunctionKind),
    /// SHIFT
    ToggleShift,
    /// DRG: cycle the angle unit
    ToggleAngleUnit,
    /// RCL
    RecallMemory,
    /// STO
    StoreMemory,
    /// ON
    PowerOn,
    /// Show the last history line
    Replay,
    /// ENG: exponential display of the operand
    Engineering,
}

impl FromStr for Command {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let command = match s {
            "equals" | "=" => Self::Equals,
            "clear" | "ac" => Self::Clear,
            "delete" | "del" => Self::Delete,
            "shift" => Self::ToggleShift,
            "deg" | "drg" => Self::ToggleAngleUnit,
            "rcl" => Self::RecallMemory,
            "sto" => Self::StoreMemory,
            "on" => Self::PowerOn,
            "replay" => Self::Replay,
            "eng" => Self::Engineering,
            other => {
                if let Ok(token) = other.parse::<DigitToken>() {
                    Self::Digit(token)
                } else if let Ok(op) = other.parse::<OperatorKind>() {
                    Self::Operator(op)
                } else {
                    Self::Function(other.parse::<FunctionKind>()?)
                }
            }
        };
        Ok(command)
    }
}
