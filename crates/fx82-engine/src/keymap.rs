//! Keyboard shortcuts
//!
//! Maps key names as reported by a browser or terminal (`"7"`, `"Enter"`,
//! `"Backspace"`) to engine commands.

use crate::command::{Command, DigitToken};
use crate::core::{FunctionKind, OperatorKind};

/// Keyboard-to-command table
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyMap;

impl KeyMap {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Resolves a key name; unbound keys return `None`
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<Command> {
        let command = match key {
            "+" => Command::Operator(OperatorKind::Add),
            "-" => Command::Operator(OperatorKind::Subtract),
            "*" => Command::Operator(OperatorKind::Multiply),
            "/" => Command::Operator(OperatorKind::Divide),
            "^" => Command::Operator(OperatorKind::Power),
            "Enter" | "=" => Command::Equals,
            "Escape" | "c" | "C" => Command::Clear,
            "Backspace" => Command::Delete,
            "." => Command::Digit(DigitToken::DecimalPoint),
            "(" => Command::Digit(DigitToken::OpenParen),
            ")" => Command::Digit(DigitToken::CloseParen),
            "s" => Command::Function(FunctionKind::Sin),
            "o" => Command::Function(FunctionKind::Cos),
            "t" => Command::Function(FunctionKind::Tan),
            "q" => Command::Function(FunctionKind::Sqrt),
            "l" => Command::Function(FunctionKind::Ln),
            _ => return Self::digit(key),
        };
        Some(command)
    }

    fn digit(key: &str) -> Option<Command> {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c
                .to_digit(10)
                .and_then(|d| DigitToken::digit(d as u8))
                .map(Command::Digit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits() {
        let keys = KeyMap::new();
        for d in 0..=9u8 {
            assert_eq!(
                keys.resolve(&d.to_string()),
                Some(Command::Digit(DigitToken::Digit(d)))
            );
        }
    }

    #[test]
    fn test_operators() {
        let keys = KeyMap::new();
        assert_eq!(keys.resolve("+"), Some(Command::Operator(OperatorKind::Add)));
        assert_eq!(keys.resolve("-"), Some(Command::Operator(OperatorKind::Subtract)));
        assert_eq!(keys.resolve("*"), Some(Command::Operator(OperatorKind::Multiply)));
        assert_eq!(keys.resolve("/"), Some(Command::Operator(OperatorKind::Divide)));
    }

    #[test]
    fn test_actions() {
        let keys = KeyMap::new();
        assert_eq!(keys.resolve("Enter"), Some(Command::Equals));
        assert_eq!(keys.resolve("="), Some(Command::Equals));
        assert_eq!(keys.resolve("Escape"), Some(Command::Clear));
        assert_eq!(keys.resolve("C"), Some(Command::Clear));
        assert_eq!(keys.resolve("Backspace"), Some(Command::Delete));
        assert_eq!(keys.resolve("."), Some(Command::Digit(DigitToken::DecimalPoint)));
    }

    #[test]
    fn test_function_letters() {
        let keys = KeyMap::new();
        assert_eq!(keys.resolve("s"), Some(Command::Function(FunctionKind::Sin)));
        assert_eq!(keys.resolve("o"), Some(Command::Function(FunctionKind::Cos)));
        assert_eq!(keys.resolve("t"), Some(Command::Function(FunctionKind::Tan)));
        assert_eq!(keys.resolve("q"), Some(Command::Function(FunctionKind::Sqrt)));
        assert_eq!(keys.resolve("l"), Some(Command::Function(FunctionKind::Ln)));
    }

    #[test]
    fn test_unbound_keys() {
        let keys = KeyMap::new();
        assert_eq!(keys.resolve("x"), None);
        assert_eq!(keys.resolve("F1"), None);
        assert_eq!(keys.resolve("42"), None);
        assert_eq!(keys.resolve(""), None);
    }
}
