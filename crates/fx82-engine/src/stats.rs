//! List statistics over comma-separated values
//!
//! Backs the LIST panel: the user types `3, 4.5, -2`, then asks for the sum or
//! mean, or edits the list. Results go back into the engine with
//! [`CalculatorEngine::load_value`](crate::engine::CalculatorEngine::load_value).

use crate::core::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Numbers entered in the list panel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListStatistics {
    values: Vec<f64>,
}

impl ListStatistics {
    /// Creates an empty list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a comma-separated list
    ///
    /// Fails with [`CalcError::EmptyInput`] when the input is blank and with
    /// [`CalcError::InvalidListToken`] on the first entry that is not a finite
    /// number (including empty entries such as `1,,2`).
    pub fn parse(input: &str) -> CalcResult<Self> {
        if input.trim().is_empty() {
            return Err(CalcError::EmptyInput);
        }
        let values = input
            .split(',')
            .map(|token| parse_token(token.trim()))
            .collect::<CalcResult<Vec<_>>>()?;
        Ok(Self { values })
    }

    /// Appends one value
    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    /// Sum of all values (0 for an empty list)
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Arithmetic mean
    pub fn mean(&self) -> CalcResult<f64> {
        if self.values.is_empty() {
            return Err(CalcError::EmptyInput);
        }
        Ok(self.sum() / self.values.len() as f64)
    }

    /// Removes and returns the last value
    pub fn remove_last(&mut self) -> Option<f64> {
        self.values.pop()
    }

    /// Removes the first value equal to `value`
    ///
    /// Returns whether anything was removed.
    pub fn remove_value(&mut self, value: f64) -> bool {
        match self.values.iter().position(|v| *v == value) {
            Some(index) => {
                self.values.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Renders the list back as `a, b, c`
    #[must_use]
    pub fn to_csv(&self) -> String {
        self.values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for ListStatistics {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_token(token: &str) -> CalcResult<f64> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CalcError::InvalidListToken(token.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_sum() {
        let list = ListStatistics::parse("1, 2, 3.5").unwrap();
        assert_eq!(list.values(), &[1.0, 2.0, 3.5]);
        assert_eq!(list.sum(), 6.5);
    }

    #[test]
    fn test_parse_tolerates_whitespace() {
        let list: ListStatistics = " 4 ,-2,  10 ".parse().unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.sum(), 12.0);
    }

    #[test]
    fn test_parse_blank_is_empty_input() {
        assert_eq!(ListStatistics::parse(""), Err(CalcError::EmptyInput));
        assert_eq!(ListStatistics::parse("   "), Err(CalcError::EmptyInput));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert_eq!(
            ListStatistics::parse("1, two, 3"),
            Err(CalcError::InvalidListToken("two".into()))
        );
    }

    #[test]
    fn test_parse_rejects_empty_entry() {
        assert_eq!(
            ListStatistics::parse("1,,2"),
            Err(CalcError::InvalidListToken(String::new()))
        );
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        assert!(matches!(
            ListStatistics::parse("1, inf"),
            Err(CalcError::InvalidListToken(_))
        ));
        assert!(matches!(
            ListStatistics::parse("NaN"),
            Err(CalcError::InvalidListToken(_))
        ));
    }

    #[test]
    fn test_mean() {
        let list = ListStatistics::parse("2, 4, 9").unwrap();
        assert_eq!(list.mean(), Ok(5.0));
        assert_eq!(ListStatistics::new().mean(), Err(CalcError::EmptyInput));
    }

    #[test]
    fn test_remove_last() {
        let mut list = ListStatistics::parse("1, 2").unwrap();
        assert_eq!(list.remove_last(), Some(2.0));
        assert_eq!(list.remove_last(), Some(1.0));
        assert_eq!(list.remove_last(), None);
    }

    #[test]
    fn test_remove_value_first_occurrence() {
        let mut list = ListStatistics::parse("5, 3, 5").unwrap();
        assert!(list.remove_value(5.0));
        assert_eq!(list.values(), &[3.0, 5.0]);
        assert!(!list.remove_value(42.0));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_clear_and_push() {
        let mut list = ListStatistics::parse("1, 2, 3").unwrap();
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.sum(), 0.0);
        list.push(7.0);
        assert_eq!(list.mean(), Ok(7.0));
    }

    #[test]
    fn test_to_csv() {
        let list = ListStatistics::parse("1,2.5,-3").unwrap();
        assert_eq!(list.to_csv(), "1, 2.5, -3");
    }
}
