//! Calculation history
//!
//! A bounded queue of completed calculations; the oldest entry is evicted
//! once the capacity is reached.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A single completed calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Left operand, operator symbol and right operand, e.g. `2 + 3`
    pub expression: String,
    /// Formatted result
    pub result: String,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
        }
    }

    /// Returns the history line, e.g. `2 + 3 = 5`
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} = {}", self.expression, self.result)
    }
}

/// Bounded calculation history
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    max_entries: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Default maximum history size
    pub const DEFAULT_MAX_ENTRIES: usize = 10;

    /// Creates a new history with default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_MAX_ENTRIES)
    }

    /// Creates a history with custom maximum size (at least one entry)
    #[must_use]
    pub fn with_capacity(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: VecDeque::with_capacity(max_entries),
            max_entries,
        }
    }

    /// Adds an entry, evicting the oldest when full
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Records a completed calculation
    pub fn record(&mut self, expression: &str, result: &str) {
        self.push(HistoryEntry::new(expression, result));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Iterates oldest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Iterates newest first
    pub fn iter_rev(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    /// Returns the most recent entry
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Returns the oldest entry
    #[must_use]
    pub fn first(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Returns the history lines, oldest first
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.iter().map(HistoryEntry::display).collect()
    }

    /// Serializes the history to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries.iter().collect::<Vec<_>>())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn entry(expr: &str, result: &str) -> HistoryEntry {
        HistoryEntry::new(expr, result)
    }

    // ===== HistoryEntry tests =====

    #[test]
    fn test_history_entry_new() {
        let entry = HistoryEntry::new("2 + 2", "4");
        assert_eq!(entry.expression, "2 + 2");
        assert_eq!(entry.result, "4");
    }

    #[test]
    fn test_history_entry_display() {
        assert_eq!(entry("5 × 3", "15").display(), "5 × 3 = 15");
    }

    #[test]
    fn test_history_entry_serialize() {
        let json = serde_json::to_string(&entry("2 ^ 3", "8")).unwrap();
        assert!(json.contains("\"expression\":\"2 ^ 3\""));
        assert!(json.contains("\"result\":\"8\""));
    }

    // ===== History tests =====

    #[test]
    fn test_history_new() {
        let history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.max_entries(), 10);
    }

    #[test]
    fn test_history_with_zero_capacity_keeps_one() {
        let mut history = History::with_capacity(0);
        history.record("1 + 1", "2");
        history.record("2 + 2", "4");
        assert_eq!(history.len(), 1);
        assert_eq!(history.last().unwrap().result, "4");
    }

    #[test]
    fn test_history_eleventh_push_evicts_oldest() {
        let mut history = History::new();
        for i in 0..11 {
            history.record(&format!("{i} + 0"), &i.to_string());
        }
        assert_eq!(history.len(), 10);
        assert_eq!(history.first().unwrap().expression, "1 + 0");
        assert_eq!(history.last().unwrap().expression, "10 + 0");
    }

    #[test]
    fn test_history_iteration_order() {
        let mut history = History::new();
        history.push(entry("a", "1"));
        history.push(entry("b", "2"));
        history.push(entry("c", "3"));

        let forward: Vec<&str> = history.iter().map(|e| e.result.as_str()).collect();
        assert_eq!(forward, vec!["1", "2", "3"]);
        let backward: Vec<&str> = history.iter_rev().map(|e| e.result.as_str()).collect();
        assert_eq!(backward, vec!["3", "2", "1"]);
    }

    #[test]
    fn test_history_larger_capacity_keeps_all() {
        let mut history = History::with_capacity(20);
        for i in 0..15 {
            history.record(&format!("{i} + 0"), &i.to_string());
        }
        assert_eq!(history.len(), 15);
        assert_eq!(history.max_entries(), 20);
        assert_eq!(history.first().unwrap().expression, "0 + 0");
    }

    #[test]
    fn test_history_to_json() {
        let mut history = History::new();
        history.push(entry("x", "10"));
        history.push(entry("y", "20"));

        let json = history.to_json().unwrap();
        assert_eq!(
            json,
            r#"[{"expression":"x","result":"10"},{"expression":"y","result":"20"}]"#
        );
        assert_eq!(History::new().to_json().unwrap(), "[]");
    }
}
