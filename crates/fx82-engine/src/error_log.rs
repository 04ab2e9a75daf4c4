//! Bounded log of user-facing errors
//!
//! Keeps the most recent entries for display and export. The engine appends
//! every rejected input here.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One logged error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLogEntry {
    /// When the error happened
    pub timestamp: DateTime<Utc>,
    /// Error message
    pub message: String,
}

impl ErrorLogEntry {
    /// Export line: `[2026-01-01T00:00:00.000Z] message`
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "[{}] {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.message
        )
    }
}

/// Most recent errors, oldest first
#[derive(Debug, Clone)]
pub struct ErrorLog {
    entries: VecDeque<ErrorLogEntry>,
    capacity: usize,
}

impl Default for ErrorLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorLog {
    /// Default number of retained entries
    pub const DEFAULT_CAPACITY: usize = 50;

    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a log retaining at most `capacity` entries (at least one)
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records `message` stamped with the current time
    pub fn record(&mut self, message: impl Into<String>) {
        self.push(ErrorLogEntry {
            timestamp: Utc::now(),
            message: message.into(),
        });
    }

    /// Appends an entry, evicting the oldest when full
    pub fn push(&mut self, entry: ErrorLogEntry) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
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
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &ErrorLogEntry> {
        self.entries.iter()
    }

    /// Newline-delimited export, oldest first
    #[must_use]
    pub fn export(&self) -> String {
        self.entries
            .iter()
            .map(ErrorLogEntry::display)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Serializes the entries to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry_at(secs: i64, message: &str) -> ErrorLogEntry {
        ErrorLogEntry {
            timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_record() {
        let mut log = ErrorLog::new();
        log.record("Math ERROR: division by zero");
        assert_eq!(log.len(), 1);
        assert_eq!(
            log.iter().next().unwrap().message,
            "Math ERROR: division by zero"
        );
    }

    #[test]
    fn test_keeps_most_recent_fifty() {
        let mut log = ErrorLog::new();
        for i in 0..60 {
            log.record(format!("error {i}"));
        }
        assert_eq!(log.len(), 50);
        assert_eq!(log.iter().next().unwrap().message, "error 10");
        assert_eq!(log.iter().last().unwrap().message, "error 59");
    }

    #[test]
    fn test_export_format() {
        let mut log = ErrorLog::with_capacity(5);
        log.push(entry_at(0, "first"));
        log.push(entry_at(60, "second"));
        assert_eq!(
            log.export(),
            "[1970-01-01T00:00:00.000Z] first\n[1970-01-01T00:01:00.000Z] second"
        );
    }

    #[test]
    fn test_clear() {
        let mut log = ErrorLog::new();
        log.record("x");
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.export(), "");
    }

    #[test]
    fn test_to_json() {
        let mut log = ErrorLog::new();
        log.push(entry_at(0, "boom"));
        let json = log.to_json().unwrap();
        assert!(json.contains("\"message\":\"boom\""));
    }
}
