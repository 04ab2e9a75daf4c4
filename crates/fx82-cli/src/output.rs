//! Terminal output

use console::{style, Term};
use fx82_engine::engine::Snapshot;

/// Writes diagnostics to stderr and styles results for stdout
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(false, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("ℹ").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Main display line, bold when colored
    #[must_use]
    pub fn display(&self, snapshot: &Snapshot) -> String {
        if self.use_color {
            style(&snapshot.display).bold().to_string()
        } else {
            snapshot.display.clone()
        }
    }

    /// One-line rendering of both display lines and the indicators
    #[must_use]
    pub fn panel(&self, snapshot: &Snapshot) -> String {
        let indicators = indicators(snapshot);
        let indicators = if self.use_color {
            style(indicators).dim().to_string()
        } else {
            indicators
        };
        if snapshot.secondary.is_empty() {
            format!("{}  [{indicators}]", self.display(snapshot))
        } else {
            format!(
                "{}  ({})  [{indicators}]",
                self.display(snapshot),
                snapshot.secondary
            )
        }
    }
}

/// Angle unit plus `S` (shift) and `M` (memory) when lit
#[must_use]
pub fn indicators(snapshot: &Snapshot) -> String {
    let mut text = snapshot.angle_unit.label().to_string();
    if snapshot.shift_active {
        text.push_str(" S");
    }
    if snapshot.memory_set {
        text.push_str(" M");
    }
    text
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use fx82_engine::core::AngleUnit;

    fn snapshot(display: &str, secondary: &str) -> Snapshot {
        Snapshot {
            display: display.to_string(),
            secondary: secondary.to_string(),
            angle_unit: AngleUnit::Degrees,
            shift_active: false,
            memory_set: false,
        }
    }

    #[test]
    fn test_indicators() {
        let mut snap = snapshot("0", "");
        assert_eq!(indicators(&snap), "DEG");
        snap.shift_active = true;
        snap.memory_set = true;
        snap.angle_unit = AngleUnit::Gradians;
        assert_eq!(indicators(&snap), "GRAD S M");
    }

    #[test]
    fn test_panel_plain() {
        let reporter = Reporter::new(false, false);
        assert_eq!(reporter.panel(&snapshot("5", "")), "5  [DEG]");
        assert_eq!(reporter.panel(&snapshot("3", "2 +")), "3  (2 +)  [DEG]");
    }

    #[test]
    fn test_display_plain() {
        let reporter = Reporter::default();
        assert_eq!(reporter.display(&snapshot("ERROR", "")), "ERROR");
    }
}
