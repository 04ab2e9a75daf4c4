//! Engine configuration
//!
//! Every field has a default, so a config file only lists what it changes.

use crate::core::history::History;
use crate::core::AngleUnit;
use crate::error_log::ErrorLog;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for a [`CalculatorEngine`](crate::engine::CalculatorEngine)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Completed calculations kept in history
    pub history_capacity: usize,
    /// Errors kept in the error log
    pub error_log_capacity: usize,
    /// Delay before `ERROR` clears itself
    pub error_reset_delay_ms: u64,
    /// How long the angle-unit indicator stays visible
    pub mode_indicator_delay_ms: u64,
    /// How long the power-on banner stays visible
    pub banner_delay_ms: u64,
    /// Angle unit at power-up
    pub angle_unit: AngleUnit,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_capacity: History::DEFAULT_MAX_ENTRIES,
            error_log_capacity: ErrorLog::DEFAULT_CAPACITY,
            error_reset_delay_ms: 2000,
            mode_indicator_delay_ms: 1500,
            banner_delay_ms: 2000,
            angle_unit: AngleUnit::Degrees,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the history capacity
    #[must_use]
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Set the error auto-clear delay
    #[must_use]
    pub const fn with_error_reset_delay_ms(mut self, ms: u64) -> Self {
        self.error_reset_delay_ms = ms;
        self
    }

    /// Set the angle unit at power-up
    #[must_use]
    pub const fn with_angle_unit(mut self, unit: AngleUnit) -> Self {
        self.angle_unit = unit;
        self
    }

    #[must_use]
    pub const fn error_reset_delay(&self) -> Duration {
        Duration::from_millis(self.error_reset_delay_ms)
    }

    #[must_use]
    pub const fn mode_indicator_delay(&self) -> Duration {
        Duration::from_millis(self.mode_indicator_delay_ms)
    }

    #[must_use]
    pub const fn banner_delay(&self) -> Duration {
        Duration::from_millis(self.banner_delay_ms)
    }
}
