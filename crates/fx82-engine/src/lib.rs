//! fx-82 calculator engine
//!
//! A UI-agnostic state machine for a Casio fx-82 style scientific
//! calculator: digit entry, left-to-right chained binary operators, shifted
//! scientific functions, DEG/RAD/GRAD angle modes, one memory register, a
//! bounded history and list statistics.
//!
//! Timers are not run by the engine. A transition that needs a delayed
//! follow-up (error auto-clear, mode indicator expiry, banner expiry) returns
//! a [`ScheduledEffect`](effects::ScheduledEffect); the host starts a timer
//! and later calls [`CalculatorEngine::fire`](engine::CalculatorEngine::fire).
//!
//! # Example
//!
//! ```rust
//! use fx82_engine::prelude::*;
//!
//! let mut engine = CalculatorEngine::new();
//! for tag in ["5", "divide", "0", "equals"] {
//!     let _ = engine.dispatch(tag.parse().unwrap());
//! }
//! assert_eq!(engine.snapshot().display, "ERROR");
//!
//! let mut driver = EngineDriver::new();
//! driver.press_all("4 shift sqrt").unwrap();
//! assert_eq!(driver.display(), "16");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_debug_implementations)]

pub mod clock;
pub mod command;
pub mod config;
pub mod core;
pub mod driver;
pub mod effects;
pub mod engine;
pub mod error_log;
pub mod keymap;
pub mod stats;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::command::{Command, DigitToken};
    pub use crate::config::EngineConfig;
    pub use crate::core::format::{format_result, to_exponential};
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::{AngleUnit, CalcError, CalcResult, FunctionKind, OperatorKind};
    pub use crate::driver::{CalculatorDriver, EngineDriver, HistoryItem, KeyboardDriver};
    pub use crate::effects::{EffectId, EffectKind, EffectQueue, ScheduledEffect};
    pub use crate::engine::{
        CalculatorEngine, CalculatorState, EngineStatus, Rejection, Snapshot, StepResult,
        Transition,
    };
    pub use crate::error_log::{ErrorLog, ErrorLogEntry};
    pub use crate::keymap::KeyMap;
    pub use crate::stats::ListStatistics;
}
