//! The calculator state machine
//!
//! [`CalculatorEngine`] owns a single [`CalculatorState`] and mutates it in
//! response to [`Command`]s. Chained operators evaluate strictly left to
//! right, as on the physical device: `2 + 3 × 4 =` shows `20`.
//!
//! # Example
//!
//! ```rust
//! use fx82_engine::prelude::*;
//!
//! let mut engine = CalculatorEngine::new();
//! engine.append_digit(DigitToken::Digit(2)).unwrap();
//! engine.apply_operator(OperatorKind::Add).unwrap();
//! engine.append_digit(DigitToken::Digit(3)).unwrap();
//! let step = engine.equals().unwrap();
//! assert_eq!(step.snapshot.display, "5");
//! assert_eq!(engine.history().len(), 1);
//! ```

use crate::command::{Command, DigitToken};
use crate::config::EngineConfig;
use crate::core::format::{format_result, to_exponential, ERROR_TEXT};
use crate::core::history::History;
use crate::core::{parse_operand, AngleUnit, CalcError, FunctionKind, OperatorKind};
use crate::effects::{EffectId, EffectKind, EffectScheduler, ScheduledEffect};
use crate::error_log::ErrorLog;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Text shown by the ON key until the banner expires
pub const POWER_ON_BANNER: &str = "CASIO fx-82MS";

/// Fractional digits of the ENG display
const ENGINEERING_DIGITS: usize = 3;

/// Where the state machine currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineStatus {
    /// Keying digits into the current operand
    Idle,
    /// The next digit starts a new operand
    AwaitingOperand,
    /// Showing `ERROR` until reset
    HasError,
}

/// Mutable calculator state
#[derive(Debug, Clone)]
pub struct CalculatorState {
    current_operand: String,
    pending_operand: Option<String>,
    pending_operator: Option<OperatorKind>,
    awaiting_fresh_operand: bool,
    shift_active: bool,
    angle_unit: AngleUnit,
    history: History,
    memory_value: f64,
    secondary_display: String,
    message: Option<String>,
}

impl CalculatorState {
    fn new(config: &EngineConfig) -> Self {
        Self {
            current_operand: "0".to_string(),
            pending_operand: None,
            pending_operator: None,
            awaiting_fresh_operand: false,
            shift_active: false,
            angle_unit: config.angle_unit,
            history: History::with_capacity(config.history_capacity),
            memory_value: 0.0,
            secondary_display: String::new(),
            message: None,
        }
    }

    /// Operand being keyed or last computed
    #[must_use]
    pub fn current_operand(&self) -> &str {
        &self.current_operand
    }

    /// Left operand waiting for its operator's right operand
    #[must_use]
    pub fn pending_operand(&self) -> Option<&str> {
        self.pending_operand.as_deref()
    }

    #[must_use]
    pub fn pending_operator(&self) -> Option<OperatorKind> {
        self.pending_operator
    }

    #[must_use]
    pub fn awaiting_fresh_operand(&self) -> bool {
        self.awaiting_fresh_operand
    }

    #[must_use]
    pub fn shift_active(&self) -> bool {
        self.shift_active
    }

    #[must_use]
    pub fn angle_unit(&self) -> AngleUnit {
        self.angle_unit
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn memory_value(&self) -> f64 {
        self.memory_value
    }

    #[must_use]
    pub fn secondary_display(&self) -> &str {
        &self.secondary_display
    }

    /// Transient overlay text (banner, replayed history line)
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn has_error(&self) -> bool {
        self.current_operand == ERROR_TEXT
    }

    #[must_use]
    pub fn status(&self) -> EngineStatus {
        if self.has_error() {
            EngineStatus::HasError
        } else if self.awaiting_fresh_operand {
            EngineStatus::AwaitingOperand
        } else {
            EngineStatus::Idle
        }
    }

    fn reset_entry(&mut self) {
        self.current_operand = "0".to_string();
        self.pending_operand = None;
        self.pending_operator = None;
        self.awaiting_fresh_operand = false;
        self.secondary_display.clear();
    }

    fn set_result(&mut self, text: String) {
        self.current_operand = text;
        self.awaiting_fresh_operand = true;
    }
}

/// What the UI renders after a transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Main display line
    pub display: String,
    /// Secondary display line (pending expression or mode indicator)
    pub secondary: String,
    /// Active angle unit
    pub angle_unit: AngleUnit,
    /// SHIFT indicator
    pub shift_active: bool,
    /// M indicator: memory holds a non-zero value
    pub memory_set: bool,
}

/// Successful transition
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// State after the transition
    pub snapshot: Snapshot,
    /// Delayed follow-up the host must schedule
    pub effect: Option<ScheduledEffect>,
}

/// Failed transition
///
/// Computation errors leave `ERROR` on the display and carry an
/// [`EffectKind::ErrorReset`] request; rejected keystrokes change nothing.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{error}")]
pub struct Rejection {
    /// What went wrong
    pub error: CalcError,
    /// State after the failure
    pub snapshot: Snapshot,
    /// Delayed follow-up the host must schedule
    pub effect: Option<ScheduledEffect>,
}

/// Result of one engine input
pub type StepResult = Result<Transition, Rejection>;

/// fx-82 calculator engine
#[derive(Debug)]
pub struct CalculatorEngine {
    state: CalculatorState,
    config: EngineConfig,
    scheduler: EffectScheduler,
    error_log: ErrorLog,
}

impl Default for CalculatorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorEngine {
    /// Creates an engine with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates an engine with custom configuration
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            state: CalculatorState::new(&config),
            error_log: ErrorLog::with_capacity(config.error_log_capacity),
            scheduler: EffectScheduler::new(),
            config,
        }
    }

    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.state.history
    }

    #[must_use]
    pub fn error_log(&self) -> &ErrorLog {
        &self.error_log
    }

    pub fn error_log_mut(&mut self) -> &mut ErrorLog {
        &mut self.error_log
    }

    /// Current display contents
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            display: self
                .state
                .message
                .clone()
                .unwrap_or_else(|| self.state.current_operand.clone()),
            secondary: self.state.secondary_display.clone(),
            angle_unit: self.state.angle_unit,
            shift_active: self.state.shift_active,
            memory_set: self.state.memory_value != 0.0,
        }
    }

    /// Routes a [`Command`] to its operation
    pub fn dispatch(&mut self, command: Command) -> StepResult {
        match command {
            Command::Digit(token) => self.append_digit(token),
            Command::Operator(op) => self.apply_operator(op),
            Command::Equals => self.equals(),
            Command::Clear => self.clear(),
            Command::Delete => self.delete_last_char(),
            Command::Function(function) => self.apply_function(function),
            Command::ToggleShift => self.toggle_shift(),
            Command::ToggleAngleUnit => self.toggle_angle_unit(),
            Command::RecallMemory => self.recall_memory(),
            Command::StoreMemory => self.store_memory(),
            Command::PowerOn => self.power_on(),
            Command::Replay => self.replay(),
            Command::Engineering => self.engineering(),
        }
    }

    /// Keys a digit, decimal point, parenthesis or exponent marker
    pub fn append_digit(&mut self, token: DigitToken) -> StepResult {
        let starts_fresh = self.state.awaiting_fresh_operand || self.state.has_error();
        if !starts_fresh && token == DigitToken::DecimalPoint {
            let operand = &self.state.current_operand;
            if operand.contains('E') {
                return self.fail(CalcError::DecimalPointInExponent);
            }
            if operand.contains('.') {
                return self.fail(CalcError::DuplicateDecimalPoint);
            }
        }

        self.begin_input();
        if self.state.has_error() {
            self.scheduler.cancel(EffectKind::ErrorReset);
        }

        let ch = token.as_char();
        let operand = &mut self.state.current_operand;
        if starts_fresh {
            *operand = match token {
                DigitToken::DecimalPoint => "0.".to_string(),
                DigitToken::Exponent => "0E".to_string(),
                _ => ch.to_string(),
            };
            self.state.awaiting_fresh_operand = false;
        } else if operand == "0" && matches!(token, DigitToken::Digit(0)) {
            // leading zeros are not kept
        } else if operand == "0"
            && matches!(
                token,
                DigitToken::Digit(_) | DigitToken::OpenParen | DigitToken::CloseParen
            )
        {
            *operand = ch.to_string();
        } else {
            operand.push(ch);
        }
        Ok(self.transition(None))
    }

    /// Enters a binary operator, resolving a pending one first
    pub fn apply_operator(&mut self, op: OperatorKind) -> StepResult {
        self.begin_input();
        if let Err(error) = parse_operand(&self.state.current_operand) {
            return self.fail(error);
        }
        if self.state.pending_operator.is_some() && !self.state.awaiting_fresh_operand {
            if let Err(error) = self.resolve_pending() {
                return self.fail(error);
            }
        }

        let left = self.state.current_operand.clone();
        self.state.secondary_display = format!("{left} {}", op.symbol());
        self.state.pending_operand = Some(left);
        self.state.pending_operator = Some(op);
        self.state.awaiting_fresh_operand = true;
        Ok(self.transition(None))
    }

    /// Resolves the pending operator; no-op when none is pending
    pub fn equals(&mut self) -> StepResult {
        self.begin_input();
        match self.resolve_pending() {
            Ok(()) => Ok(self.transition(None)),
            Err(error) => self.fail(error),
        }
    }

    /// Applies a scientific function to the current operand
    ///
    /// SHIFT is consumed whether or not the function succeeds.
    pub fn apply_function(&mut self, function: FunctionKind) -> StepResult {
        self.begin_input();
        let shifted = std::mem::take(&mut self.state.shift_active);
        if let Some(op) = function.delegated_operator() {
            return self.apply_operator(op);
        }

        let x = match parse_operand(&self.state.current_operand) {
            Ok(x) => x,
            Err(error) => return self.fail(error),
        };
        let Some(result) = function.evaluate(x, shifted, self.state.angle_unit) else {
            return Ok(self.transition(None));
        };
        match result {
            Ok(value) => {
                debug!(%function, shifted, x, value, "applied function");
                self.state.set_result(format_result(value));
                Ok(self.transition(None))
            }
            Err(error) => self.fail(error),
        }
    }

    /// Flips the one-shot SHIFT modifier
    pub fn toggle_shift(&mut self) -> StepResult {
        self.begin_input();
        self.state.shift_active = !self.state.shift_active;
        Ok(self.transition(None))
    }

    /// Cycles DEG → RAD → GRAD and flashes the unit on the secondary display
    pub fn toggle_angle_unit(&mut self) -> StepResult {
        self.begin_input();
        self.state.angle_unit = self.state.angle_unit.next();
        self.state.secondary_display = self.state.angle_unit.label().to_string();
        debug!(unit = %self.state.angle_unit, "angle unit changed");
        let effect = self.scheduler.schedule(
            EffectKind::ModeIndicatorExpiry,
            self.config.mode_indicator_delay(),
        );
        Ok(self.transition(Some(effect)))
    }

    /// AC: clears the entry and any pending operator
    ///
    /// Memory, angle unit and history are kept.
    pub fn clear(&mut self) -> StepResult {
        self.begin_input();
        self.scheduler.cancel(EffectKind::ErrorReset);
        self.state.reset_entry();
        Ok(self.transition(None))
    }

    /// DEL: removes the last character of the operand
    pub fn delete_last_char(&mut self) -> StepResult {
        self.begin_input();
        if self.state.has_error() {
            self.scheduler.cancel(EffectKind::ErrorReset);
            self.state.current_operand = "0".to_string();
            return Ok(self.transition(None));
        }
        let operand = &mut self.state.current_operand;
        operand.pop();
        if operand.is_empty() || operand == "-" {
            *operand = "0".to_string();
        }
        Ok(self.transition(None))
    }

    /// RCL: shows the memory value as a fresh operand
    pub fn recall_memory(&mut self) -> StepResult {
        self.begin_input();
        if self.state.has_error() {
            self.scheduler.cancel(EffectKind::ErrorReset);
        }
        let text = format_result(self.state.memory_value);
        self.state.set_result(text);
        Ok(self.transition(None))
    }

    /// STO: stores the current operand in memory
    pub fn store_memory(&mut self) -> StepResult {
        self.begin_input();
        match parse_operand(&self.state.current_operand) {
            Ok(value) => {
                self.state.memory_value = value;
                self.state.awaiting_fresh_operand = true;
                debug!(value, "stored memory");
                Ok(self.transition(None))
            }
            Err(error) => self.fail(error),
        }
    }

    /// ON: clears the entry and shows the model banner
    pub fn power_on(&mut self) -> StepResult {
        self.begin_input();
        self.scheduler.cancel(EffectKind::ErrorReset);
        self.state.reset_entry();
        self.state.message = Some(POWER_ON_BANNER.to_string());
        let effect = self
            .scheduler
            .schedule(EffectKind::BannerExpiry, self.config.banner_delay());
        Ok(self.transition(Some(effect)))
    }

    /// Shows the most recent history line until the next input
    pub fn replay(&mut self) -> StepResult {
        self.begin_input();
        if let Some(entry) = self.state.history.last() {
            self.state.message = Some(entry.display());
        }
        Ok(self.transition(None))
    }

    /// ENG: rewrites the operand in exponential notation
    pub fn engineering(&mut self) -> StepResult {
        self.begin_input();
        match parse_operand(&self.state.current_operand) {
            Ok(value) => {
                self.state.set_result(to_exponential(value, ENGINEERING_DIGITS));
                Ok(self.transition(None))
            }
            Err(error) => self.fail(error),
        }
    }

    /// Places a value computed elsewhere (e.g. list statistics) on the display
    pub fn load_value(&mut self, value: f64) -> StepResult {
        self.begin_input();
        if !value.is_finite() {
            return self.fail(CalcError::ResultOutOfRange);
        }
        if self.state.has_error() {
            self.scheduler.cancel(EffectKind::ErrorReset);
        }
        self.state.set_result(format_result(value));
        Ok(self.transition(None))
    }

    /// Runs a deferred effect
    ///
    /// Returns `None` when `id` is stale: a newer event superseded or
    /// cancelled it, or it already fired.
    pub fn fire(&mut self, id: EffectId) -> Option<Transition> {
        if !self.scheduler.take(id) {
            debug!(?id, "ignored stale effect");
            return None;
        }
        match id.kind {
            EffectKind::ErrorReset => self.state.reset_entry(),
            EffectKind::ModeIndicatorExpiry => {
                if self.state.pending_operator.is_none() {
                    self.state.secondary_display.clear();
                }
            }
            EffectKind::BannerExpiry => self.state.message = None,
        }
        debug!(?id, "fired effect");
        Some(self.transition(None))
    }

    /// Returns true while `kind` has an outstanding request
    #[must_use]
    pub fn is_effect_pending(&self, kind: EffectKind) -> bool {
        self.scheduler.is_pending(kind)
    }

    fn resolve_pending(&mut self) -> Result<(), CalcError> {
        let (Some(lhs_text), Some(op)) = (
            self.state.pending_operand.as_deref(),
            self.state.pending_operator,
        ) else {
            return Ok(());
        };
        let lhs = parse_operand(lhs_text)?;
        let rhs = parse_operand(&self.state.current_operand)?;
        let value = op.apply(lhs, rhs)?;

        let result = format_result(value);
        let expression = format!("{} {} {}", format_result(lhs), op.symbol(), format_result(rhs));
        debug!(%expression, %result, "resolved operator");
        self.state.history.record(&expression, &result);

        self.state.pending_operand = None;
        self.state.pending_operator = None;
        self.state.secondary_display.clear();
        self.state.set_result(result);
        Ok(())
    }

    /// Any new input removes a transient message overlay
    fn begin_input(&mut self) {
        if self.state.message.take().is_some() {
            self.scheduler.cancel(EffectKind::BannerExpiry);
        }
    }

    fn fail(&mut self, error: CalcError) -> StepResult {
        warn!(%error, operand = %self.state.current_operand, "rejected input");
        self.error_log.record(error.to_string());

        if error.is_input_rejection() {
            return Err(Rejection {
                error,
                snapshot: self.snapshot(),
                effect: None,
            });
        }

        self.state.reset_entry();
        self.state.current_operand = ERROR_TEXT.to_string();
        let effect = self
            .scheduler
            .schedule(EffectKind::ErrorReset, self.config.error_reset_delay());
        Err(Rejection {
            error,
            snapshot: self.snapshot(),
            effect: Some(effect),
        })
    }

    fn transition(&self, effect: Option<ScheduledEffect>) -> Transition {
        Transition {
            snapshot: self.snapshot(),
            effect,
        }
    }
}
