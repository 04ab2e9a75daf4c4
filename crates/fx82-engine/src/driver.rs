//! Unified calculator driver
//!
//! Keypad tags and keyboard keys are two front ends for the same engine.
//! Behavioral checks are written once against [`CalculatorDriver`] and run
//! through either one.

use crate::clock::{Clock, ManualClock};
use crate::command::Command;
use crate::config::EngineConfig;
use crate::core::{CalcError, CalcResult};
use crate::effects::EffectQueue;
use crate::engine::{CalculatorEngine, Snapshot, StepResult};
use crate::keymap::KeyMap;
use std::time::Duration;
use tracing::trace;

/// Abstract driver trait for calculator interactions
pub trait CalculatorDriver {
    /// Presses one key, identified the way this driver understands keys
    fn press(&mut self, key: &str) -> CalcResult<()>;

    /// Main display line
    fn display(&self) -> String;

    /// Secondary display line
    fn secondary(&self) -> String;

    /// AC
    fn clear(&mut self);

    /// History entries, newest first
    fn history(&self) -> Vec<HistoryItem>;

    /// Fires every outstanding deferred effect, as if enough time passed
    fn settle(&mut self);

    /// Presses whitespace-separated keys in order, stopping at the first error
    fn press_all(&mut self, keys: &str) -> CalcResult<()> {
        keys.split_whitespace().try_for_each(|key| self.press(key))
    }
}

/// A simplified history item for driver results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    /// Expression, e.g. `2 + 3`
    pub expression: String,
    /// Formatted result
    pub result: String,
}

/// Drives an engine with keypad tags (`7`, `plus`, `sqrt`, `equals`)
///
/// Deferred effects go into an [`EffectQueue`] on the driver's clock.
#[derive(Debug)]
pub struct EngineDriver<C: Clock = ManualClock> {
    engine: CalculatorEngine,
    queue: EffectQueue<C>,
}

impl Default for EngineDriver<ManualClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineDriver<ManualClock> {
    /// Creates a driver on a fresh manual clock
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(EngineConfig::default(), ManualClock::new())
    }

    /// Moves the manual clock forward and fires whatever became due
    pub fn advance(&mut self, duration: Duration) {
        self.queue.clock().advance(duration);
        self.tick();
    }
}

impl<C: Clock> EngineDriver<C> {
    /// Creates a driver with `config` whose timers run on `clock`
    pub fn with_clock(config: EngineConfig, clock: C) -> Self {
        Self {
            engine: CalculatorEngine::with_config(config),
            queue: EffectQueue::new(clock),
        }
    }

    #[must_use]
    pub fn engine(&self) -> &CalculatorEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut CalculatorEngine {
        &mut self.engine
    }

    /// Number of timers still waiting
    #[must_use]
    pub fn pending_effects(&self) -> usize {
        self.queue.len()
    }

    /// Sends a command and queues any effect it requests
    pub fn send(&mut self, command: Command) -> CalcResult<()> {
        trace!(?command, "send");
        let step = self.engine.dispatch(command);
        self.absorb(step)
    }

    /// Places an externally computed value on the display
    pub fn load_value(&mut self, value: f64) -> CalcResult<()> {
        let step = self.engine.load_value(value);
        self.absorb(step)
    }

    /// Fires effects that are due on the driver's clock
    pub fn tick(&mut self) {
        for id in self.queue.due() {
            self.engine.fire(id);
        }
    }

    /// Current display contents
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.engine.snapshot()
    }

    fn absorb(&mut self, step: StepResult) -> CalcResult<()> {
        match step {
            Ok(transition) => {
                if let Some(effect) = transition.effect {
                    self.queue.push(effect);
                }
                Ok(())
            }
            Err(rejection) => {
                if let Some(effect) = rejection.effect {
                    self.queue.push(effect);
                }
                Err(rejection.error)
            }
        }
    }
}

impl<C: Clock> CalculatorDriver for EngineDriver<C> {
    fn press(&mut self, key: &str) -> CalcResult<()> {
        let command = key.parse::<Command>()?;
        self.send(command)
    }

    fn display(&self) -> String {
        self.engine.snapshot().display
    }

    fn secondary(&self) -> String {
        self.engine.snapshot().secondary
    }

    fn clear(&mut self) {
        // AC cannot fail
        let _ = self.send(Command::Clear);
    }

    fn history(&self) -> Vec<HistoryItem> {
        self.engine
            .history()
            .iter_rev()
            .map(|entry| HistoryItem {
                expression: entry.expression.clone(),
                result: entry.result.clone(),
            })
            .collect()
    }

    fn settle(&mut self) {
        for id in self.queue.drain_all() {
            self.engine.fire(id);
        }
    }
}

/// Drives an engine with keyboard key names (`7`, `+`, `Enter`, `Escape`)
#[derive(Debug, Default)]
pub struct KeyboardDriver {
    inner: EngineDriver,
    keymap: KeyMap,
}

impl KeyboardDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn engine(&self) -> &CalculatorEngine {
        self.inner.engine()
    }
}

impl CalculatorDriver for KeyboardDriver {
    fn press(&mut self, key: &str) -> CalcResult<()> {
        let command = self
            .keymap
            .resolve(key)
            .ok_or_else(|| CalcError::UnknownToken(key.to_string()))?;
        self.inner.send(command)
    }

    fn display(&self) -> String {
        self.inner.display()
    }

    fn secondary(&self) -> String {
        self.inner.secondary()
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn history(&self) -> Vec<HistoryItem> {
        self.inner.history()
    }

    fn settle(&mut self) {
        self.inner.settle();
    }
}

// ===== Shared suites =====
// Key sequences are given per front end; the expected displays are shared.

/// Keys for one scenario on both front ends
#[derive(Debug, Clone, Copy)]
pub struct Keys {
    /// Keypad tags
    pub keypad: &'static str,
    /// Keyboard key names
    pub keyboard: &'static str,
}

/// Which key vocabulary a driver speaks
pub trait KeyVocabulary {
    /// Picks the sequence for this driver
    fn keys(scenario: Keys) -> &'static str;
}

impl<C: Clock> KeyVocabulary for EngineDriver<C> {
    fn keys(scenario: Keys) -> &'static str {
        scenario.keypad
    }
}

impl KeyVocabulary for KeyboardDriver {
    fn keys(scenario: Keys) -> &'static str {
        scenario.keyboard
    }
}

fn run<D: CalculatorDriver + KeyVocabulary>(driver: &mut D, scenario: Keys) -> CalcResult<()> {
    driver.press_all(D::keys(scenario))
}

/// Verifies the four basic operators
pub fn verify_basic_arithmetic<D: CalculatorDriver + KeyVocabulary>(
    driver: &mut D,
) -> CalcResult<()> {
    let cases = [
        (Keys { keypad: "2 plus 3 equals", keyboard: "2 + 3 Enter" }, "5"),
        (Keys { keypad: "1 0 minus 4 equals", keyboard: "1 0 - 4 Enter" }, "6"),
        (Keys { keypad: "6 multiply 7 equals", keyboard: "6 * 7 Enter" }, "42"),
        (Keys { keypad: "7 divide 2 equals", keyboard: "7 / 2 Enter" }, "3.5"),
    ];
    for (scenario, expected) in cases {
        driver.clear();
        run(driver, scenario)?;
        assert_eq!(driver.display(), expected);
    }
    driver.clear();
    Ok(())
}

/// Verifies that chained operators evaluate left to right
pub fn verify_left_to_right<D: CalculatorDriver + KeyVocabulary>(
    driver: &mut D,
) -> CalcResult<()> {
    driver.clear();
    run(
        driver,
        Keys {
            keypad: "2 plus 3 multiply",
            keyboard: "2 + 3 *",
        },
    )?;
    assert_eq!(driver.display(), "5");
    assert_eq!(driver.secondary(), "5 ×");
    run(
        driver,
        Keys {
            keypad: "4 equals",
            keyboard: "4 Enter",
        },
    )?;
    assert_eq!(driver.display(), "20");
    driver.clear();
    Ok(())
}

/// Verifies division by zero shows ERROR until the reset fires
pub fn verify_error_recovery<D: CalculatorDriver + KeyVocabulary>(
    driver: &mut D,
) -> CalcResult<()> {
    driver.clear();
    let result = run(
        driver,
        Keys {
            keypad: "5 divide 0 equals",
            keyboard: "5 / 0 Enter",
        },
    );
    assert_eq!(result, Err(CalcError::DivisionByZero));
    assert_eq!(driver.display(), "ERROR");
    driver.settle();
    assert_eq!(driver.display(), "0");
    Ok(())
}

/// Verifies a duplicate decimal point is rejected without side effects
pub fn verify_decimal_point<D: CalculatorDriver + KeyVocabulary>(
    driver: &mut D,
) -> CalcResult<()> {
    driver.clear();
    run(driver, Keys { keypad: "1 decimal 5", keyboard: "1 . 5" })?;
    let result = run(driver, Keys { keypad: "decimal", keyboard: "." });
    assert_eq!(result, Err(CalcError::DuplicateDecimalPoint));
    assert_eq!(driver.display(), "1.5");
    driver.clear();
    Ok(())
}

/// Verifies history is newest first and holds `expr = result` pairs
pub fn verify_history<D: CalculatorDriver + KeyVocabulary>(driver: &mut D) -> CalcResult<()> {
    driver.clear();
    run(
        driver,
        Keys {
            keypad: "1 plus 1 equals",
            keyboard: "1 + 1 Enter",
        },
    )?;
    run(
        driver,
        Keys {
            keypad: "3 plus 3 equals",
            keyboard: "3 + 3 Enter",
        },
    )?;
    let history = driver.history();
    assert!(history.len() >= 2);
    assert_eq!(history[0].expression, "3 + 3");
    assert_eq!(history[0].result, "6");
    driver.clear();
    Ok(())
}

/// Complete verification suite
pub fn run_full_suite<D: CalculatorDriver + KeyVocabulary>(
    driver: &mut D,
) -> CalcResult<()> {
    verify_basic_arithmetic(driver)?;
    verify_left_to_right(driver)?;
    verify_error_recovery(driver)?;
    verify_decimal_point(driver)?;
    verify_history(driver)
}
