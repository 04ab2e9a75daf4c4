//! Subcommand handlers
//!
//! Each handler writes results to `out`; calculator errors that do not stop
//! the run go to the [`Reporter`].

use crate::commands::{ConfigArgs, ConfigFormat, KeysArgs, ReplArgs, StatOp, StatsArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Reporter;
use fx82_engine::clock::{Clock, ManualClock, SystemClock};
use fx82_engine::command::Command;
use fx82_engine::driver::{CalculatorDriver, EngineDriver};
use fx82_engine::engine::CalculatorEngine;
use fx82_engine::keymap::KeyMap;
use fx82_engine::stats::ListStatistics;
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Turns one command-line key into an engine command
fn resolve(key: &str, keyboard: bool) -> CliResult<Command> {
    if keyboard {
        KeyMap::new()
            .resolve(key)
            .ok_or_else(|| CliError::invalid_argument(format!("unbound key '{key}'")))
    } else {
        key.parse::<Command>()
            .map_err(|e| CliError::invalid_argument(e.to_string()))
    }
}

fn press<C: Clock>(
    driver: &mut EngineDriver<C>,
    key: &str,
    keyboard: bool,
    reporter: &Reporter,
) -> CliResult<()> {
    let command = resolve(key, keyboard)?;
    if let Err(error) = driver.send(command) {
        reporter.warning(&error.to_string());
    }
    Ok(())
}

/// `fx82 keys`: presses every key, then prints the display
pub fn run_keys(
    config: &CliConfig,
    args: &KeysArgs,
    reporter: &Reporter,
    out: &mut impl Write,
) -> CliResult<()> {
    let mut driver = EngineDriver::with_clock(config.engine.clone(), ManualClock::new());
    for key in &args.keys {
        press(&mut driver, key, args.keyboard, reporter)?;
        if args.trace {
            writeln!(out, "{key:>12}  {}", reporter.panel(&driver.snapshot()))?;
        }
    }
    if args.settle {
        debug!(pending = driver.pending_effects(), "settling timers");
        driver.settle();
    }
    if !args.trace || args.settle {
        writeln!(out, "{}", reporter.display(&driver.snapshot()))?;
    }
    if args.history {
        for line in driver.engine().history().lines() {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

/// `fx82 repl`: one line of keys per input line
///
/// Lines starting with `:` are session commands (`:history`, `:errors`,
/// `:clear-errors`, `:help`, `:quit`).
pub fn run_repl(
    config: &CliConfig,
    args: &ReplArgs,
    reporter: &Reporter,
    input: impl BufRead,
    out: &mut impl Write,
) -> CliResult<()> {
    let mut driver = EngineDriver::with_clock(config.engine.clone(), SystemClock::new());
    if let Err(error) = driver.send(Command::PowerOn) {
        reporter.warning(&error.to_string());
    }
    writeln!(out, "{}", reporter.panel(&driver.snapshot()))?;

    for line in input.lines() {
        let line = line?;
        driver.tick();
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(meta) = line.strip_prefix(':') {
            match meta {
                "q" | "quit" | "exit" => break,
                "history" => {
                    for entry in driver.engine().history().lines() {
                        writeln!(out, "{entry}")?;
                    }
                }
                "errors" => {
                    let export = driver.engine().error_log().export();
                    if !export.is_empty() {
                        writeln!(out, "{export}")?;
                    }
                }
                "clear-errors" => {
                    driver.engine_mut().error_log_mut().clear();
                    reporter.info("error log cleared");
                }
                "help" => writeln!(out, "{}", repl_help(args.keyboard))?,
                other => reporter.warning(&format!("unknown session command ':{other}'")),
            }
            continue;
        }
        for key in line.split_whitespace() {
            if let Err(error) = press(&mut driver, key, args.keyboard, reporter) {
                reporter.warning(&error.to_string());
            }
        }
        writeln!(out, "{}", reporter.panel(&driver.snapshot()))?;
    }
    info!(
        calculations = driver.engine().history().len(),
        "session ended"
    );
    Ok(())
}

fn repl_help(keyboard: bool) -> &'static str {
    if keyboard {
        "keys: 0-9 . ( ) + - * / ^ Enter Escape Backspace s o t q l\n\
         session: :history :errors :clear-errors :help :quit"
    } else {
        "keys: 0-9 decimal open-paren close-paren exp plus minus multiply divide xy\n\
         \x20     equals clear delete shift deg rcl sto on replay eng\n\
         \x20     sin cos tan sqrt cube ln log 2nd\n\
         session: :history :errors :clear-errors :help :quit"
    }
}

/// `fx82 stats`: list sum or mean, formatted like the display
pub fn run_stats(config: &CliConfig, args: &StatsArgs, out: &mut impl Write) -> CliResult<()> {
    let mut list = ListStatistics::parse(&args.values)?;
    if args.drop_last {
        list.remove_last();
    }
    if let Some(value) = args.remove {
        if !list.remove_value(value) {
            return Err(CliError::invalid_argument(format!(
                "{value} is not in the list"
            )));
        }
    }
    debug!(list = %list.to_csv(), op = ?args.op, "computing statistic");

    let value = match args.op {
        StatOp::Sum => list.sum(),
        StatOp::Mean => list.mean()?,
    };
    let mut engine = CalculatorEngine::with_config(config.engine.clone());
    let step = engine.load_value(value).map_err(|rejection| rejection.error)?;
    writeln!(out, "{}", step.snapshot.display)?;
    Ok(())
}

/// `fx82 config`: prints the effective engine configuration
pub fn run_config(config: &CliConfig, args: &ConfigArgs, out: &mut impl Write) -> CliResult<()> {
    let text = match args.format {
        ConfigFormat::Yaml => serde_yaml_ng::to_string(&config.engine)?,
        ConfigFormat::Json => serde_json::to_string_pretty(&config.engine)?,
    };
    writeln!(out, "{}", text.trim_end())?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use fx82_engine::core::AngleUnit;
    use fx82_engine::config::EngineConfig;

    fn keys_args(keys: &str) -> KeysArgs {
        KeysArgs {
            keys: keys.split_whitespace().map(String::from).collect(),
            keyboard: false,
            settle: false,
            trace: false,
            history: false,
        }
    }

    fn output(f: impl FnOnce(&mut Vec<u8>) -> CliResult<()>) -> CliResult<String> {
        let mut buf = Vec::new();
        f(&mut buf)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    fn quiet() -> Reporter {
        Reporter::new(false, true)
    }

    // ===== keys =====

    #[test]
    fn test_keys_prints_result() {
        let config = CliConfig::new();
        let args = keys_args("2 plus 3 multiply 4 equals");
        let text = output(|out| run_keys(&config, &args, &quiet(), out)).unwrap();
        assert_eq!(text, "20\n");
    }

    #[test]
    fn test_keys_error_then_settle() {
        let config = CliConfig::new();
        let mut args = keys_args("5 divide 0 equals");
        let text = output(|out| run_keys(&config, &args, &quiet(), out)).unwrap();
        assert_eq!(text, "ERROR\n");

        args.settle = true;
        let text = output(|out| run_keys(&config, &args, &quiet(), out)).unwrap();
        assert_eq!(text, "0\n");
    }

    #[test]
    fn test_keys_unknown_tag_fails() {
        let config = CliConfig::new();
        let args = keys_args("2 percent");
        let err = output(|out| run_keys(&config, &args, &quiet(), out)).unwrap_err();
        assert!(err.to_string().contains("percent"));
    }

    #[test]
    fn test_keys_keyboard_mode() {
        let config = CliConfig::new();
        let mut args = keys_args("9 - 4 Enter");
        args.keyboard = true;
        let text = output(|out| run_keys(&config, &args, &quiet(), out)).unwrap();
        assert_eq!(text, "5\n");
    }

    #[test]
    fn test_keys_trace_and_history() {
        let config = CliConfig::new();
        let mut args = keys_args("6 multiply 7 equals");
        args.trace = true;
        args.history = true;
        let text = output(|out| run_keys(&config, &args, &quiet(), out)).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].ends_with("6  (6 ×)  [DEG]"));
        assert!(lines[3].ends_with("42  [DEG]"));
        assert_eq!(lines[4], "6 × 7 = 42");
    }

    #[test]
    fn test_keys_uses_config_angle() {
        let config =
            CliConfig::new().with_engine(EngineConfig::new().with_angle_unit(AngleUnit::Gradians));
        let args = keys_args("1 0 0 sin");
        let text = output(|out| run_keys(&config, &args, &quiet(), out)).unwrap();
        assert_eq!(text, "1\n");
    }

    // ===== repl =====

    #[test]
    fn test_repl_session() {
        let config = CliConfig::new();
        let args = ReplArgs { keyboard: false };
        let input = "2 plus 2 equals\n:history\n:quit\n7\n";
        let text =
            output(|out| run_repl(&config, &args, &quiet(), input.as_bytes(), out)).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "CASIO fx-82MS  [DEG]");
        assert_eq!(lines[1], "4  [DEG]");
        assert_eq!(lines[2], "2 + 2 = 4");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_repl_skips_unknown_keys() {
        let config = CliConfig::new();
        let args = ReplArgs { keyboard: false };
        let input = "3 bogus 4\n:errors\n";
        let text =
            output(|out| run_repl(&config, &args, &quiet(), input.as_bytes(), out)).unwrap();
        assert_eq!(text.lines().nth(1), Some("34  [DEG]"));
    }

    #[test]
    fn test_repl_clear_errors() {
        let config = CliConfig::new();
        let args = ReplArgs { keyboard: false };
        let input = "5 divide 0 equals\n:errors\n:clear-errors\n:errors\n";
        let text =
            output(|out| run_repl(&config, &args, &quiet(), input.as_bytes(), out)).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[1], "ERROR  [DEG]");
        assert!(lines[2].ends_with("Math ERROR: division by zero"));
        assert_eq!(lines.len(), 3);
    }

    // ===== stats =====

    fn stats_args(op: StatOp, values: &str) -> StatsArgs {
        StatsArgs {
            op,
            values: values.to_string(),
            drop_last: false,
            remove: None,
        }
    }

    #[test]
    fn test_stats_sum_and_mean() {
        let config = CliConfig::new();
        let sum = stats_args(StatOp::Sum, "3, 4.5, -2");
        assert_eq!(output(|out| run_stats(&config, &sum, out)).unwrap(), "5.5\n");
        let mean = stats_args(StatOp::Mean, "1, 2, 3, 4");
        assert_eq!(output(|out| run_stats(&config, &mean, out)).unwrap(), "2.5\n");
    }

    #[test]
    fn test_stats_edits() {
        let config = CliConfig::new();
        let mut args = stats_args(StatOp::Sum, "1, 2, 3, 10");
        args.drop_last = true;
        args.remove = Some(2.0);
        assert_eq!(output(|out| run_stats(&config, &args, out)).unwrap(), "4\n");
    }

    #[test]
    fn test_stats_remove_missing_value() {
        let config = CliConfig::new();
        let mut args = stats_args(StatOp::Sum, "1, 2");
        args.remove = Some(7.0);
        assert!(matches!(
            output(|out| run_stats(&config, &args, out)),
            Err(CliError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_stats_invalid_token() {
        let config = CliConfig::new();
        let args = stats_args(StatOp::Mean, "1, x");
        let err = output(|out| run_stats(&config, &args, out)).unwrap_err();
        assert_eq!(err.to_string(), "Syntax ERROR: invalid list entry 'x'");
    }

    #[test]
    fn test_stats_mean_of_emptied_list() {
        let config = CliConfig::new();
        let mut args = stats_args(StatOp::Mean, "5");
        args.drop_last = true;
        let err = output(|out| run_stats(&config, &args, out)).unwrap_err();
        assert_eq!(err.to_string(), "Syntax ERROR: empty input");
    }

    // ===== config =====

    #[test]
    fn test_config_yaml_and_json() {
        let config = CliConfig::new();
        let yaml = output(|out| {
            run_config(&config, &ConfigArgs { format: ConfigFormat::Yaml }, out)
        })
        .unwrap();
        assert!(yaml.contains("angle_unit: degrees"));

        let json = output(|out| {
            run_config(&config, &ConfigArgs { format: ConfigFormat::Json }, out)
        })
        .unwrap();
        let parsed: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, EngineConfig::default());
    }
}
