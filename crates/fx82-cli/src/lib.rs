//! fx82 CLI library
//!
//! Command-line front end for the `fx82-engine` calculator.
//!
//! ## Usage
//!
//! ```bash
//! fx82 keys 2 plus 3 multiply 4 equals     # 20
//! fx82 keys --keyboard 9 - 4 Enter         # 5
//! fx82 keys 5 divide 0 equals --settle     # 0
//! fx82 stats mean "3, 4.5, -2"             # 1.8333333333
//! fx82 --angle rad repl                    # interactive
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod commands;
mod config;
mod error;
pub mod handlers;
mod output;

pub use commands::{
    AngleArg, Cli, ColorArg, Commands, ConfigArgs, ConfigFormat, KeysArgs, ReplArgs, StatOp,
    StatsArgs,
};
pub use config::{load_engine_config, CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{indicators, Reporter};

/// Builds the effective configuration from flags and the optional config file
pub fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    let mut engine = match &cli.config {
        Some(path) => load_engine_config(path)?,
        None => fx82_engine::config::EngineConfig::default(),
    };
    if let Some(angle) = cli.angle {
        engine.angle_unit = angle.into();
    }

    Ok(CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(cli.color.into())
        .with_engine(engine))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::Parser;
    use fx82_engine::core::AngleUnit;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_build_config_verbosity() {
        let cli = Cli::try_parse_from(["fx82", "-q", "config"]).unwrap();
        assert_eq!(build_config(&cli).unwrap().verbosity, Verbosity::Quiet);
        let cli = Cli::try_parse_from(["fx82", "-v", "config"]).unwrap();
        assert_eq!(build_config(&cli).unwrap().verbosity, Verbosity::Verbose);
        let cli = Cli::try_parse_from(["fx82", "-vvv", "config"]).unwrap();
        assert_eq!(build_config(&cli).unwrap().verbosity, Verbosity::Debug);
    }

    #[test]
    fn test_build_config_angle_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fx82.yml");
        fs::write(&path, "angle_unit: gradians\nhistory_capacity: 4\n").unwrap();
        let path_arg = path.to_str().unwrap();

        let cli = Cli::try_parse_from(["fx82", "--config", path_arg, "config"]).unwrap();
        let config = build_config(&cli).unwrap();
        assert_eq!(config.engine.angle_unit, AngleUnit::Gradians);
        assert_eq!(config.engine.history_capacity, 4);

        let cli =
            Cli::try_parse_from(["fx82", "--config", path_arg, "--angle", "deg", "config"])
                .unwrap();
        let config = build_config(&cli).unwrap();
        assert_eq!(config.engine.angle_unit, AngleUnit::Degrees);
        assert_eq!(config.engine.history_capacity, 4);
    }
}
