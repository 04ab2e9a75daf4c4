//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use fx82_engine::core::AngleUnit;
use std::path::PathBuf;

/// fx82: an fx-82 style scientific calculator on the command line
#[derive(Parser, Debug)]
#[command(name = "fx82")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (results only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Engine config file (.yaml, .yml or .json)
    #[arg(long, global = true, env = "FX82_CONFIG")]
    pub config: Option<PathBuf>,

    /// Angle unit at power-up, overriding the config file
    #[arg(long, global = true)]
    pub angle: Option<AngleArg>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Press a sequence of keys and print the display
    Keys(KeysArgs),

    /// Interactive session reading keys from stdin
    Repl(ReplArgs),

    /// Sum or mean of a comma-separated list
    Stats(StatsArgs),

    /// Print the effective engine configuration
    Config(ConfigArgs),
}

/// Arguments for the keys command
#[derive(Parser, Debug)]
pub struct KeysArgs {
    /// Keys to press, e.g. `2 plus 3 equals`
    #[arg(required = true)]
    pub keys: Vec<String>,

    /// Read keys as keyboard names (`+`, `Enter`, `Backspace`)
    #[arg(long)]
    pub keyboard: bool,

    /// Let pending timers expire before printing
    #[arg(long)]
    pub settle: bool,

    /// Print the display after every key
    #[arg(long)]
    pub trace: bool,

    /// Print the calculation history afterwards
    #[arg(long)]
    pub history: bool,
}

/// Arguments for the repl command
#[derive(Parser, Debug)]
pub struct ReplArgs {
    /// Read keys as keyboard names (`+`, `Enter`, `Backspace`)
    #[arg(long)]
    pub keyboard: bool,
}

/// Arguments for the stats command
#[derive(Parser, Debug)]
pub struct StatsArgs {
    /// Statistic to compute
    pub op: StatOp,

    /// Comma-separated values, e.g. "3, 4.5, -2"
    #[arg(allow_hyphen_values = true)]
    pub values: String,

    /// Remove the last value before computing
    #[arg(long)]
    pub drop_last: bool,

    /// Remove the first occurrence of this value before computing
    #[arg(long, allow_negative_numbers = true)]
    pub remove: Option<f64>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Output format
    #[arg(long, default_value = "yaml")]
    pub format: ConfigFormat,
}

/// List statistic
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatOp {
    /// Sum of all values
    Sum,
    /// Arithmetic mean
    Mean,
}

/// Config output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// YAML
    Yaml,
    /// JSON
    Json,
}

/// Color argument for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorArg {
    /// Detect terminal
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Angle unit argument for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AngleArg {
    /// Degrees
    Deg,
    /// Radians
    Rad,
    /// Gradians
    Grad,
}

impl From<AngleArg> for AngleUnit {
    fn from(arg: AngleArg) -> Self {
        match arg {
            AngleArg::Deg => Self::Degrees,
            AngleArg::Rad => Self::Radians,
            AngleArg::Grad => Self::Gradians,
        }
    }
}
