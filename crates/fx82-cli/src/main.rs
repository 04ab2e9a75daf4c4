//! fx82: an fx-82 style scientific calculator on the command line
//!
//! ## Usage
//!
//! ```bash
//! fx82 keys 4 shift sqrt          # 16
//! fx82 keys --trace 1 plus 2 equals
//! fx82 stats sum "1, 2, 3"
//! fx82 repl
//! ```

use clap::Parser;
use fx82_cli::{
    build_config,
    handlers::{run_config, run_keys, run_repl, run_stats},
    Cli, CliResult, Commands, Reporter, Verbosity,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    init_tracing(config.verbosity);

    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::Keys(args) => run_keys(&config, args, &reporter, &mut out),
        Commands::Repl(args) => {
            if config.verbosity.is_verbose() {
                reporter.info("type :help for keys, :quit to leave");
            }
            run_repl(&config, args, &reporter, std::io::stdin().lock(), &mut out)
        }
        Commands::Stats(args) => run_stats(&config, args, &mut out),
        Commands::Config(args) => run_config(&config, args, &mut out),
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the verbosity flags
fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
