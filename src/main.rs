//! candlefuse CLI application.

mod cli;
mod logging;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use logging::setup_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level {
        cli::LogLevel::Trace => "trace",
        cli::LogLevel::Debug => "debug",
        cli::LogLevel::Info => "info",
        cli::LogLevel::Warn => "warn",
        cli::LogLevel::Error => "error",
    };
    setup_logging(log_level, cli.json_logs);

    match cli.command {
        Commands::Import(args) => cli::commands::import::run(args),
        Commands::Aggregate(args) => cli::commands::aggregate::run(args),
        Commands::Analyze(args) => cli::commands::analyze::run(args, &cli.config),
        Commands::Kline(args) => cli::commands::kline::run(args),
    }
}
