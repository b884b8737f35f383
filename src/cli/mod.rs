//! CLI definitions.

pub mod commands;

use candlefuse_core::Timeframe;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "candlefuse")]
#[command(author, version, about = "Multi-timeframe OHLC analysis and signal fusion")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import bars from a tab-separated history export
    Import(ImportArgs),
    /// Rebuild a coarser timeframe from imported bars
    Aggregate(AggregateArgs),
    /// Compute the indicator catalogue and fuse a recommendation
    Analyze(AnalyzeArgs),
    /// Print the most recent bars
    Kline(KlineArgs),
}

#[derive(clap::Args)]
pub struct ImportArgs {
    /// History file (tab-separated, MetaTrader export headers)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Timeframe of the imported bars
    #[arg(short, long, default_value = "D1")]
    pub timeframe: Timeframe,

    /// Keep only the most recent N rows
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(clap::Args)]
pub struct AggregateArgs {
    /// History file holding the source bars
    #[arg(short, long)]
    pub data: PathBuf,

    /// Timeframe of the imported bars
    #[arg(short, long, default_value = "D1")]
    pub timeframe: Timeframe,

    /// Coarser timeframe to rebuild
    #[arg(short = 'T', long)]
    pub target: Timeframe,
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// History file holding the bars to analyze
    #[arg(short, long)]
    pub data: PathBuf,

    /// Timeframe of the imported bars
    #[arg(short, long, default_value = "D1")]
    pub timeframe: Timeframe,

    /// Aggregate to this timeframe before analysis
    #[arg(short = 'T', long)]
    pub target: Option<Timeframe>,

    /// Number of most recent bars fed to the indicators
    #[arg(short, long, default_value = "250")]
    pub window: usize,

    /// JSON file with advisory signals (news/chart/sentiment)
    #[arg(long)]
    pub ai: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub output: String,
}

#[derive(clap::Args)]
pub struct KlineArgs {
    /// History file holding the bars
    #[arg(short, long)]
    pub data: PathBuf,

    /// Timeframe of the imported bars
    #[arg(short, long, default_value = "D1")]
    pub timeframe: Timeframe,

    /// Number of bars to print
    #[arg(short = 'n', long, default_value = "100")]
    pub limit: usize,

    /// Newest first
    #[arg(long)]
    pub reverse: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub output: String,
}
