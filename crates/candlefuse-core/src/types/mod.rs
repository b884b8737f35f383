//! Core data types for the analysis engine.

mod bar;
mod fusion;
mod signal;
mod timeframe;

pub use bar::{Bar, ImportSummary};
pub use fusion::{FusionResult, SignalDetail};
pub use signal::{
    CrossState, Divergence, FibLevel, IndicatorResult, IndicatorValue, Signal, TrendStrength,
    Volatility,
};
pub use timeframe::Timeframe;
