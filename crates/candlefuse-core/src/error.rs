//! Error types for the analysis engine.

use crate::types::Timeframe;
use thiserror::Error;

/// Errors raised at the data boundary.
///
/// Insufficient indicator history is deliberately *not* represented here:
/// a short window yields an inconclusive [`crate::IndicatorResult`], never
/// an error. An empty aggregation source yields a zero count.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("invalid bar at {timestamp}: {reason}")]
    InvalidBar { timestamp: i64, reason: String },

    #[error("cannot aggregate {from} into {to}: target must be strictly coarser")]
    InvalidAggregation { from: Timeframe, to: Timeframe },

    #[error("invalid timeframe: {0}")]
    InvalidTimeframe(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for data operations.
pub type DataResult<T> = Result<T, DataError>;
