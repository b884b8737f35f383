//! Fused recommendation types.

use super::Signal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-indicator contribution recorded in a fusion result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalDetail {
    /// Indicator key, e.g. `rsi` or `ai_news`
    pub indicator: String,
    pub signal: Signal,
    pub confidence: f64,
    /// Configured weight that this entry consumed
    pub weight: f64,
}

/// The fused trading recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionResult {
    pub signal: Signal,
    /// Confidence in [0, 100]: the winning normalized score
    pub confidence: f64,
    /// Normalized buy score in [0, 100]
    pub buy_score: f64,
    /// Normalized sell score in [0, 100]
    pub sell_score: f64,
    /// Contributions, one per weighted conclusive input
    pub details: Vec<SignalDetail>,
    /// Human-readable recommendation derived from (signal, confidence)
    pub recommendation: String,
    pub timestamp: DateTime<Utc>,
}
