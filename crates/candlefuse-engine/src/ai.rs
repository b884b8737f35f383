//! External advisory inputs.
//!
//! News, chart-pattern, and sentiment assessments arrive from outside
//! the indicator pipeline (an analyst, a model, another service) and
//! join fusion under their own weight keys.

use candlefuse_core::Signal;
use serde::{Deserialize, Serialize};

/// One advisory verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiSignal {
    pub signal: Signal,
    /// Confidence in [0, 100]
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl AiSignal {
    pub fn new(signal: Signal, confidence: f64) -> Self {
        Self {
            signal,
            confidence: confidence.clamp(0.0, 100.0),
            summary: None,
        }
    }
}

/// The advisory inputs offered to one fusion pass. Absent entries do
/// not consume their weight.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news: Option<AiSignal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<AiSignal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<AiSignal>,
}

impl AiContext {
    /// (weight key, signal) pairs for the entries that are present.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &AiSignal)> {
        [
            ("ai_news", self.news.as_ref()),
            ("ai_chart", self.chart.as_ref()),
            ("ai_sentiment", self.sentiment.as_ref()),
        ]
        .into_iter()
        .filter_map(|(key, entry)| entry.map(|s| (key, s)))
    }
}
