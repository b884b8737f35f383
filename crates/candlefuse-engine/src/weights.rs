//! Fusion weight table.

use std::collections::BTreeMap;
use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Per-input weights used by the fusion evaluator.
///
/// Keys match indicator catalogue keys (`rsi`, `macd`, ...) plus the
/// advisory inputs `ai_news`, `ai_chart`, and `ai_sentiment`. Inputs
/// without an entry carry weight zero and are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FusionWeights(BTreeMap<String, f64>);

impl FusionWeights {
    pub fn get(&self, key: &str) -> f64 {
        self.0.get(key).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, key: impl Into<String>, weight: f64) {
        self.0.insert(key.into(), weight);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, w)| (k.as_str(), *w))
    }
}

impl Default for FusionWeights {
    fn default() -> Self {
        let mut table = BTreeMap::new();
        for (key, weight) in [
            ("rsi", 0.15),
            ("macd", 0.15),
            ("bollinger", 0.15),
            ("stochastic", 0.10),
            ("williams_r", 0.05),
            ("cci", 0.05),
            ("mfi", 0.05),
            ("obv", 0.05),
            ("adx", 0.05),
            ("golden_cross", 0.10),
            ("ai_news", 0.20),
            ("ai_chart", 0.15),
            ("ai_sentiment", 0.10),
        ] {
            table.insert(key.to_string(), weight);
        }
        Self(table)
    }
}

/// Weight section of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct WeightsFile {
    #[serde(default)]
    weights: BTreeMap<String, f64>,
}

/// Load the weight table from a TOML file and the environment.
///
/// File entries override the built-in defaults key by key, and
/// `CANDLEFUSE_WEIGHTS__<KEY>` environment variables override both.
pub fn load_weights(path: &Path) -> Result<FusionWeights, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("CANDLEFUSE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let file: WeightsFile = config.try_deserialize()?;
    let mut weights = FusionWeights::default();
    for (key, weight) in file.weights {
        weights.set(key, weight);
    }
    Ok(weights)
}
