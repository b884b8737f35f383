//! The fusion evaluator.

use std::collections::BTreeMap;

use candlefuse_core::{FusionResult, IndicatorResult, Signal, SignalDetail};
use chrono::Utc;
use tracing::debug;

use crate::ai::AiContext;
use crate::weights::FusionWeights;

const STRONG_THRESHOLD: f64 = 80.0;
const ACT_THRESHOLD: f64 = 60.0;

/// Fuse indicator results and advisory inputs into one recommendation.
///
/// Each conclusive weighted input adds `weight * confidence / 100` to
/// the side its signal votes for; HOLD inputs consume their weight
/// without scoring. Scores are normalized against the weight actually
/// consumed, so inconclusive (skipped) inputs neither help nor hurt.
pub fn evaluate(
    indicators: &BTreeMap<String, IndicatorResult>,
    ai: &AiContext,
    weights: &FusionWeights,
) -> FusionResult {
    let mut buy_raw = 0.0;
    let mut sell_raw = 0.0;
    let mut total_weight = 0.0;
    let mut details = Vec::new();

    let mut tally = |key: &str, signal: Signal, confidence: f64| {
        let weight = weights.get(key);
        if weight <= 0.0 {
            return;
        }
        // Advisory inputs arrive from unvalidated JSON; clamp here so a
        // wild confidence can never push a normalized score past 100.
        let confidence = confidence.clamp(0.0, 100.0);
        let c = confidence / 100.0;
        if signal.is_buy() {
            buy_raw += weight * c;
        } else if signal.is_sell() {
            sell_raw += weight * c;
        }
        total_weight += weight;
        details.push(SignalDetail {
            indicator: key.to_string(),
            signal,
            confidence,
            weight,
        });
    };

    for (key, result) in indicators {
        if result.is_inconclusive() {
            debug!(indicator = %key, "skipping inconclusive input");
            continue;
        }
        tally(key, result.signal, result.confidence);
    }
    for (key, advisory) in ai.entries() {
        tally(key, advisory.signal, advisory.confidence);
    }

    let (buy_score, sell_score) = if total_weight > 0.0 {
        (
            buy_raw / total_weight * 100.0,
            sell_raw / total_weight * 100.0,
        )
    } else {
        (0.0, 0.0)
    };

    // The fused decision domain is exactly BUY/SELL/HOLD; the strong
    // variants belong to individual indicators. The >= 80 band only
    // strengthens the recommendation wording.
    let (signal, confidence) = if buy_score > sell_score && buy_score > ACT_THRESHOLD {
        (Signal::Buy, buy_score)
    } else if sell_score > buy_score && sell_score > ACT_THRESHOLD {
        (Signal::Sell, sell_score)
    } else {
        (Signal::Hold, buy_score.max(sell_score))
    };

    FusionResult {
        signal,
        confidence,
        buy_score,
        sell_score,
        details,
        recommendation: recommendation(signal, confidence),
        timestamp: Utc::now(),
    }
}

fn recommendation(signal: Signal, confidence: f64) -> String {
    match signal {
        Signal::Buy | Signal::StrongBuy if confidence >= STRONG_THRESHOLD => {
            "Strong buy: multiple indicators agree on upward momentum"
        }
        Signal::Buy | Signal::StrongBuy => "Moderate buy: indicators lean bullish",
        Signal::Sell | Signal::StrongSell if confidence >= STRONG_THRESHOLD => {
            "Strong sell: multiple indicators agree on downward momentum"
        }
        Signal::Sell | Signal::StrongSell => "Moderate sell: indicators lean bearish",
        Signal::Hold => "Hold: wait for a clearer signal",
    }
    .to_string()
}
