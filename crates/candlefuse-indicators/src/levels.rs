//! Reference-level indicators: Fibonacci retracement, pivot points, and
//! the support/resistance scan. These report price levels rather than
//! standalone directional signals, so they always HOLD at confidence 50.

use crate::series::{highs, lows, max_of, min_of};
use candlefuse_core::{Bar, FibLevel, IndicatorResult, IndicatorValue, Signal};

const FIB_MIN_BARS: usize = 20;
const FIB_RATIOS: [f64; 7] = [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];

/// Fibonacci retracement levels between the window extremes.
pub fn fibonacci(bars: &[Bar]) -> IndicatorResult {
    const NAME: &str = "fibonacci";
    if bars.len() < FIB_MIN_BARS {
        return IndicatorResult::inconclusive(NAME);
    }

    let high = max_of(&highs(bars));
    let low = min_of(&lows(bars));
    let range = high - low;
    let levels = FIB_RATIOS
        .iter()
        .map(|ratio| FibLevel {
            ratio: *ratio,
            price: high - range * ratio,
        })
        .collect();

    IndicatorResult::new(
        NAME,
        IndicatorValue::Fibonacci { high, low, levels },
        Signal::Hold,
        50.0,
    )
}

/// Classic floor-trader pivot points from the last completed bar.
pub fn pivot_points(bars: &[Bar]) -> IndicatorResult {
    const NAME: &str = "pivot_points";
    if bars.len() < 2 {
        return IndicatorResult::inconclusive(NAME);
    }

    // The bar before the current one is the last completed period.
    let prev = &bars[bars.len() - 2];
    let pivot = (prev.high + prev.low + prev.close) / 3.0;
    let range = prev.high - prev.low;

    IndicatorResult::new(
        NAME,
        IndicatorValue::Pivots {
            pivot,
            r1: 2.0 * pivot - prev.low,
            r2: pivot + range,
            r3: prev.high + 2.0 * (pivot - prev.low),
            s1: 2.0 * pivot - prev.high,
            s2: pivot - range,
            s3: prev.low - 2.0 * (prev.high - pivot),
        },
        Signal::Hold,
        50.0,
    )
}

const SR_MIN_BARS: usize = 20;
const SR_FLANK: usize = 2;
const SR_MAX_LEVELS: usize = 5;

/// Swing-point support/resistance scan.
///
/// A swing high is a high above the highs of the two bars on each side
/// (mirrored for swing lows). Levels are split around the current close:
/// the nearest supports below it and resistances above it.
pub fn support_resistance(bars: &[Bar]) -> IndicatorResult {
    const NAME: &str = "support_resistance";
    if bars.len() < SR_MIN_BARS {
        return IndicatorResult::inconclusive(NAME);
    }

    let close = bars[bars.len() - 1].close;
    let mut support = Vec::new();
    let mut resistance = Vec::new();

    for i in SR_FLANK..bars.len() - SR_FLANK {
        let high = bars[i].high;
        let low = bars[i].low;
        let mut flanks = (1..=SR_FLANK).map(|k| (&bars[i - k], &bars[i + k]));
        let swing_high = flanks
            .clone()
            .all(|(left, right)| high > left.high && high > right.high);
        let swing_low = flanks.all(|(left, right)| low < left.low && low < right.low);

        if swing_high && high > close {
            resistance.push(high);
        }
        if swing_low && low < close {
            support.push(low);
        }
    }

    // Nearest levels first, truncated to a handful of each.
    support.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    support.truncate(SR_MAX_LEVELS);
    resistance.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    resistance.truncate(SR_MAX_LEVELS);

    IndicatorResult::new(
        NAME,
        IndicatorValue::Levels { support, resistance },
        Signal::Hold,
        50.0,
    )
}
