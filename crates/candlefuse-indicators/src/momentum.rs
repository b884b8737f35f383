//! Momentum oscillators: RSI, MACD, Stochastic, Williams %R, CCI,
//! ROC, and raw momentum.

use crate::series::{closes, ema_series, max_of, mean, min_of, sma_series};
use candlefuse_core::{Bar, IndicatorResult, IndicatorValue, Signal};

const RSI_PERIOD: usize = 14;

/// Relative Strength Index over 14 periods.
///
/// Overbought above 70 (SELL), oversold below 30 (BUY); confidence
/// scales linearly with the distance past the threshold. In the neutral
/// band the confidence is `100 - 2 * |value - 50|`.
pub fn rsi(bars: &[Bar]) -> IndicatorResult {
    const NAME: &str = "rsi";
    if bars.len() < RSI_PERIOD + 1 {
        return IndicatorResult::inconclusive(NAME);
    }

    let closes = closes(bars);
    let window = &closes[closes.len() - RSI_PERIOD - 1..];
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for pair in window.windows(2) {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            gain_sum += change;
        } else {
            loss_sum -= change;
        }
    }
    let avg_gain = gain_sum / RSI_PERIOD as f64;
    let avg_loss = loss_sum / RSI_PERIOD as f64;

    let value = if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    };

    let (signal, confidence) = if value > 70.0 {
        (Signal::Sell, (value - 70.0) / 30.0 * 100.0)
    } else if value < 30.0 {
        (Signal::Buy, (30.0 - value) / 30.0 * 100.0)
    } else {
        (Signal::Hold, 100.0 - 2.0 * (value - 50.0).abs())
    };

    IndicatorResult::new(NAME, IndicatorValue::Single(value), signal, confidence)
}

const MACD_FAST: usize = 12;
const MACD_SLOW: usize = 26;
const MACD_SIGNAL: usize = 9;

/// MACD(12, 26, 9).
///
/// A histogram zero-crossing on the latest bar is the primary signal
/// with confidence `min(|hist| * 10, 100)`; without a crossing the
/// histogram sign keeps a weaker directional bias at confidence 60.
pub fn macd(bars: &[Bar]) -> IndicatorResult {
    const NAME: &str = "macd";
    if bars.len() < MACD_SLOW {
        return IndicatorResult::inconclusive(NAME);
    }

    let closes = closes(bars);
    let fast = ema_series(&closes, MACD_FAST);
    let slow = ema_series(&closes, MACD_SLOW);
    let macd_line: Vec<f64> = fast.iter().zip(slow.iter()).map(|(f, s)| f - s).collect();
    let signal_line = ema_series(&macd_line, MACD_SIGNAL);

    let n = macd_line.len();
    let hist = macd_line[n - 1] - signal_line[n - 1];
    let prev_hist = macd_line[n - 2] - signal_line[n - 2];

    let (signal, confidence) = if hist > 0.0 && prev_hist <= 0.0 {
        (Signal::Buy, (hist.abs() * 10.0).min(100.0))
    } else if hist < 0.0 && prev_hist >= 0.0 {
        (Signal::Sell, (hist.abs() * 10.0).min(100.0))
    } else if hist > 0.0 {
        (Signal::Buy, 60.0)
    } else if hist < 0.0 {
        (Signal::Sell, 60.0)
    } else {
        (Signal::Hold, 50.0)
    };

    IndicatorResult::new(
        NAME,
        IndicatorValue::Macd {
            macd: macd_line[n - 1],
            signal_line: signal_line[n - 1],
            histogram: hist,
        },
        signal,
        confidence,
    )
}

const STOCH_K: usize = 14;
const STOCH_D: usize = 3;

/// Stochastic oscillator (14, 3).
///
/// Both lines above 80 is overbought (SELL), both below 20 oversold
/// (BUY), confidence scaled across the outer band; otherwise a fresh
/// %K/%D crossover gives a weaker signal at confidence 55.
pub fn stochastic(bars: &[Bar]) -> IndicatorResult {
    const NAME: &str = "stochastic";
    if bars.len() < STOCH_K + STOCH_D - 1 {
        return IndicatorResult::inconclusive(NAME);
    }

    let k_series: Vec<f64> = (STOCH_K - 1..bars.len())
        .map(|i| {
            let window = &bars[i + 1 - STOCH_K..=i];
            let highest = max_of(&window.iter().map(|b| b.high).collect::<Vec<_>>());
            let lowest = min_of(&window.iter().map(|b| b.low).collect::<Vec<_>>());
            let range = highest - lowest;
            if range == 0.0 {
                50.0
            } else {
                (bars[i].close - lowest) / range * 100.0
            }
        })
        .collect();
    let d_series = sma_series(&k_series, STOCH_D);

    let k = k_series[k_series.len() - 1];
    let d = d_series[d_series.len() - 1];

    let (signal, confidence) = if k > 80.0 && d > 80.0 {
        (Signal::Sell, ((k - 80.0) / 20.0 * 100.0).min(100.0))
    } else if k < 20.0 && d < 20.0 {
        (Signal::Buy, ((20.0 - k) / 20.0 * 100.0).min(100.0))
    } else if k_series.len() >= 2 && d_series.len() >= 2 {
        let kp = k_series[k_series.len() - 2];
        let dp = d_series[d_series.len() - 2];
        if k > d && kp <= dp {
            (Signal::Buy, 55.0)
        } else if k < d && kp >= dp {
            (Signal::Sell, 55.0)
        } else {
            (Signal::Hold, 50.0)
        }
    } else {
        (Signal::Hold, 50.0)
    };

    IndicatorResult::new(NAME, IndicatorValue::Stochastic { k, d }, signal, confidence)
}

const WILLIAMS_PERIOD: usize = 14;

/// Williams %R over 14 periods, ranging from -100 to 0.
///
/// Above -20 is overbought (SELL), below -80 oversold (BUY), confidence
/// scaled across the 20-point outer band.
pub fn williams_r(bars: &[Bar]) -> IndicatorResult {
    const NAME: &str = "williams_r";
    if bars.len() < WILLIAMS_PERIOD {
        return IndicatorResult::inconclusive(NAME);
    }

    let window = &bars[bars.len() - WILLIAMS_PERIOD..];
    let highest = max_of(&window.iter().map(|b| b.high).collect::<Vec<_>>());
    let lowest = min_of(&window.iter().map(|b| b.low).collect::<Vec<_>>());
    let range = highest - lowest;
    let close = bars[bars.len() - 1].close;
    let value = if range == 0.0 {
        -50.0
    } else {
        (highest - close) / range * -100.0
    };

    let (signal, confidence) = if value > -20.0 {
        (Signal::Sell, ((value + 20.0) / 20.0 * 100.0).min(100.0))
    } else if value < -80.0 {
        (Signal::Buy, ((-80.0 - value) / 20.0 * 100.0).min(100.0))
    } else {
        (Signal::Hold, 50.0)
    };

    IndicatorResult::new(NAME, IndicatorValue::Single(value), signal, confidence)
}

const CCI_PERIOD: usize = 20;

/// Commodity Channel Index over 20 periods.
///
/// Beyond +100 is overbought (SELL) and beyond -100 oversold (BUY),
/// confidence growing point-for-point past the threshold.
pub fn cci(bars: &[Bar]) -> IndicatorResult {
    const NAME: &str = "cci";
    if bars.len() < CCI_PERIOD {
        return IndicatorResult::inconclusive(NAME);
    }

    let tp: Vec<f64> = bars[bars.len() - CCI_PERIOD..]
        .iter()
        .map(|b| b.typical_price())
        .collect();
    let avg = mean(&tp);
    let mean_dev = tp.iter().map(|v| (v - avg).abs()).sum::<f64>() / CCI_PERIOD as f64;
    let value = if mean_dev == 0.0 {
        0.0
    } else {
        (tp[tp.len() - 1] - avg) / (0.015 * mean_dev)
    };

    let (signal, confidence) = if value > 100.0 {
        (Signal::Sell, (value - 100.0).min(100.0))
    } else if value < -100.0 {
        (Signal::Buy, (-100.0 - value).min(100.0))
    } else {
        (Signal::Hold, 50.0)
    };

    IndicatorResult::new(NAME, IndicatorValue::Single(value), signal, confidence)
}

const ROC_PERIOD: usize = 10;

/// Rate of change over 10 periods, in percent.
///
/// Beyond +/-2% is a directional signal with confidence proportional to
/// the magnitude (`min(|roc| * 10, 100)`).
pub fn roc(bars: &[Bar]) -> IndicatorResult {
    const NAME: &str = "roc";
    if bars.len() < ROC_PERIOD + 1 {
        return IndicatorResult::inconclusive(NAME);
    }

    let closes = closes(bars);
    let base = closes[closes.len() - ROC_PERIOD - 1];
    let value = (closes[closes.len() - 1] / base - 1.0) * 100.0;

    let (signal, confidence) = magnitude_signal(value);
    IndicatorResult::new(NAME, IndicatorValue::Single(value), signal, confidence)
}

const MOMENTUM_PERIOD: usize = 10;

/// Raw 10-period momentum (price change), signalled on the percent change
/// with the same thresholds as [`roc`].
pub fn momentum(bars: &[Bar]) -> IndicatorResult {
    const NAME: &str = "momentum";
    if bars.len() < MOMENTUM_PERIOD + 1 {
        return IndicatorResult::inconclusive(NAME);
    }

    let closes = closes(bars);
    let base = closes[closes.len() - MOMENTUM_PERIOD - 1];
    let change = closes[closes.len() - 1] - base;
    let change_pct = change / base * 100.0;

    let (signal, confidence) = magnitude_signal(change_pct);
    IndicatorResult::new(
        NAME,
        IndicatorValue::Momentum { change, change_pct },
        signal,
        confidence,
    )
}

fn magnitude_signal(pct: f64) -> (Signal, f64) {
    if pct > 2.0 {
        (Signal::Buy, (pct.abs() * 10.0).min(100.0))
    } else if pct < -2.0 {
        (Signal::Sell, (pct.abs() * 10.0).min(100.0))
    } else {
        (Signal::Hold, 50.0)
    }
}
