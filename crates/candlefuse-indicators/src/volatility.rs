//! Volatility indicators: Bollinger Bands and ATR.

use crate::series::{closes, mean, sma_series, true_ranges};
use candlefuse_core::{Bar, IndicatorResult, IndicatorValue, Signal, Volatility};

const BB_PERIOD: usize = 20;
const BB_STD_DEV: f64 = 2.0;

/// Bollinger Bands (20, 2 sigma).
///
/// A close at or beyond a band signals mean reversion, with confidence
/// scaled by the overshoot relative to the band half-width. Also reports
/// the bandwidth percentage and a squeeze flag below 10%.
pub fn bollinger(bars: &[Bar]) -> IndicatorResult {
    const NAME: &str = "bollinger";
    if bars.len() < BB_PERIOD {
        return IndicatorResult::inconclusive(NAME);
    }

    let closes = closes(bars);
    let window = &closes[closes.len() - BB_PERIOD..];
    let middle = mean(window);
    // Sample standard deviation (n - 1), the rolling-window convention.
    let variance =
        window.iter().map(|v| (v - middle).powi(2)).sum::<f64>() / (BB_PERIOD as f64 - 1.0);
    let std = variance.sqrt();

    let upper = middle + std * BB_STD_DEV;
    let lower = middle - std * BB_STD_DEV;
    let close = closes[closes.len() - 1];
    let bandwidth_pct = if middle == 0.0 {
        0.0
    } else {
        (upper - lower) / middle * 100.0
    };
    let squeeze = bandwidth_pct < 10.0;
    let half_width = upper - middle;

    let (signal, confidence) = if close >= upper && half_width > 0.0 {
        (Signal::Sell, ((close - upper) / half_width * 100.0).min(100.0))
    } else if close <= lower && half_width > 0.0 {
        (Signal::Buy, ((lower - close) / half_width * 100.0).min(100.0))
    } else {
        (Signal::Hold, 50.0)
    };

    IndicatorResult::new(
        NAME,
        IndicatorValue::Bollinger {
            upper,
            middle,
            lower,
            bandwidth_pct,
            squeeze,
        },
        signal,
        confidence,
    )
}

const ATR_PERIOD: usize = 14;

/// Average True Range over 14 periods.
///
/// Not directional: always HOLD, classifying the current ATR against its
/// own running average as HIGH (>1.5x, confidence 80), LOW (<0.5x, 80),
/// or NORMAL (60).
pub fn atr(bars: &[Bar]) -> IndicatorResult {
    const NAME: &str = "atr";
    if bars.len() < ATR_PERIOD + 1 {
        return IndicatorResult::inconclusive(NAME);
    }

    // Skip the first bar's range-only value; every retained TR has a
    // previous close.
    let trs = &true_ranges(bars)[1..];
    let atr_series = sma_series(trs, ATR_PERIOD);
    let value = atr_series[atr_series.len() - 1];
    let avg = mean(&atr_series);

    let (volatility, confidence) = if value > avg * 1.5 {
        (Volatility::High, 80.0)
    } else if value < avg * 0.5 {
        (Volatility::Low, 80.0)
    } else {
        (Volatility::Normal, 60.0)
    };

    IndicatorResult::new(
        NAME,
        IndicatorValue::Atr { value, volatility },
        Signal::Hold,
        confidence,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars_from(ohlc: &[(f64, f64, f64, f64)]) -> Vec<Bar> {
        ohlc.iter()
            .enumerate()
            .map(|(i, (o, h, l, c))| Bar::new(i as i64 * 86_400_000, *o, *h, *l, *c, 100))
            .collect()
    }

    fn close_bars(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, c)| Bar::new(i as i64 * 86_400_000, *c, c + 1.0, c - 1.0, *c, 100))
            .collect()
    }

    #[test]
    fn test_bollinger_breach_sells() {
        // Mild noise then a spike through the upper band.
        let mut closes: Vec<f64> = (0..24)
            .map(|i| 100.0 + if i % 2 == 0 { 0.5 } else { -0.5 })
            .collect();
        closes.push(110.0);
        let r = bollinger(&close_bars(&closes));
        assert_eq!(r.signal, Signal::Sell);
        assert!(r.confidence > 0.0 && r.confidence <= 100.0);
        match r.value {
            Some(IndicatorValue::Bollinger { upper, lower, middle, .. }) => {
                assert!(lower < middle && middle < upper);
                assert!(110.0 >= upper);
            }
            other => panic!("unexpected value {:?}", other),
        }
    }

    #[test]
    fn test_bollinger_inside_band_holds() {
        let closes: Vec<f64> = (0..30)
            .map(|i| 100.0 + if i % 2 == 0 { 0.5 } else { -0.5 })
            .collect();
        let r = bollinger(&close_bars(&closes));
        assert_eq!(r.signal, Signal::Hold);
        assert_eq!(r.confidence, 50.0);
    }

    #[test]
    fn test_bollinger_squeeze_flag() {
        // Tiny oscillation: bandwidth well under 10%.
        let closes: Vec<f64> = (0..25)
            .map(|i| 100.0 + if i % 2 == 0 { 0.05 } else { -0.05 })
            .collect();
        match bollinger(&close_bars(&closes)).value {
            Some(IndicatorValue::Bollinger { squeeze, bandwidth_pct, .. }) => {
                assert!(squeeze);
                assert!(bandwidth_pct < 10.0);
            }
            other => panic!("unexpected value {:?}", other),
        }
    }

    #[test]
    fn test_bollinger_minimum_window() {
        assert!(bollinger(&close_bars(&[100.0; 19])).is_inconclusive());
    }

    #[test]
    fn test_atr_normal_regime() {
        // Constant 2-point daily range: ATR equals its own average.
        let bars = bars_from(&vec![(100.0, 101.0, 99.0, 100.0); 30]);
        let r = atr(&bars);
        assert_eq!(r.signal, Signal::Hold);
        assert_eq!(r.confidence, 60.0);
        match r.value {
            Some(IndicatorValue::Atr { value, volatility }) => {
                assert!((value - 2.0).abs() < 1e-9);
                assert_eq!(volatility, Volatility::Normal);
            }
            other => panic!("unexpected value {:?}", other),
        }
    }

    #[test]
    fn test_atr_high_volatility() {
        // Quiet for a long stretch, then wide bars: latest ATR far above
        // the running average.
        let mut ohlc = vec![(100.0, 100.2, 99.8, 100.0); 60];
        ohlc.extend(vec![(100.0, 112.0, 88.0, 100.0); 14]);
        let r = atr(&bars_from(&ohlc));
        match r.value {
            Some(IndicatorValue::Atr { volatility, .. }) => {
                assert_eq!(volatility, Volatility::High);
            }
            other => panic!("unexpected value {:?}", other),
        }
        assert_eq!(r.confidence, 80.0);
    }

    #[test]
    fn test_atr_minimum_window() {
        let bars = bars_from(&vec![(100.0, 101.0, 99.0, 100.0); 14]);
        assert!(atr(&bars).is_inconclusive());
    }
}
