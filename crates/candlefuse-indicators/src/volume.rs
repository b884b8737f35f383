//! Volume-based indicators: OBV, MFI, and VWAP.

use crate::series::sma_series;
use candlefuse_core::{Bar, Divergence, IndicatorResult, IndicatorValue, Signal};

const OBV_MA_PERIOD: usize = 9;
const OBV_TREND_BARS: usize = 5;

/// On-Balance Volume with a 9-period moving average.
///
/// Combines the OBV-versus-MA trend with the 5-bar price trend. When
/// both agree the signal is a confirmation (confidence 70); when they
/// disagree OBV leads and a divergence is flagged (confidence 65).
pub fn obv(bars: &[Bar]) -> IndicatorResult {
    const NAME: &str = "obv";
    if bars.len() < OBV_MA_PERIOD + 1 {
        return IndicatorResult::inconclusive(NAME);
    }

    let mut obv_series = Vec::with_capacity(bars.len());
    let mut running = 0.0_f64;
    obv_series.push(running);
    for pair in bars.windows(2) {
        if pair[1].close > pair[0].close {
            running += pair[1].volume as f64;
        } else if pair[1].close < pair[0].close {
            running -= pair[1].volume as f64;
        }
        obv_series.push(running);
    }

    let ma_series = sma_series(&obv_series, OBV_MA_PERIOD);
    let obv = obv_series[obv_series.len() - 1];
    let ma = ma_series[ma_series.len() - 1];

    let price_up = bars[bars.len() - 1].close > bars[bars.len() - OBV_TREND_BARS].close;
    let obv_up = obv > ma;

    let (signal, confidence, divergence) = match (obv_up, price_up) {
        (true, true) => (Signal::Buy, 70.0, None),
        (true, false) => (Signal::Buy, 65.0, Some(Divergence::Bullish)),
        (false, false) => (Signal::Sell, 70.0, None),
        (false, true) => (Signal::Sell, 65.0, Some(Divergence::Bearish)),
    };

    IndicatorResult::new(
        NAME,
        IndicatorValue::Obv { obv, ma, divergence },
        signal,
        confidence,
    )
}

const MFI_PERIOD: usize = 14;

/// Money Flow Index over 14 periods, a volume-weighted RSI analogue.
///
/// Above 80 is overbought (SELL), below 20 oversold (BUY), confidence
/// scaled across the 20-point outer band.
pub fn mfi(bars: &[Bar]) -> IndicatorResult {
    const NAME: &str = "mfi";
    if bars.len() < MFI_PERIOD + 1 {
        return IndicatorResult::inconclusive(NAME);
    }

    let window = &bars[bars.len() - MFI_PERIOD - 1..];
    let mut positive = 0.0_f64;
    let mut negative = 0.0_f64;
    for pair in window.windows(2) {
        let prev_tp = pair[0].typical_price();
        let tp = pair[1].typical_price();
        let flow = tp * pair[1].volume as f64;
        if tp > prev_tp {
            positive += flow;
        } else if tp < prev_tp {
            negative += flow;
        }
    }

    let value = if negative == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + positive / negative)
    };

    let (signal, confidence) = if value > 80.0 {
        (Signal::Sell, ((value - 80.0) / 20.0 * 100.0).min(100.0))
    } else if value < 20.0 {
        (Signal::Buy, ((20.0 - value) / 20.0 * 100.0).min(100.0))
    } else {
        (Signal::Hold, 50.0)
    };

    IndicatorResult::new(NAME, IndicatorValue::Single(value), signal, confidence)
}

const VWAP_MIN_BARS: usize = 5;

/// Volume-weighted average price over the window.
///
/// Close above VWAP leans BUY and below leans SELL, confidence growing
/// with the deviation percentage. A window with zero total volume is
/// inconclusive.
pub fn vwap(bars: &[Bar]) -> IndicatorResult {
    const NAME: &str = "vwap";
    if bars.len() < VWAP_MIN_BARS {
        return IndicatorResult::inconclusive(NAME);
    }

    let total_volume: f64 = bars.iter().map(|b| b.volume as f64).sum();
    if total_volume == 0.0 {
        return IndicatorResult::inconclusive(NAME);
    }
    let weighted: f64 = bars
        .iter()
        .map(|b| b.typical_price() * b.volume as f64)
        .sum();
    let vwap = weighted / total_volume;

    let close = bars[bars.len() - 1].close;
    let deviation_pct = (close - vwap) / vwap * 100.0;

    let (signal, confidence) = if close > vwap {
        (Signal::Buy, (55.0 + deviation_pct.abs() * 5.0).min(90.0))
    } else if close < vwap {
        (Signal::Sell, (55.0 + deviation_pct.abs() * 5.0).min(90.0))
    } else {
        (Signal::Hold, 50.0)
    };

    IndicatorResult::new(
        NAME,
        IndicatorValue::Vwap { vwap, deviation_pct },
        signal,
        confidence,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars(closes: &[f64], volumes: &[u64]) -> Vec<Bar> {
        closes
            .iter()
            .zip(volumes.iter())
            .enumerate()
            .map(|(i, (c, v))| Bar::new(i as i64 * 86_400_000, *c, c + 1.0, c - 1.0, *c, *v))
            .collect()
    }

    #[test]
    fn test_obv_confirms_uptrend() {
        let closes: Vec<f64> = (0..15).map(|i| 100.0 + i as f64).collect();
        let volumes = vec![1000; 15];
        let r = obv(&bars(&closes, &volumes));
        assert_eq!(r.signal, Signal::Buy);
        assert_eq!(r.confidence, 70.0);
        match r.value {
            Some(IndicatorValue::Obv { obv, ma, divergence }) => {
                assert!(obv > ma);
                assert!(divergence.is_none());
            }
            other => panic!("unexpected value {:?}", other),
        }
    }

    #[test]
    fn test_obv_bearish_divergence() {
        // Price grinds higher while heavy down-volume drags OBV under
        // its average.
        let closes = [
            100.0, 104.0, 101.0, 105.0, 102.0, 106.0, 103.0, 107.0, 104.0, 108.0, 105.0, 109.0,
        ];
        let volumes = [100, 100, 4000, 100, 4000, 100, 4000, 100, 4000, 100, 4000, 100];
        let r = obv(&bars(&closes, &volumes));
        assert_eq!(r.signal, Signal::Sell);
        assert_eq!(r.confidence, 65.0);
        match r.value {
            Some(IndicatorValue::Obv { divergence, .. }) => {
                assert_eq!(divergence, Some(Divergence::Bearish));
            }
            other => panic!("unexpected value {:?}", other),
        }
    }

    #[test]
    fn test_obv_minimum_window() {
        let closes = vec![100.0; 9];
        assert!(obv(&bars(&closes, &vec![10; 9])).is_inconclusive());
    }

    #[test]
    fn test_mfi_range_and_overbought() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let r = mfi(&bars(&closes, &vec![500; 20]));
        match r.value {
            Some(IndicatorValue::Single(v)) => {
                assert!((0.0..=100.0).contains(&v));
                assert_eq!(v, 100.0); // every flow positive
            }
            other => panic!("unexpected value {:?}", other),
        }
        assert_eq!(r.signal, Signal::Sell);
        assert_eq!(r.confidence, 100.0);
    }

    #[test]
    fn test_mfi_minimum_window() {
        let closes = vec![100.0; 14];
        assert!(mfi(&bars(&closes, &vec![10; 14])).is_inconclusive());
    }

    #[test]
    fn test_vwap_above_is_buy() {
        // Flat then a pop: close well above the volume-weighted average.
        let closes = [100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 106.0];
        let r = vwap(&bars(&closes, &vec![1000; 7]));
        assert_eq!(r.signal, Signal::Buy);
        assert!(r.confidence > 55.0 && r.confidence <= 90.0);
    }

    #[test]
    fn test_vwap_zero_volume_is_inconclusive() {
        let closes = vec![100.0; 10];
        assert!(vwap(&bars(&closes, &vec![0; 10])).is_inconclusive());
    }
}
