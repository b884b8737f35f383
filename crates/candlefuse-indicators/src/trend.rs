//! Trend indicators: ADX, Donchian channel, Parabolic SAR, Ichimoku.

use crate::series::{highs, lows, max_of, mean, min_of, true_ranges, wilder_series};
use candlefuse_core::{Bar, IndicatorResult, IndicatorValue, Signal, TrendStrength};

const ADX_PERIOD: usize = 14;

/// Average Directional Index with +DI/-DI over 14 periods.
///
/// Trend strength is bucketed STRONG (>25), MODERATE (>20), WEAK; the
/// direction comes from the DI comparison and confidence is the ADX
/// value capped at 100. A WEAK reading abstains (HOLD).
pub fn adx(bars: &[Bar]) -> IndicatorResult {
    const NAME: &str = "adx";
    if bars.len() < ADX_PERIOD + 1 {
        return IndicatorResult::inconclusive(NAME);
    }

    let n = bars.len();
    let mut plus_dm = Vec::with_capacity(n - 1);
    let mut minus_dm = Vec::with_capacity(n - 1);
    for i in 1..n {
        let up = bars[i].high - bars[i - 1].high;
        let down = bars[i - 1].low - bars[i].low;
        plus_dm.push(if up > down && up > 0.0 { up } else { 0.0 });
        minus_dm.push(if down > up && down > 0.0 { down } else { 0.0 });
    }
    let trs = &true_ranges(bars)[1..];

    let sm_plus = wilder_series(&plus_dm, ADX_PERIOD);
    let sm_minus = wilder_series(&minus_dm, ADX_PERIOD);
    let sm_tr = wilder_series(trs, ADX_PERIOD);

    let mut plus_di_last = 0.0;
    let mut minus_di_last = 0.0;
    let mut dx_series = Vec::with_capacity(sm_tr.len());
    for i in 0..sm_tr.len() {
        let (p, m) = if sm_tr[i] == 0.0 {
            (0.0, 0.0)
        } else {
            (
                100.0 * sm_plus[i] / sm_tr[i],
                100.0 * sm_minus[i] / sm_tr[i],
            )
        };
        plus_di_last = p;
        minus_di_last = m;
        dx_series.push(if p + m == 0.0 {
            0.0
        } else {
            100.0 * (p - m).abs() / (p + m)
        });
    }

    // A full second smoothing pass needs 2x the period; fall back to the
    // plain mean while the DX history is still short.
    let adx = if dx_series.len() >= ADX_PERIOD {
        let smoothed = wilder_series(&dx_series, ADX_PERIOD);
        smoothed[smoothed.len() - 1]
    } else {
        mean(&dx_series)
    };

    let strength = if adx > 25.0 {
        TrendStrength::Strong
    } else if adx > 20.0 {
        TrendStrength::Moderate
    } else {
        TrendStrength::Weak
    };

    let signal = match strength {
        TrendStrength::Weak => Signal::Hold,
        _ if plus_di_last > minus_di_last => Signal::Buy,
        _ if plus_di_last < minus_di_last => Signal::Sell,
        _ => Signal::Hold,
    };

    IndicatorResult::new(
        NAME,
        IndicatorValue::Adx {
            adx,
            plus_di: plus_di_last,
            minus_di: minus_di_last,
            strength,
        },
        signal,
        adx.min(100.0),
    )
}

const DONCHIAN_PERIOD: usize = 20;

/// Donchian channel over the prior 20 bars.
///
/// A close at or beyond the prior channel bound is a breakout
/// (STRONG_BUY/STRONG_SELL, confidence 70); anything inside holds.
pub fn donchian(bars: &[Bar]) -> IndicatorResult {
    const NAME: &str = "donchian";
    if bars.len() < DONCHIAN_PERIOD + 1 {
        return IndicatorResult::inconclusive(NAME);
    }

    let prior = &bars[bars.len() - DONCHIAN_PERIOD - 1..bars.len() - 1];
    let upper = max_of(&highs(prior));
    let lower = min_of(&lows(prior));
    let middle = (upper + lower) / 2.0;
    let close = bars[bars.len() - 1].close;

    let (signal, confidence) = if close >= upper {
        (Signal::StrongBuy, 70.0)
    } else if close <= lower {
        (Signal::StrongSell, 70.0)
    } else {
        (Signal::Hold, 50.0)
    };

    IndicatorResult::new(
        NAME,
        IndicatorValue::Channel { upper, middle, lower },
        signal,
        confidence,
    )
}

const SAR_AF_STEP: f64 = 0.02;
const SAR_AF_MAX: f64 = 0.2;
const SAR_MIN_BARS: usize = 5;

/// Parabolic SAR (0.02 step, 0.2 max acceleration).
///
/// A flip on the latest bar is the strong event (confidence 80); an
/// established trend keeps the weaker directional bias at 60.
pub fn parabolic_sar(bars: &[Bar]) -> IndicatorResult {
    const NAME: &str = "parabolic_sar";
    if bars.len() < SAR_MIN_BARS {
        return IndicatorResult::inconclusive(NAME);
    }

    let n = bars.len();
    let mut rising = bars[1].close >= bars[0].close;
    let mut sar = if rising { bars[0].low } else { bars[0].high };
    let mut ep = if rising { bars[0].high } else { bars[0].low };
    let mut af = SAR_AF_STEP;
    let mut last_flip = None;

    for i in 1..n {
        sar += af * (ep - sar);
        if rising {
            // SAR never rises above the two prior lows.
            sar = sar.min(bars[i - 1].low);
            if i >= 2 {
                sar = sar.min(bars[i - 2].low);
            }
            if bars[i].low < sar {
                rising = false;
                sar = ep;
                ep = bars[i].low;
                af = SAR_AF_STEP;
                last_flip = Some(i);
            } else if bars[i].high > ep {
                ep = bars[i].high;
                af = (af + SAR_AF_STEP).min(SAR_AF_MAX);
            }
        } else {
            sar = sar.max(bars[i - 1].high);
            if i >= 2 {
                sar = sar.max(bars[i - 2].high);
            }
            if bars[i].high > sar {
                rising = true;
                sar = ep;
                ep = bars[i].high;
                af = SAR_AF_STEP;
                last_flip = Some(i);
            } else if bars[i].low < ep {
                ep = bars[i].low;
                af = (af + SAR_AF_STEP).min(SAR_AF_MAX);
            }
        }
    }

    let flipped_now = last_flip == Some(n - 1);
    let (signal, confidence) = match (rising, flipped_now) {
        (true, true) => (Signal::Buy, 80.0),
        (false, true) => (Signal::Sell, 80.0),
        (true, false) => (Signal::Buy, 60.0),
        (false, false) => (Signal::Sell, 60.0),
    };

    IndicatorResult::new(NAME, IndicatorValue::Sar { sar, rising }, signal, confidence)
}

const ICHIMOKU_TENKAN: usize = 9;
const ICHIMOKU_KIJUN: usize = 26;
const ICHIMOKU_SENKOU: usize = 52;

fn midpoint(bars: &[Bar], period: usize) -> f64 {
    let window = &bars[bars.len() - period..];
    (max_of(&highs(window)) + min_of(&lows(window))) / 2.0
}

/// Ichimoku cloud (9, 26, 52).
///
/// Price above the cloud leans BUY, below leans SELL; the tenkan/kijun
/// relationship upgrades the confidence from 60 to 75 when it confirms.
pub fn ichimoku(bars: &[Bar]) -> IndicatorResult {
    const NAME: &str = "ichimoku";
    if bars.len() < ICHIMOKU_SENKOU {
        return IndicatorResult::inconclusive(NAME);
    }

    let tenkan = midpoint(bars, ICHIMOKU_TENKAN);
    let kijun = midpoint(bars, ICHIMOKU_KIJUN);
    let senkou_a = (tenkan + kijun) / 2.0;
    let senkou_b = midpoint(bars, ICHIMOKU_SENKOU);
    let close = bars[bars.len() - 1].close;
    let chikou = close;

    let cloud_top = senkou_a.max(senkou_b);
    let cloud_bottom = senkou_a.min(senkou_b);

    let (signal, confidence) = if close > cloud_top {
        (Signal::Buy, if tenkan > kijun { 75.0 } else { 60.0 })
    } else if close < cloud_bottom {
        (Signal::Sell, if tenkan < kijun { 75.0 } else { 60.0 })
    } else {
        (Signal::Hold, 50.0)
    };

    IndicatorResult::new(
        NAME,
        IndicatorValue::Ichimoku {
            tenkan,
            kijun,
            senkou_a,
            senkou_b,
            chikou,
        },
        signal,
        confidence,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close_bars(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, c)| Bar::new(i as i64 * 86_400_000, *c, c + 1.0, c - 1.0, *c, 100))
            .collect()
    }

    fn rising_bars(n: usize) -> Vec<Bar> {
        close_bars(&(0..n).map(|i| 100.0 + i as f64).collect::<Vec<_>>())
    }

    #[test]
    fn test_adx_strong_uptrend() {
        let r = adx(&rising_bars(60));
        match r.value {
            Some(IndicatorValue::Adx {
                adx,
                plus_di,
                minus_di,
                strength,
            }) => {
                assert!(adx > 25.0);
                assert!(plus_di > minus_di);
                assert_eq!(strength, TrendStrength::Strong);
            }
            other => panic!("unexpected value {:?}", other),
        }
        assert_eq!(r.signal, Signal::Buy);
        assert!(r.confidence <= 100.0);
    }

    #[test]
    fn test_adx_flat_market_holds() {
        let r = adx(&close_bars(&[100.0; 40]));
        assert_eq!(r.signal, Signal::Hold);
        match r.value {
            Some(IndicatorValue::Adx { strength, .. }) => {
                assert_eq!(strength, TrendStrength::Weak);
            }
            other => panic!("unexpected value {:?}", other),
        }
    }

    #[test]
    fn test_adx_minimum_window() {
        assert!(adx(&rising_bars(14)).is_inconclusive());
        assert!(!adx(&rising_bars(15)).is_inconclusive());
    }

    #[test]
    fn test_donchian_breakout() {
        let mut closes = vec![100.0; 21];
        closes[20] = 110.0;
        let r = donchian(&close_bars(&closes));
        assert_eq!(r.signal, Signal::StrongBuy);
        assert_eq!(r.confidence, 70.0);

        let mut closes = vec![100.0; 21];
        closes[20] = 90.0;
        let r = donchian(&close_bars(&closes));
        assert_eq!(r.signal, Signal::StrongSell);
    }

    #[test]
    fn test_donchian_inside_channel_holds() {
        // Wide prior range, last close in the middle of it.
        let mut closes: Vec<f64> = (0..21).map(|i| 100.0 + (i % 7) as f64).collect();
        closes[20] = 103.0;
        let r = donchian(&close_bars(&closes));
        assert_eq!(r.signal, Signal::Hold);
        match r.value {
            Some(IndicatorValue::Channel { upper, lower, .. }) => {
                assert!(lower < 103.0 && 103.0 < upper);
            }
            other => panic!("unexpected value {:?}", other),
        }
    }

    #[test]
    fn test_sar_follows_uptrend() {
        let r = parabolic_sar(&rising_bars(30));
        assert_eq!(r.signal, Signal::Buy);
        assert_eq!(r.confidence, 60.0);
        match r.value {
            Some(IndicatorValue::Sar { sar, rising }) => {
                assert!(rising);
                assert!(sar < 129.0);
            }
            other => panic!("unexpected value {:?}", other),
        }
    }

    #[test]
    fn test_sar_flip_on_reversal() {
        // Long climb, then a hard break below the trailing stop.
        let mut closes: Vec<f64> = (0..25).map(|i| 100.0 + i as f64).collect();
        closes.push(90.0);
        let r = parabolic_sar(&close_bars(&closes));
        assert_eq!(r.signal, Signal::Sell);
        assert_eq!(r.confidence, 80.0);
    }

    #[test]
    fn test_ichimoku_above_cloud() {
        let r = ichimoku(&rising_bars(60));
        assert_eq!(r.signal, Signal::Buy);
        assert_eq!(r.confidence, 75.0);
        match r.value {
            Some(IndicatorValue::Ichimoku { tenkan, kijun, .. }) => {
                assert!(tenkan > kijun);
            }
            other => panic!("unexpected value {:?}", other),
        }
    }

    #[test]
    fn test_ichimoku_minimum_window() {
        assert!(ichimoku(&rising_bars(51)).is_inconclusive());
    }
}
