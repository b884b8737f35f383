//! Moving averages and the long-horizon cross signal.

use crate::series::{closes, sma_series};
use candlefuse_core::{Bar, CrossState, IndicatorResult, IndicatorValue, Signal};

/// Simple moving average. A support indicator: value only, HOLD,
/// confidence 0, so fusion never weighs it on its own.
pub fn sma(bars: &[Bar], period: usize) -> IndicatorResult {
    let name = format!("sma_{}", period);
    if bars.len() < period {
        return IndicatorResult::inconclusive(&name);
    }
    let closes = closes(bars);
    let value = closes[closes.len() - period..].iter().sum::<f64>() / period as f64;
    IndicatorResult {
        name,
        value: Some(IndicatorValue::Single(value)),
        signal: Signal::Hold,
        confidence: 0.0,
    }
}

/// Exponential moving average, same support-indicator contract as [`sma`].
pub fn ema(bars: &[Bar], period: usize) -> IndicatorResult {
    let name = format!("ema_{}", period);
    if bars.len() < period {
        return IndicatorResult::inconclusive(&name);
    }
    let series = crate::series::ema_series(&closes(bars), period);
    IndicatorResult {
        name,
        value: Some(IndicatorValue::Single(series[series.len() - 1])),
        signal: Signal::Hold,
        confidence: 0.0,
    }
}

const GOLDEN_FAST: usize = 50;
const GOLDEN_SLOW: usize = 200;

/// Golden/death cross of SMA(50) against SMA(200).
///
/// A cross on the latest bar is the strong event (confidence 85); a
/// persistent fast-above-slow (or below) state keeps a weaker directional
/// bias at confidence 60.
pub fn golden_cross(bars: &[Bar]) -> IndicatorResult {
    const NAME: &str = "golden_cross";
    if bars.len() < GOLDEN_SLOW {
        return IndicatorResult::inconclusive(NAME);
    }

    let closes = closes(bars);
    let fast_series = sma_series(&closes, GOLDEN_FAST);
    let slow_series = sma_series(&closes, GOLDEN_SLOW);

    let fast = fast_series[fast_series.len() - 1];
    let slow = slow_series[slow_series.len() - 1];
    let prev = if slow_series.len() >= 2 {
        Some((
            fast_series[fast_series.len() - 2],
            slow_series[slow_series.len() - 2],
        ))
    } else {
        None
    };

    let crossed_up = matches!(prev, Some((pf, ps)) if fast > slow && pf <= ps);
    let crossed_down = matches!(prev, Some((pf, ps)) if fast < slow && pf >= ps);

    let (state, signal, confidence) = if crossed_up {
        (CrossState::GoldenCross, Signal::StrongBuy, 85.0)
    } else if crossed_down {
        (CrossState::DeathCross, Signal::StrongSell, 85.0)
    } else if fast > slow {
        (CrossState::Above, Signal::Buy, 60.0)
    } else if fast < slow {
        (CrossState::Below, Signal::Sell, 60.0)
    } else {
        (CrossState::Flat, Signal::Hold, 50.0)
    };

    IndicatorResult::new(
        NAME,
        IndicatorValue::Cross { fast, slow, state },
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

    #[test]
    fn test_sma_value() {
        let bars = close_bars(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let r = sma(&bars, 3);
        assert_eq!(r.value, Some(IndicatorValue::Single(4.0)));
        assert_eq!(r.signal, Signal::Hold);
    }

    #[test]
    fn test_sma_short_window() {
        let bars = close_bars(&[1.0, 2.0]);
        assert!(sma(&bars, 20).is_inconclusive());
        assert!(ema(&bars, 20).is_inconclusive());
    }

    #[test]
    fn test_ema_constant_series() {
        let bars = close_bars(&[50.0; 25]);
        let r = ema(&bars, 20);
        assert_eq!(r.value, Some(IndicatorValue::Single(50.0)));
    }

    #[test]
    fn test_golden_cross_event() {
        // Flat at 100 for 200 bars, then one jump: SMA50 overtakes SMA200
        // on the final bar.
        let mut closes = vec![100.0; 200];
        closes.push(120.0);
        let r = golden_cross(&close_bars(&closes));
        assert_eq!(r.signal, Signal::StrongBuy);
        assert_eq!(r.confidence, 85.0);
        match r.value {
            Some(IndicatorValue::Cross { state, fast, slow }) => {
                assert_eq!(state, CrossState::GoldenCross);
                assert!(fast > slow);
            }
            other => panic!("unexpected value {:?}", other),
        }
    }

    #[test]
    fn test_death_cross_event() {
        let mut closes = vec![100.0; 200];
        closes.push(80.0);
        let r = golden_cross(&close_bars(&closes));
        assert_eq!(r.signal, Signal::StrongSell);
        assert_eq!(r.confidence, 85.0);
    }

    #[test]
    fn test_persistent_above_is_weak_buy() {
        // Rising the whole way: fast stays above slow, no fresh cross.
        let closes: Vec<f64> = (0..260).map(|i| 100.0 + i as f64 * 0.5).collect();
        let r = golden_cross(&close_bars(&closes));
        assert_eq!(r.signal, Signal::Buy);
        assert_eq!(r.confidence, 60.0);
    }

    #[test]
    fn test_golden_cross_needs_200_bars() {
        let closes = vec![100.0; 199];
        assert!(golden_cross(&close_bars(&closes)).is_inconclusive());
    }
}
