//! Directional signals and indicator results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Directional trading signal.
///
/// The strong variants are reserved for volume and trend indicators
/// (channel breakouts, moving-average cross events); fusion treats them
/// as their plain counterparts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Signal {
    #[serde(rename = "STRONG_BUY")]
    StrongBuy,
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "HOLD")]
    #[default]
    Hold,
    #[serde(rename = "SELL")]
    Sell,
    #[serde(rename = "STRONG_SELL")]
    StrongSell,
}

impl Signal {
    /// True for `Buy` and `StrongBuy`.
    #[inline]
    pub fn is_buy(&self) -> bool {
        matches!(self, Signal::Buy | Signal::StrongBuy)
    }

    /// True for `Sell` and `StrongSell`.
    #[inline]
    pub fn is_sell(&self) -> bool {
        matches!(self, Signal::Sell | Signal::StrongSell)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Signal::StrongBuy => "STRONG_BUY",
            Signal::Buy => "BUY",
            Signal::Hold => "HOLD",
            Signal::Sell => "SELL",
            Signal::StrongSell => "STRONG_SELL",
        };
        write!(f, "{}", s)
    }
}

/// Volatility regime reported by ATR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Volatility {
    High,
    Normal,
    Low,
}

/// Volume/price divergence flagged by OBV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Divergence {
    Bullish,
    Bearish,
}

/// Trend strength bucket reported by ADX.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrendStrength {
    Strong,
    Moderate,
    Weak,
}

/// State of a fast/slow moving-average pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossState {
    GoldenCross,
    DeathCross,
    Above,
    Below,
    Flat,
}

/// A single Fibonacci retracement level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FibLevel {
    pub ratio: f64,
    pub price: f64,
}

/// Indicator-specific numeric payload.
///
/// A closed enumeration so the indicator set is statically known; every
/// variant corresponds to one family of outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorValue {
    /// A single value (SMA, EMA, RSI, Williams %R, CCI, MFI, ROC)
    Single(f64),
    Macd {
        macd: f64,
        signal_line: f64,
        histogram: f64,
    },
    Stochastic {
        k: f64,
        d: f64,
    },
    Bollinger {
        upper: f64,
        middle: f64,
        lower: f64,
        bandwidth_pct: f64,
        squeeze: bool,
    },
    Atr {
        value: f64,
        volatility: Volatility,
    },
    Obv {
        obv: f64,
        ma: f64,
        divergence: Option<Divergence>,
    },
    Adx {
        adx: f64,
        plus_di: f64,
        minus_di: f64,
        strength: TrendStrength,
    },
    Momentum {
        change: f64,
        change_pct: f64,
    },
    Fibonacci {
        high: f64,
        low: f64,
        levels: Vec<FibLevel>,
    },
    Pivots {
        pivot: f64,
        r1: f64,
        r2: f64,
        r3: f64,
        s1: f64,
        s2: f64,
        s3: f64,
    },
    /// Donchian channel bounds
    Channel {
        upper: f64,
        middle: f64,
        lower: f64,
    },
    Sar {
        sar: f64,
        rising: bool,
    },
    Vwap {
        vwap: f64,
        deviation_pct: f64,
    },
    Ichimoku {
        tenkan: f64,
        kijun: f64,
        senkou_a: f64,
        senkou_b: f64,
        chikou: f64,
    },
    /// Support and resistance levels from a swing-point scan
    Levels {
        support: Vec<f64>,
        resistance: Vec<f64>,
    },
    /// Fast/slow moving-average pair (golden/death cross)
    Cross {
        fast: f64,
        slow: f64,
        state: CrossState,
    },
}

/// Output of one indicator over one bar window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorResult {
    /// Indicator key, e.g. `rsi` or `sma_20`
    pub name: String,
    /// Numeric payload; `None` means the window was too short
    pub value: Option<IndicatorValue>,
    pub signal: Signal,
    /// Confidence in [0, 100]; 0 with no value means inconclusive
    pub confidence: f64,
}

impl IndicatorResult {
    /// Build a result, clamping confidence to [0, 100].
    pub fn new(name: &str, value: IndicatorValue, signal: Signal, confidence: f64) -> Self {
        Self {
            name: name.to_string(),
            value: Some(value),
            signal,
            confidence: confidence.clamp(0.0, 100.0),
        }
    }

    /// The uniform insufficient-history result: no value, HOLD, confidence 0.
    pub fn inconclusive(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: None,
            signal: Signal::Hold,
            confidence: 0.0,
        }
    }

    /// True when the window was shorter than the indicator's minimum.
    /// Fusion must skip these results entirely.
    #[inline]
    pub fn is_inconclusive(&self) -> bool {
        self.value.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_direction() {
        assert!(Signal::Buy.is_buy());
        assert!(Signal::StrongBuy.is_buy());
        assert!(Signal::Sell.is_sell());
        assert!(Signal::StrongSell.is_sell());
        assert!(!Signal::Hold.is_buy());
        assert!(!Signal::Hold.is_sell());
    }

    #[test]
    fn test_confidence_clamped() {
        let r = IndicatorResult::new("rsi", IndicatorValue::Single(99.0), Signal::Sell, 250.0);
        assert_eq!(r.confidence, 100.0);
        let r = IndicatorResult::new("rsi", IndicatorValue::Single(1.0), Signal::Buy, -5.0);
        assert_eq!(r.confidence, 0.0);
    }

    #[test]
    fn test_inconclusive() {
        let r = IndicatorResult::inconclusive("rsi");
        assert!(r.is_inconclusive());
        assert_eq!(r.signal, Signal::Hold);
        assert_eq!(r.confidence, 0.0);
    }
}
